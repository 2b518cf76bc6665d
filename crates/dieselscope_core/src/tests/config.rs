//! Tests for `ModelConfig` defaults and serialization

use crate::config::ModelConfig;
use crate::data;
use crate::model::{AdjustmentParams, READOUT_YEARS};
use crate::sensitivity::ParamDistribution;

#[test]
fn test_empty_document_is_default() {
    let config: ModelConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ModelConfig::default());
    assert_eq!(config.base_series, data::base_series());
    assert_eq!(config.readout_years, READOUT_YEARS.to_vec());
    assert!(config.params.is_neutral());
}

#[test]
fn test_partial_override() {
    let json = r#"{
        "params": { "sales_decline": 20, "mileage_change": -2, "survival_boost": 5 },
        "base_series": { "years": [2024, 2025, 2026], "consumption": [7.0, 6.0, 5.0] },
        "sensitivity": {
            "iterations": 200,
            "seed": 7,
            "sales_decline": { "type": "Uniform", "min": 5.0, "max": 25.0 },
            "mileage_change": { "type": "Fixed", "value": 0.0 },
            "survival_boost": { "type": "Normal", "mean": 0.0, "std_dev": 3.0 },
            "percentiles": [0.1, 0.9]
        }
    }"#;

    let config: ModelConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.params, AdjustmentParams::new(20, -2, 5));
    assert_eq!(config.base_series.len(), 3);
    assert_eq!(config.sensitivity.iterations, 200);
    assert_eq!(
        config.sensitivity.sales_decline,
        ParamDistribution::Uniform {
            min: 5.0,
            max: 25.0
        }
    );
    // Untouched sections keep their defaults
    assert_eq!(config.fleet, ModelConfig::default().fleet);
}

#[test]
fn test_invalid_base_series_rejected() {
    let json = r#"{ "base_series": { "years": [2025, 2024], "consumption": [7.0, 6.0] } }"#;
    let err = serde_json::from_str::<ModelConfig>(json).unwrap_err();
    assert!(err.to_string().contains("does not follow"));
}

#[test]
fn test_round_trip() {
    let config = ModelConfig::default().with_params(AdjustmentParams::new(30, 4, -6));
    let json = serde_json::to_string(&config).unwrap();
    let back: ModelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
