//! Model configuration
//!
//! `ModelConfig` gathers everything a front end can override: the base
//! series, slider ranges, fleet inputs and sensitivity settings. Every field
//! has a default built from the bundled datasets, so an empty document is a
//! valid config.
//!
//! # Builder
//!
//! ```ignore
//! use dieselscope_core::config::ScenarioBuilder;
//!
//! let (base, params) = ScenarioBuilder::new()
//!     .base_year(2024)
//!     .consumption([7.06, 6.58, 6.08])
//!     .sales_decline(20)
//!     .mileage_change(-2)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::data;
use crate::fleet::FleetInputs;
use crate::model::{AdjustmentParams, BaseSeries, READOUT_YEARS, SliderBounds};
use crate::sensitivity::SensitivityConfig;

pub mod builder;

pub use builder::ScenarioBuilder;

fn default_base_series() -> BaseSeries {
    data::base_series()
}

fn default_readout_years() -> Vec<i32> {
    READOUT_YEARS.to_vec()
}

/// Complete configuration for the scenario and fleet models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Series the scenario model adjusts
    #[serde(default = "default_base_series")]
    pub base_series: BaseSeries,

    /// Starting parameters for the explorer and `scenario` command
    #[serde(default)]
    pub params: AdjustmentParams,

    /// Input ranges for the explorer sliders
    #[serde(default)]
    pub sliders: SliderBounds,

    /// Years shown in the results readout
    #[serde(default = "default_readout_years")]
    pub readout_years: Vec<i32>,

    #[serde(default)]
    pub fleet: FleetInputs,

    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_series: default_base_series(),
            params: AdjustmentParams::default(),
            sliders: SliderBounds::default(),
            readout_years: default_readout_years(),
            fleet: FleetInputs::default(),
            sensitivity: SensitivityConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Config with a different base series
    #[must_use]
    pub fn with_base_series(mut self, base_series: BaseSeries) -> Self {
        self.base_series = base_series;
        self
    }

    /// Config with different starting parameters
    #[must_use]
    pub fn with_params(mut self, params: AdjustmentParams) -> Self {
        self.params = params;
        self
    }
}
