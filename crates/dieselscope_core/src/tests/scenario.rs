//! Tests for the scenario model
//!
//! These tests verify that:
//! - Output length always matches the base series
//! - Every value stays inside `[0.1, base[0] * 1.2]`, even for absurd inputs
//! - Neutral parameters reproduce the base series
//! - Raising the survival boost never lowers a value
//! - The first year only sees the survival factor

use crate::data::{self, BASE_CONSUMPTION};
use crate::model::{AdjustmentParams, BaseSeries, FLOOR};
use crate::scenario::{adjust, adjust_into};

const TOLERANCE: f64 = 1e-9;

fn parameter_grid() -> Vec<AdjustmentParams> {
    let mut grid = Vec::new();
    for sales in [0, 10, 15, 25, 40, 115, 200, -100] {
        for mileage in [-100, -10, 0, 10, 50] {
            for survival in [-100, -20, 0, 20, 100] {
                grid.push(AdjustmentParams::new(sales, mileage, survival));
            }
        }
    }
    grid.push(AdjustmentParams::new(i32::MAX, i32::MAX, i32::MAX));
    grid.push(AdjustmentParams::new(i32::MIN, i32::MIN, i32::MIN));
    grid
}

#[test]
fn test_output_length_matches_base() {
    let base = data::base_series();
    for params in parameter_grid() {
        let adjusted = adjust(&base, &params);
        assert_eq!(adjusted.len(), base.len(), "length changed for {params:?}");
        assert_eq!(adjusted.years, base.years());
    }
}

#[test]
fn test_output_within_bounds() {
    let base = data::base_series();
    let (lo, hi) = base.bounds();
    assert!((hi - 7.06 * 1.2).abs() < TOLERANCE);

    for params in parameter_grid() {
        for (year, value) in adjust(&base, &params).iter() {
            assert!(
                (lo..=hi).contains(&value),
                "{year}: {value} outside [{lo}, {hi}] for {params:?}"
            );
        }
    }
}

#[test]
fn test_neutral_params_reproduce_base() {
    let base = data::base_series();
    let adjusted = adjust(&base, &AdjustmentParams::NEUTRAL);

    for (expected, actual) in base.consumption().iter().zip(&adjusted.values) {
        assert!(
            (expected - actual).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }
}

#[test]
fn test_year_2030_under_neutral_params() {
    let base = data::base_series();
    let adjusted = adjust(&base, &AdjustmentParams::new(15, 0, 0));

    assert_eq!(base.index_of(2030), Some(6));
    assert!((adjusted.values[6] - 4.23).abs() < TOLERANCE);
    assert!((adjusted.value_at_year(2030).unwrap() - BASE_CONSUMPTION[6]).abs() < TOLERANCE);
}

#[test]
fn test_survival_boost_is_monotonic() {
    let base = data::base_series();

    for sales in [0, 15, 30, 40] {
        for mileage in [-10, 0, 10] {
            let mut previous: Option<Vec<f64>> = None;
            for survival in -20..=20 {
                let current = adjust(&base, &AdjustmentParams::new(sales, mileage, survival)).values;
                if let Some(prev) = &previous {
                    for (i, (p, c)) in prev.iter().zip(&current).enumerate() {
                        assert!(
                            c >= p,
                            "index {i} fell from {p} to {c} at survival {survival}"
                        );
                    }
                }
                previous = Some(current);
            }
        }
    }
}

#[test]
fn test_survival_boost_monotonic_at_domain_edges() {
    let base = data::base_series();

    for sales in [100, 115, 116, 200, i32::MAX] {
        for mileage in [i32::MIN, -200, -101, -100, -99, 0] {
            let mut previous: Option<Vec<f64>> = None;
            for survival in [i32::MIN, -300, -200, -150, -101, -100, -99, -50, 0, 20, 300] {
                let current = adjust(&base, &AdjustmentParams::new(sales, mileage, survival)).values;
                if let Some(prev) = &previous {
                    for (i, (p, c)) in prev.iter().zip(&current).enumerate() {
                        assert!(
                            c >= p,
                            "index {i} fell from {p} to {c} at ({sales}, {mileage}, {survival})"
                        );
                    }
                }
                previous = Some(current);
            }
        }
    }
}

#[test]
fn test_collapsed_sales_stay_at_floor() {
    let base = data::base_series();

    // Odd and even years alike: no sign flip past a 100% drop
    let collapsed = adjust(&base, &AdjustmentParams::new(200, 0, -200));
    let boosted = adjust(&base, &AdjustmentParams::new(200, 0, -150));
    assert_eq!(collapsed.values[1], FLOOR);
    assert_eq!(boosted.values[1], FLOOR);
    assert!(collapsed.values[1..].iter().all(|&v| v == FLOOR));
}

#[test]
fn test_first_year_only_sees_survival_factor() {
    let base = data::base_series();
    let first = base.base_value();

    for sales in [0, 15, 40, 200] {
        for mileage in [-10, 0, 10] {
            let down = adjust(&base, &AdjustmentParams::new(sales, mileage, -10));
            assert!((down.values[0] - first * 0.9).abs() < TOLERANCE);

            // 7.06 * 1.3 exceeds the cap of 7.06 * 1.2
            let up = adjust(&base, &AdjustmentParams::new(sales, mileage, 30));
            assert!((up.values[0] - first * 1.2).abs() < TOLERANCE);
        }
    }
}

#[test]
fn test_faster_sales_decline_compounds() {
    let base = data::base_series();
    let adjusted = adjust(&base, &AdjustmentParams::new(25, 0, 0));

    // Each year loses an extra 10% relative to the base trajectory
    assert!((adjusted.values[1] - 6.58 * 0.9).abs() < TOLERANCE);
    assert!((adjusted.values[2] - 6.08 * 0.81).abs() < TOLERANCE);
}

#[test]
fn test_upper_clamp_hit_by_slow_decline() {
    let base = data::base_series();
    let adjusted = adjust(&base, &AdjustmentParams::new(0, 10, 20));
    let (_, cap) = base.bounds();

    // 4.23 * 1.15^6 * 1.1^6 * 1.2 is far above the cap
    assert!((adjusted.values[6] - cap).abs() < TOLERANCE);
}

#[test]
fn test_lower_clamp_hit_by_fast_decline() {
    let base = data::base_series();
    let adjusted = adjust(&base, &AdjustmentParams::new(40, -10, 0));

    assert_eq!(adjusted.values.last().copied(), Some(FLOOR));
}

#[test]
fn test_overflow_resolves_to_floor() {
    // 0^n * inf is NaN once the mileage factor overflows
    let years: Vec<i32> = (2024..2124).collect();
    let base = BaseSeries::new(years, vec![1.0; 100]).unwrap();
    let adjusted = adjust(&base, &AdjustmentParams::new(115, i32::MAX, 0));

    assert_eq!(adjusted.values[0], 1.0);
    assert_eq!(adjusted.values[99], FLOOR);
    assert!(adjusted.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_repeated_calls_are_deterministic() {
    let base = data::base_series();
    let params = AdjustmentParams::new(22, -3, 7);
    let mut buffer = Vec::new();

    adjust_into(&base, &params, &mut buffer);
    let first = buffer.clone();
    adjust_into(&base, &AdjustmentParams::new(0, 10, 20), &mut buffer);
    adjust_into(&base, &params, &mut buffer);

    assert_eq!(first, buffer);
    assert_eq!(adjust(&base, &params).values, buffer);
}
