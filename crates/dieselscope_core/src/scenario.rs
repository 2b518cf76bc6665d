//! Scenario model
//!
//! Applies three adjustment percentages to a base consumption series:
//!
//! - sales factor `(1 - (sales_decline - 15) / 100) ^ years_from_base`
//! - mileage factor `(1 + mileage_change / 100) ^ years_from_base`
//! - survival factor `1 + survival_boost / 100`, not compounded
//!
//! Each product is clamped into `[FLOOR, base_value * CAP_MULTIPLIER]`.
//! Elapsed years are whole numbers, so the compounding uses integer powers.
//!
//! The formula is meaningful for `sales_decline <= 115`,
//! `mileage_change >= -100` and `survival_boost >= -100`, where every factor
//! is non-negative. Outside that domain each yearly rate is held at zero, so
//! a vanished quantity stays vanished instead of flipping sign. This keeps the
//! output non-decreasing in the survival boost for every input triple.

use serde::{Deserialize, Serialize};

use crate::model::{AdjustedSeries, AdjustmentParams, BaseSeries, NEUTRAL_SALES_DECLINE};

/// Per-year breakdown of one scenario evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFactors {
    pub year: i32,
    pub years_from_base: i32,
    pub sales: f64,
    pub mileage: f64,
    pub survival: f64,
    /// Value before clamping
    pub raw: f64,
    pub adjusted: f64,
}

/// Yearly growth multipliers derived from the parameters
#[derive(Debug, Clone, Copy)]
struct Rates {
    sales: f64,
    mileage: f64,
    survival: f64,
}

impl Rates {
    fn from_params(params: &AdjustmentParams) -> Self {
        let sales_delta = f64::from(params.sales_decline) - f64::from(NEUTRAL_SALES_DECLINE);
        Self {
            sales: (1.0 - sales_delta / 100.0).max(0.0),
            mileage: (1.0 + f64::from(params.mileage_change) / 100.0).max(0.0),
            survival: (1.0 + f64::from(params.survival_boost) / 100.0).max(0.0),
        }
    }
}

/// Whole years from `base_year` to `year`, saturating at `i32::MAX`
#[inline]
fn elapsed_years(year: i32, base_year: i32) -> i32 {
    let elapsed = i64::from(year) - i64::from(base_year);
    i32::try_from(elapsed).unwrap_or(if elapsed < 0 { i32::MIN } else { i32::MAX })
}

/// Clamp into `[lo, hi]`; NaN resolves to the floor
#[inline]
fn clamp_value(raw: f64, lo: f64, hi: f64) -> f64 {
    if raw.is_nan() { lo } else { raw.clamp(lo, hi) }
}

#[inline]
fn evaluate(rates: &Rates, years_from_base: i32, value: f64) -> (f64, f64, f64) {
    let sales = rates.sales.powi(years_from_base);
    let mileage = rates.mileage.powi(years_from_base);
    let raw = value * sales * mileage * rates.survival;
    (sales, mileage, raw)
}

/// Compute the adjusted series into `out`, replacing its contents.
///
/// `out` ends up with exactly `base.len()` values.
pub fn adjust_into(base: &BaseSeries, params: &AdjustmentParams, out: &mut Vec<f64>) {
    let rates = Rates::from_params(params);
    let (lo, hi) = base.bounds();
    let base_year = base.base_year();

    out.clear();
    out.reserve(base.len());
    out.extend(base.iter().map(|(year, value)| {
        let (_, _, raw) = evaluate(&rates, elapsed_years(year, base_year), value);
        clamp_value(raw, lo, hi)
    }));
}

/// Compute the adjusted series for `params`
pub fn adjust(base: &BaseSeries, params: &AdjustmentParams) -> AdjustedSeries {
    let mut values = Vec::with_capacity(base.len());
    adjust_into(base, params, &mut values);
    AdjustedSeries {
        years: base.years().to_vec(),
        values,
    }
}

/// Same computation as `adjust`, with every intermediate factor exposed
pub fn factors(base: &BaseSeries, params: &AdjustmentParams) -> Vec<ScenarioFactors> {
    let rates = Rates::from_params(params);
    let (lo, hi) = base.bounds();
    let base_year = base.base_year();

    base.iter()
        .map(|(year, value)| {
            let years_from_base = elapsed_years(year, base_year);
            let (sales, mileage, raw) = evaluate(&rates, years_from_base, value);
            ScenarioFactors {
                year,
                years_from_base,
                sales,
                mileage,
                survival: rates.survival,
                raw,
                adjusted: clamp_value(raw, lo, hi),
            }
        })
        .collect()
}
