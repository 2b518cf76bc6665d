//! Scenario Builder
//!
//! Fluent setup for a base series plus adjustment parameters. Years are
//! assigned consecutively from `base_year` unless given explicitly.

use crate::data;
use crate::error::ModelError;
use crate::model::{AdjustmentParams, BaseSeries};

#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    base_year: Option<i32>,
    years: Option<Vec<i32>>,
    consumption: Option<Vec<f64>>,
    params: AdjustmentParams,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// First year; later years follow one per value
    pub fn base_year(mut self, year: i32) -> Self {
        self.base_year = Some(year);
        self
    }

    /// Explicit years, overriding `base_year`
    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = Some(years.into_iter().collect());
        self
    }

    pub fn consumption(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.consumption = Some(values.into_iter().collect());
        self
    }

    pub fn sales_decline(mut self, percent: i32) -> Self {
        self.params.sales_decline = percent;
        self
    }

    pub fn mileage_change(mut self, percent: i32) -> Self {
        self.params.mileage_change = percent;
        self
    }

    pub fn survival_boost(mut self, percent: i32) -> Self {
        self.params.survival_boost = percent;
        self
    }

    pub fn params(mut self, params: AdjustmentParams) -> Self {
        self.params = params;
        self
    }

    /// Resolve the base series and parameters.
    ///
    /// Without any consumption values the built-in series is used.
    pub fn build(self) -> Result<(BaseSeries, AdjustmentParams), ModelError> {
        let base = match (self.consumption, self.years) {
            (None, None) => data::base_series(),
            (None, Some(years)) => {
                return Err(ModelError::LengthMismatch {
                    years: years.len(),
                    values: 0,
                });
            }
            (Some(values), Some(years)) => BaseSeries::new(years, values)?,
            (Some(values), None) => {
                let start = self.base_year.unwrap_or(data::BASE_YEAR);
                let years = (start..).take(values.len()).collect();
                BaseSeries::new(years, values)?
            }
        };
        Ok((base, self.params))
    }
}
