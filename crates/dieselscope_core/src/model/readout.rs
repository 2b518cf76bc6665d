use serde::{Deserialize, Serialize};

use super::series::AdjustedSeries;

/// Years surfaced in the results readout
pub const READOUT_YEARS: [i32; 2] = [2030, 2035];

/// One readout line: the adjusted value at a year and its change versus the
/// first value of the series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyYearValue {
    pub year: i32,
    pub value: f64,
    /// Fractional change relative to the first adjusted value
    pub change_from_base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyYearReadout {
    pub entries: Vec<KeyYearValue>,
}

impl KeyYearReadout {
    /// Pick `years` out of `series`; years outside the series are skipped
    pub fn from_series(series: &AdjustedSeries, years: &[i32]) -> Self {
        let base = series.values.first().copied().unwrap_or(0.0);
        let entries = years
            .iter()
            .filter_map(|&year| {
                let value = series.value_at_year(year)?;
                let change_from_base = if base > 0.0 { (value - base) / base } else { 0.0 };
                Some(KeyYearValue {
                    year,
                    value,
                    change_from_base,
                })
            })
            .collect();
        Self { entries }
    }

    pub fn standard(series: &AdjustedSeries) -> Self {
        Self::from_series(series, &READOUT_YEARS)
    }

    pub fn get(&self, year: i32) -> Option<&KeyYearValue> {
        self.entries.iter().find(|e| e.year == year)
    }
}
