//! Base and adjusted consumption series
//!
//! A `BaseSeries` is validated once at construction and never mutated
//! afterwards. Every scenario evaluation reads it by reference.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Lower clamp bound applied to every adjusted value (billion litres)
pub const FLOOR: f64 = 0.1;

/// Upper clamp bound as a multiple of the base-year value
pub const CAP_MULTIPLIER: f64 = 1.2;

/// Yearly diesel consumption, index 0 is the base year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseSeries {
    years: Vec<i32>,
    consumption: Vec<f64>,
}

impl BaseSeries {
    /// Build a base series from parallel arrays.
    ///
    /// Years must be strictly increasing so `years[i] - years[0]` is never
    /// negative. Values must be finite and non-negative, and the first value
    /// must leave room between the floor and the cap.
    pub fn new(years: Vec<i32>, consumption: Vec<f64>) -> Result<Self> {
        if years.is_empty() || consumption.is_empty() {
            return Err(ModelError::EmptySeries);
        }
        if years.len() != consumption.len() {
            return Err(ModelError::LengthMismatch {
                years: years.len(),
                values: consumption.len(),
            });
        }

        for (index, pair) in years.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ModelError::NonIncreasingYears {
                    index: index + 1,
                    previous: pair[0],
                    year: pair[1],
                });
            }
        }

        for (index, &value) in consumption.iter().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteValue { index });
            }
            if value < 0.0 {
                return Err(ModelError::NegativeValue { index, value });
            }
        }

        let first_value = consumption[0];
        if first_value * CAP_MULTIPLIER < FLOOR {
            return Err(ModelError::CapBelowFloor { first_value });
        }

        Ok(Self { years, consumption })
    }

    /// Skip validation for compile-time constants checked by tests
    pub(crate) fn from_trusted(years: Vec<i32>, consumption: Vec<f64>) -> Self {
        debug_assert_eq!(years.len(), consumption.len());
        Self { years, consumption }
    }

    /// Build from `(year, consumption)` pairs
    pub fn from_pairs(pairs: &[(i32, f64)]) -> Result<Self> {
        let (years, consumption) = pairs.iter().copied().unzip();
        Self::new(years, consumption)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn consumption(&self) -> &[f64] {
        &self.consumption
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Always false; construction rejects empty series
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn base_year(&self) -> i32 {
        self.years[0]
    }

    pub fn base_value(&self) -> f64 {
        self.consumption[0]
    }

    /// Closed interval every adjusted value is clamped into
    pub fn bounds(&self) -> (f64, f64) {
        (FLOOR, self.base_value() * CAP_MULTIPLIER)
    }

    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.years.binary_search(&year).ok()
    }

    pub fn value_at_year(&self, year: i32) -> Result<f64> {
        self.index_of(year)
            .map(|i| self.consumption[i])
            .ok_or(ModelError::YearNotInSeries(year))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.consumption.iter().copied())
    }
}

/// Raw shape used for (de)serialization; validated through `BaseSeries::new`
#[derive(Deserialize)]
struct RawBaseSeries {
    years: Vec<i32>,
    consumption: Vec<f64>,
}

impl<'de> Deserialize<'de> for BaseSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawBaseSeries::deserialize(deserializer)?;
        BaseSeries::new(raw.years, raw.consumption).map_err(serde::de::Error::custom)
    }
}

/// Output of one scenario evaluation, aligned with the base series years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedSeries {
    pub years: Vec<i32>,
    pub values: Vec<f64>,
}

impl AdjustedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at_year(&self, year: i32) -> Option<f64> {
        self.years
            .binary_search(&year)
            .ok()
            .and_then(|i| self.values.get(i).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(BaseSeries::new(vec![], vec![]), Err(ModelError::EmptySeries));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = BaseSeries::new(vec![2024, 2025], vec![7.0]).unwrap_err();
        assert_eq!(err, ModelError::LengthMismatch { years: 2, values: 1 });
    }

    #[test]
    fn test_rejects_unordered_years() {
        let err = BaseSeries::new(vec![2024, 2026, 2025], vec![7.0, 6.0, 5.0]).unwrap_err();
        assert!(matches!(err, ModelError::NonIncreasingYears { index: 2, .. }));
    }

    #[test]
    fn test_rejects_nan_and_negative() {
        assert!(matches!(
            BaseSeries::new(vec![2024, 2025], vec![7.0, f64::NAN]),
            Err(ModelError::NonFiniteValue { index: 1 })
        ));
        assert!(matches!(
            BaseSeries::new(vec![2024, 2025], vec![7.0, -1.0]),
            Err(ModelError::NegativeValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_cap_below_floor() {
        assert!(matches!(
            BaseSeries::new(vec![2024], vec![0.05]),
            Err(ModelError::CapBelowFloor { .. })
        ));
    }

    #[test]
    fn test_lookup_by_year() {
        let series = BaseSeries::from_pairs(&[(2024, 7.0), (2025, 6.5), (2026, 6.0)]).unwrap();
        assert_eq!(series.index_of(2025), Some(1));
        assert_eq!(series.value_at_year(2026), Ok(6.0));
        assert_eq!(series.value_at_year(2030), Err(ModelError::YearNotInSeries(2030)));
        assert_eq!(series.bounds(), (FLOOR, 7.0 * CAP_MULTIPLIER));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BaseSeries =
            serde_json::from_str(r#"{"years":[2024,2025],"consumption":[7.0,6.0]}"#).unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<BaseSeries>(r#"{"years":[2024],"consumption":[]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_adjusted_lookup_with_short_values() {
        let series: AdjustedSeries =
            serde_json::from_str(r#"{"years":[2024,2025,2026],"values":[7.0]}"#).unwrap();
        assert_eq!(series.value_at_year(2024), Some(7.0));
        assert_eq!(series.value_at_year(2026), None);
        assert_eq!(series.value_at_year(2030), None);
    }
}
