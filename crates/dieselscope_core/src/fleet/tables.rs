//! Per-age lookup tables for the fleet model

use serde::{Deserialize, Serialize};

use crate::data::{ANNUAL_MILES_BY_AGE, MPG_BY_AGE, SURVIVAL_BY_AGE};

/// Values indexed by vehicle age with a fallback for ages past the end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeTable {
    pub values: Vec<f64>,
    pub fallback: f64,
}

impl AgeTable {
    pub fn new(values: Vec<f64>, fallback: f64) -> Self {
        Self { values, fallback }
    }

    #[inline]
    pub fn get(&self, age: i32) -> f64 {
        usize::try_from(age)
            .ok()
            .and_then(|a| self.values.get(a))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Oldest age with an explicit entry
    pub fn max_age(&self) -> Option<i32> {
        self.values.len().checked_sub(1).map(|a| a as i32)
    }
}

/// Survival, mileage and fuel economy curves by vehicle age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetTables {
    pub survival: AgeTable,
    pub annual_miles: AgeTable,
    pub mpg: AgeTable,
}

impl Default for FleetTables {
    fn default() -> Self {
        Self {
            survival: AgeTable::new(SURVIVAL_BY_AGE.to_vec(), 0.0),
            annual_miles: AgeTable::new(ANNUAL_MILES_BY_AGE.to_vec(), 4000.0),
            mpg: AgeTable::new(MPG_BY_AGE.to_vec(), 40.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks_past_table_end() {
        let tables = FleetTables::default();
        assert_eq!(tables.survival.get(26), 0.0);
        assert_eq!(tables.annual_miles.get(30), 4000.0);
        assert_eq!(tables.mpg.get(-1), 40.0);
        assert_eq!(tables.mpg.get(0), 55.0);
        assert_eq!(tables.survival.max_age(), Some(25));
    }
}
