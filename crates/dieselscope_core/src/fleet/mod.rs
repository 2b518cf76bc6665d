//! Cohort fleet model
//!
//! Tracks diesel cars by registration year. Each cohort starts at its new
//! registrations and shrinks with the survival curve; annual mileage and
//! fuel economy by age turn the surviving fleet into litres consumed.
//!
//! The forecast is an independent estimate, not the source of the built-in
//! base series. `ForecastReport::to_base_series` turns it into a base series
//! when the scenario model should run on top of it instead.

mod consumption;
mod report;
mod tables;

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::data;
use crate::error::FleetError;

pub use consumption::{
    ConsumptionRecord, LITRES_PER_UK_GALLON, VanRecord, calculate_consumption,
    estimate_van_consumption,
};
pub use report::{
    BacktestRow, CAR_VAN_SHARE, DECLINING_MILEAGE_ADJUSTMENT, DataSummary, ForecastReport,
    ForecastRow, REFERENCE_YEAR, SeriesSummary, backtest, forecast, summary,
};
pub use tables::{AgeTable, FleetTables};

/// Oldest age kept in the fleet
pub const MAX_AGE: i32 = 25;

/// Earliest registration year considered
pub const EARLIEST_COHORT: i32 = 1995;

/// Yearly multiplier applied to sales after the last known year
pub const DEFAULT_DECLINE_RATE: f64 = 0.85;

/// Year-indexed values (sales, fleet size, litres)
pub type YearTable = BTreeMap<i32, f64>;

/// Everything the fleet model reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetInputs {
    /// New diesel car registrations
    pub car_sales: YearTable,
    /// Diesel share of new car registrations, percent
    #[serde(default)]
    pub car_diesel_share: Option<YearTable>,
    /// New diesel van registrations
    #[serde(default)]
    pub van_sales: Option<YearTable>,
    /// Licensed diesel cars, millions
    #[serde(default)]
    pub fleet_size: Option<YearTable>,
    /// Total road diesel, billion litres
    #[serde(default)]
    pub road_diesel: Option<YearTable>,
    #[serde(default)]
    pub tables: FleetTables,
    #[serde(default = "default_decline_rate")]
    pub decline_rate: f64,
}

fn default_decline_rate() -> f64 {
    DEFAULT_DECLINE_RATE
}

impl FleetInputs {
    /// Inputs built from the bundled datasets
    pub fn builtin() -> Self {
        Self {
            car_sales: data::CAR_SALES.into_iter().collect(),
            car_diesel_share: Some(data::CAR_DIESEL_SHARE.into_iter().collect()),
            van_sales: Some(data::VAN_SALES.into_iter().collect()),
            fleet_size: Some(data::FLEET_SIZE.into_iter().collect()),
            road_diesel: Some(data::ROAD_DIESEL.into_iter().collect()),
            tables: FleetTables::default(),
            decline_rate: DEFAULT_DECLINE_RATE,
        }
    }
}

impl Default for FleetInputs {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Surviving vehicles per calendar year, keyed by registration year
#[derive(Debug, Clone, Default)]
pub struct FleetModel {
    pub years: BTreeMap<i32, FxHashMap<i32, u64>>,
}

impl FleetModel {
    pub fn cohorts(&self, year: i32) -> Option<&FxHashMap<i32, u64>> {
        self.years.get(&year)
    }

    pub fn total_vehicles(&self, year: i32) -> u64 {
        self.cohorts(year).map(|c| c.values().sum()).unwrap_or(0)
    }
}

/// New registrations for a cohort, extrapolating past the last known year
fn cohort_sales(sales: &YearTable, reg_year: i32, decline_rate: f64) -> Option<f64> {
    if let Some(&count) = sales.get(&reg_year) {
        return Some(count);
    }
    let (&last_year, &last_count) = sales.last_key_value()?;
    if reg_year > last_year {
        Some(last_count * decline_rate.powi(reg_year - last_year))
    } else {
        None
    }
}

/// Build the fleet for every year in `base_year..=forecast_year`.
///
/// Cohorts registered before the first year of sales data are skipped;
/// cohorts after the last year decline by `decline_rate` per year.
pub fn build_fleet(
    sales: &YearTable,
    survival: &AgeTable,
    base_year: i32,
    forecast_year: i32,
    decline_rate: f64,
) -> Result<FleetModel, FleetError> {
    if sales.is_empty() {
        return Err(FleetError::MissingSalesData);
    }
    if forecast_year < base_year {
        return Err(FleetError::InvalidYearRange {
            start: base_year,
            end: forecast_year,
        });
    }

    let mut fleet = FleetModel::default();

    for year in base_year..=forecast_year {
        let mut cohorts = FxHashMap::default();

        for reg_year in EARLIEST_COHORT.max(year - MAX_AGE)..=year {
            let Some(new_cars) = cohort_sales(sales, reg_year, decline_rate) else {
                continue;
            };

            let surviving = (new_cars * survival.get(year - reg_year)).floor();
            if surviving >= 1.0 {
                cohorts.insert(reg_year, surviving as u64);
            }
        }

        fleet.years.insert(year, cohorts);
    }

    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(pairs: &[(i32, f64)]) -> YearTable {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_missing_sales_is_error() {
        let err = build_fleet(&YearTable::new(), &FleetTables::default().survival, 2020, 2021, 0.85)
            .unwrap_err();
        assert_eq!(err, FleetError::MissingSalesData);
    }

    #[test]
    fn test_reversed_range_is_error() {
        let err = build_fleet(
            &sales(&[(2020, 1000.0)]),
            &FleetTables::default().survival,
            2025,
            2020,
            0.85,
        )
        .unwrap_err();
        assert!(matches!(err, FleetError::InvalidYearRange { .. }));
    }

    #[test]
    fn test_cohort_survival_applied() {
        let survival = AgeTable::new(vec![1.0, 0.5, 0.25], 0.0);
        let fleet = build_fleet(&sales(&[(2020, 1000.0)]), &survival, 2020, 2023, 1.0).unwrap();

        // Decline rate 1.0 keeps extrapolated cohorts at 1000
        let cohorts = fleet.cohorts(2022).unwrap();
        assert_eq!(cohorts.get(&2020), Some(&250));
        assert_eq!(cohorts.get(&2021), Some(&500));
        assert_eq!(cohorts.get(&2022), Some(&1000));

        // Age 3 falls back to zero survival and is dropped
        assert!(fleet.cohorts(2023).unwrap().get(&2020).is_none());
    }

    #[test]
    fn test_extrapolated_sales_decline() {
        let table = sales(&[(2020, 1000.0)]);
        assert_eq!(cohort_sales(&table, 2020, 0.85), Some(1000.0));
        let two_ahead = cohort_sales(&table, 2022, 0.85).unwrap();
        assert!((two_ahead - 722.5).abs() < 1e-9);
        assert_eq!(cohort_sales(&table, 2019, 0.85), None);
    }

    #[test]
    fn test_surviving_count_truncates() {
        let survival = AgeTable::new(vec![0.9995], 0.0);
        let fleet = build_fleet(&sales(&[(2020, 1000.0)]), &survival, 2020, 2020, 0.85).unwrap();
        assert_eq!(fleet.total_vehicles(2020), 999);
    }
}
