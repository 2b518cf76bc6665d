//! Backtest, forecast and data summary built on the fleet model

use serde::{Deserialize, Serialize};

use super::{FleetInputs, YearTable, build_fleet, calculate_consumption, estimate_van_consumption};
use crate::error::{FleetError, ModelError};
use crate::model::BaseSeries;

/// Share of total road diesel burned by cars and vans
pub const CAR_VAN_SHARE: f64 = 0.55;

/// Year forecast changes are measured against
pub const REFERENCE_YEAR: i32 = 2024;

/// Mileage multiplier for the "diesels driven less" variant
pub const DECLINING_MILEAGE_ADJUSTMENT: f64 = 0.98;

/// First year of the forecast fleet
const FORECAST_START: i32 = 2020;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    pub year: i32,
    pub car_litres_billions: f64,
    pub van_litres_billions: f64,
    pub predicted_billions: f64,
    /// Total road diesel for the year, if known
    pub actual_billions: Option<f64>,
    /// Percent error of the prediction against the car and van share of actual
    pub error_pct: Option<f64>,
}

/// Compare predicted car and van litres with the car and van share of actual
/// road diesel for `start..=end`
pub fn backtest(inputs: &FleetInputs, start: i32, end: i32) -> Result<Vec<BacktestRow>, FleetError> {
    let fleet = build_fleet(
        &inputs.car_sales,
        &inputs.tables.survival,
        start,
        end,
        inputs.decline_rate,
    )?;
    let cars = calculate_consumption(&fleet, &inputs.tables, 1.0);
    let vans = estimate_van_consumption(inputs.van_sales.as_ref(), start..=end);

    let rows = cars
        .iter()
        .map(|car| {
            let van_litres = vans
                .as_ref()
                .and_then(|v| v.iter().find(|r| r.year == car.year))
                .map(|r| r.van_litres_billions)
                .unwrap_or(0.0);
            let predicted = car.car_litres_billions + van_litres;

            let actual = inputs
                .road_diesel
                .as_ref()
                .and_then(|t| t.get(&car.year))
                .copied();
            let error_pct = actual.map(|a| {
                let car_van_actual = a * CAR_VAN_SHARE;
                (predicted - car_van_actual) / car_van_actual * 100.0
            });

            BacktestRow {
                year: car.year,
                car_litres_billions: car.car_litres_billions,
                van_litres_billions: van_litres,
                predicted_billions: predicted,
                actual_billions: actual,
                error_pct,
            }
        })
        .collect();

    Ok(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub year: i32,
    pub fleet_size_millions: f64,
    pub total_miles_billions: f64,
    pub car_litres_billions: f64,
    /// Litres with every age's mileage scaled by `DECLINING_MILEAGE_ADJUSTMENT`
    pub declining_mileage_litres_billions: f64,
    /// Fractional change against `REFERENCE_YEAR`, from that year on
    pub change_from_reference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub target_year: i32,
    pub rows: Vec<ForecastRow>,
}

impl ForecastReport {
    pub fn row(&self, year: i32) -> Option<&ForecastRow> {
        self.rows.iter().find(|r| r.year == year)
    }

    /// Rows for `years` that fall inside the forecast
    pub fn key_rows(&self, years: &[i32]) -> Vec<ForecastRow> {
        years.iter().filter_map(|&y| self.row(y).copied()).collect()
    }

    /// Car litres from `REFERENCE_YEAR` onward as a scenario base series
    pub fn to_base_series(&self) -> Result<BaseSeries, ModelError> {
        let pairs: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|r| r.year >= REFERENCE_YEAR)
            .map(|r| (r.year, r.car_litres_billions))
            .collect();
        BaseSeries::from_pairs(&pairs)
    }
}

/// Project car consumption from 2020 to `target_year`
pub fn forecast(inputs: &FleetInputs, target_year: i32) -> Result<ForecastReport, FleetError> {
    let fleet = build_fleet(
        &inputs.car_sales,
        &inputs.tables.survival,
        FORECAST_START,
        target_year,
        inputs.decline_rate,
    )?;
    let neutral = calculate_consumption(&fleet, &inputs.tables, 1.0);
    let declining = calculate_consumption(&fleet, &inputs.tables, DECLINING_MILEAGE_ADJUSTMENT);

    let reference = neutral
        .iter()
        .find(|r| r.year == REFERENCE_YEAR)
        .map(|r| r.car_litres_billions)
        .filter(|&litres| litres > 0.0);

    let rows = neutral
        .iter()
        .zip(&declining)
        .map(|(n, d)| ForecastRow {
            year: n.year,
            fleet_size_millions: n.fleet_size_millions,
            total_miles_billions: n.total_miles_billions,
            car_litres_billions: n.car_litres_billions,
            declining_mileage_litres_billions: d.car_litres_billions,
            change_from_reference: reference
                .filter(|_| n.year >= REFERENCE_YEAR)
                .map(|base| (n.car_litres_billions - base) / base),
        })
        .collect();

    Ok(ForecastReport { target_year, rows })
}

/// Range and latest value of one input table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub first_year: i32,
    pub last_year: i32,
    pub latest: f64,
    pub peak_year: i32,
    pub peak: f64,
}

impl SeriesSummary {
    pub fn from_table(table: &YearTable) -> Option<Self> {
        let (&first_year, _) = table.first_key_value()?;
        let (&last_year, &latest) = table.last_key_value()?;
        let (&peak_year, &peak) = table
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        Some(Self {
            first_year,
            last_year,
            latest,
            peak_year,
            peak,
        })
    }
}

/// What data the fleet model has to work with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub car_sales: Option<SeriesSummary>,
    pub car_diesel_share: Option<SeriesSummary>,
    pub fleet_size: Option<SeriesSummary>,
    pub road_diesel: Option<SeriesSummary>,
    pub van_sales: Option<SeriesSummary>,
}

pub fn summary(inputs: &FleetInputs) -> DataSummary {
    let summarize = |t: Option<&YearTable>| t.and_then(SeriesSummary::from_table);
    DataSummary {
        car_sales: SeriesSummary::from_table(&inputs.car_sales),
        car_diesel_share: summarize(inputs.car_diesel_share.as_ref()),
        fleet_size: summarize(inputs.fleet_size.as_ref()),
        road_diesel: summarize(inputs.road_diesel.as_ref()),
        van_sales: summarize(inputs.van_sales.as_ref()),
    }
}
