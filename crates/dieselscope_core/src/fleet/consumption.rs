use serde::{Deserialize, Serialize};

use super::{FleetModel, FleetTables, YearTable};

/// Litres in one UK gallon
pub const LITRES_PER_UK_GALLON: f64 = 4.546;

const VAN_STARTING_FLEET: f64 = 4_000_000.0;
const VAN_RETENTION: f64 = 0.92;
const VAN_ANNUAL_MILES: f64 = 12_000.0;
const VAN_MPG: f64 = 35.0;

/// Car fleet totals for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub year: i32,
    pub fleet_size_millions: f64,
    pub total_miles_billions: f64,
    pub car_litres_billions: f64,
}

/// Van fleet totals for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanRecord {
    pub year: i32,
    pub van_fleet_millions: f64,
    pub van_litres_billions: f64,
}

fn litres(miles: f64, mpg: f64) -> f64 {
    miles / mpg * LITRES_PER_UK_GALLON
}

/// Yearly car consumption from a fleet.
///
/// `mileage_adjustment` scales every age's annual miles, e.g. 0.9 for -10%.
pub fn calculate_consumption(
    fleet: &FleetModel,
    tables: &FleetTables,
    mileage_adjustment: f64,
) -> Vec<ConsumptionRecord> {
    fleet
        .years
        .iter()
        .map(|(&year, cohorts)| {
            let mut vehicles = 0u64;
            let mut miles = 0.0;
            let mut total_litres = 0.0;

            for (&reg_year, &count) in cohorts {
                let age = year - reg_year;
                let cohort_miles =
                    count as f64 * tables.annual_miles.get(age) * mileage_adjustment;

                vehicles += count;
                miles += cohort_miles;
                total_litres += litres(cohort_miles, tables.mpg.get(age));
            }

            ConsumptionRecord {
                year,
                fleet_size_millions: vehicles as f64 / 1e6,
                total_miles_billions: miles / 1e9,
                car_litres_billions: total_litres / 1e9,
            }
        })
        .collect()
}

/// Rough diesel van consumption.
///
/// The van fleet starts at four million; each year with sales data retains
/// 92% of the fleet and adds that year's sales. Returns `None` without van
/// sales data.
pub fn estimate_van_consumption(
    van_sales: Option<&YearTable>,
    years: impl IntoIterator<Item = i32>,
) -> Option<Vec<VanRecord>> {
    let van_sales = van_sales?;
    let mut fleet = VAN_STARTING_FLEET;

    let records = years
        .into_iter()
        .map(|year| {
            if let Some(&sold) = van_sales.get(&year) {
                fleet = fleet * VAN_RETENTION + sold;
            }
            VanRecord {
                year,
                van_fleet_millions: fleet / 1e6,
                van_litres_billions: litres(fleet * VAN_ANNUAL_MILES, VAN_MPG) / 1e9,
            }
        })
        .collect();

    Some(records)
}
