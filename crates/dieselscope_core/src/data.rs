//! Built-in datasets
//!
//! The base series is the published UK diesel car consumption projection in
//! billion litres, bundled as-is. The cohort fleet model in `fleet` is an
//! independent estimate from the tables below and does not reproduce it
//! exactly. Age tables come from MOT test history for diesel cars
//! registered 2005-2020 and tested 2024-2025; ages 0-2 are estimates since
//! cars under three years old are not MOT tested. Sales, van and
//! consumption histories are rounded SMMT and DESNZ figures.

use crate::model::BaseSeries;

/// First year of the built-in base series
pub const BASE_YEAR: i32 = 2024;

/// Diesel car consumption projection, 2024-2040, billion litres
pub const BASE_CONSUMPTION: [f64; 17] = [
    7.06, 6.58, 6.08, 5.59, 5.11, 4.65, 4.23, 3.82, 3.42, 3.03, 2.66, 2.31, 1.98, 1.62, 1.28,
    0.95, 0.65,
];

/// The built-in base series
pub fn base_series() -> BaseSeries {
    let years = (BASE_YEAR..).take(BASE_CONSUMPTION.len()).collect();
    BaseSeries::from_trusted(years, BASE_CONSUMPTION.to_vec())
}

/// Fraction of a cohort still on the road, by age 0..=25
pub const SURVIVAL_BY_AGE: [f64; 26] = [
    1.000, 0.998, 0.995, 0.990, 0.987, 0.983, 0.971, 0.958, 0.944, 0.931, 0.912, 0.885, 0.851,
    0.803, 0.731, 0.659, 0.569, 0.434, 0.345, 0.256, 0.184, 0.130, 0.090, 0.060, 0.035, 0.020,
];

/// Median annual miles by age 0..=25; ages 21+ are extrapolated
pub const ANNUAL_MILES_BY_AGE: [f64; 26] = [
    12000.0, 11800.0, 11700.0, 11617.0, 9769.0, 9344.0, 8977.0, 8625.0, 8286.0, 7923.0, 7594.0,
    7266.0, 6959.0, 6647.0, 6284.0, 6015.0, 5644.0, 5328.0, 4946.0, 4514.0, 4151.0, 3800.0,
    3500.0, 3200.0, 2900.0, 2600.0,
];

/// Diesel fuel economy in UK MPG by age 0..=25
pub const MPG_BY_AGE: [f64; 26] = [
    55.0, 55.0, 55.0, 55.0, 54.0, 53.0, 52.0, 51.0, 50.0, 49.0, 48.0, 47.0, 46.0, 45.0, 44.0,
    43.0, 42.0, 41.0, 40.0, 39.0, 38.0, 37.0, 36.0, 35.0, 34.0, 33.0,
];

/// New diesel car registrations by year
pub const CAR_SALES: [(i32, f64); 20] = [
    (2005, 880_000.0),
    (2006, 870_000.0),
    (2007, 940_000.0),
    (2008, 917_000.0),
    (2009, 838_000.0),
    (2010, 935_000.0),
    (2011, 984_000.0),
    (2012, 1_036_000.0),
    (2013, 1_130_000.0),
    (2014, 1_242_000.0),
    (2015, 1_276_000.0),
    (2016, 1_284_000.0),
    (2017, 1_066_000.0),
    (2018, 749_000.0),
    (2019, 584_000.0),
    (2020, 267_000.0),
    (2021, 137_000.0),
    (2022, 93_000.0),
    (2023, 75_000.0),
    (2024, 58_000.0),
];

/// Diesel share of new car registrations, percent
pub const CAR_DIESEL_SHARE: [(i32, f64); 6] = [
    (2019, 25.8),
    (2020, 16.4),
    (2021, 8.3),
    (2022, 5.7),
    (2023, 3.9),
    (2024, 3.0),
];

/// New diesel light commercial vehicle registrations by year
pub const VAN_SALES: [(i32, f64); 10] = [
    (2015, 362_000.0),
    (2016, 360_000.0),
    (2017, 349_000.0),
    (2018, 343_000.0),
    (2019, 350_000.0),
    (2020, 275_000.0),
    (2021, 330_000.0),
    (2022, 261_000.0),
    (2023, 309_000.0),
    (2024, 310_000.0),
];

/// Licensed diesel cars, millions
pub const FLEET_SIZE: [(i32, f64); 6] = [
    (2019, 12.6),
    (2020, 12.4),
    (2021, 12.0),
    (2022, 11.5),
    (2023, 11.0),
    (2024, 10.5),
];

/// Total road diesel delivered, billion litres
pub const ROAD_DIESEL: [(i32, f64); 10] = [
    (2015, 26.4),
    (2016, 27.2),
    (2017, 27.6),
    (2018, 27.8),
    (2019, 27.9),
    (2020, 22.5),
    (2021, 25.3),
    (2022, 25.9),
    (2023, 25.6),
    (2024, 25.4),
];
