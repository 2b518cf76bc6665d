//! UK diesel decline projection library
//!
//! This crate holds the numeric side of the diesel decline analysis:
//! - The scenario model: three adjustment percentages applied to a fixed
//!   base series of yearly diesel car consumption
//! - A cohort fleet model (survival, mileage and fuel economy by age) that
//!   produces the base series
//! - Monte Carlo sensitivity bands over the adjustment parameters
//!
//! ```ignore
//! use dieselscope_core::{AdjustmentParams, data, scenario};
//!
//! let base = data::base_series();
//! let adjusted = scenario::adjust(&base, &AdjustmentParams::new(20, -2, 5));
//! assert_eq!(adjusted.len(), base.len());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod data;
pub mod error;
pub mod fleet;
pub mod scenario;
pub mod sensitivity;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ModelConfig, ScenarioBuilder};
pub use error::{FleetError, ModelError, SamplingError};
pub use model::{
    AdjustedSeries, AdjustmentParams, BaseSeries, KeyYearReadout, ParamRange, SliderBounds,
};
pub use scenario::{adjust, adjust_into};
