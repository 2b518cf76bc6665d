//! Core data types for the scenario model
//!
//! - `series` - base and adjusted consumption series
//! - `params` - adjustment parameters and slider ranges
//! - `readout` - key-year values pulled from an adjusted series

mod params;
mod readout;
mod series;

pub use params::{AdjustmentParams, NEUTRAL_SALES_DECLINE, ParamRange, SliderBounds};
pub use readout::{KeyYearReadout, KeyYearValue, READOUT_YEARS};
pub use series::{AdjustedSeries, BaseSeries, CAP_MULTIPLIER, FLOOR};
