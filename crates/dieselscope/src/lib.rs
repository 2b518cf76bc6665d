//! Command-line front end for the diesel decline scenario model
//!
//! The binary wires these modules together:
//! - `data` - config.yaml storage in the data directory
//! - `explorer` - slider state and the interactive explorer loop
//! - `report` - plain-text tables
//! - `logging` - file logging under the data directory

pub mod data;
pub mod explorer;
pub mod logging;
pub mod report;
pub mod util;

pub use explorer::{ExplorerCommand, ExplorerState, Slider, run_explorer};
pub use logging::init_logging;
