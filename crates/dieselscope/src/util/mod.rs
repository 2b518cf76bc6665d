//! Utility modules
//!
//! - `format` - number formatting for text reports
//! - `io` - atomic file writes

pub mod format;
pub mod io;
