//! Integration tests for the diesel projection models
//!
//! Tests are organized by topic:
//! - `scenario` - Scenario model guarantees (length, bounds, identity, monotonicity)
//! - `fleet` - Fleet model forecast, backtest and base series derivation
//! - `sensitivity` - Monte Carlo bands and determinism
//! - `config` - Config defaults and serialization

mod config;
mod scenario;
