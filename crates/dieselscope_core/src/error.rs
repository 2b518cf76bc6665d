use std::fmt;

/// Errors raised while constructing or querying a series.
///
/// All of these describe invalid input; the scenario transform itself has no
/// failure path once a `BaseSeries` exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    EmptySeries,
    LengthMismatch {
        years: usize,
        values: usize,
    },
    NonIncreasingYears {
        index: usize,
        previous: i32,
        year: i32,
    },
    NonFiniteValue {
        index: usize,
    },
    NegativeValue {
        index: usize,
        value: f64,
    },
    /// The upper clamp (`first value * 1.2`) would sit below the 0.1 floor
    CapBelowFloor {
        first_value: f64,
    },
    YearNotInSeries(i32),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptySeries => write!(f, "invalid input: base series is empty"),
            ModelError::LengthMismatch { years, values } => write!(
                f,
                "invalid input: {years} years but {values} consumption values"
            ),
            ModelError::NonIncreasingYears {
                index,
                previous,
                year,
            } => write!(
                f,
                "invalid input: year {year} at index {index} does not follow {previous}"
            ),
            ModelError::NonFiniteValue { index } => {
                write!(f, "invalid input: consumption at index {index} is not finite")
            }
            ModelError::NegativeValue { index, value } => {
                write!(f, "invalid input: consumption at index {index} is negative ({value})")
            }
            ModelError::CapBelowFloor { first_value } => write!(
                f,
                "invalid input: base value {first_value} gives an upper bound below the floor"
            ),
            ModelError::YearNotInSeries(year) => write!(f, "year {year} is not in the series"),
        }
    }
}

impl std::error::Error for ModelError {}

/// Errors from the cohort fleet model
#[derive(Debug, Clone, PartialEq)]
pub enum FleetError {
    MissingSalesData,
    InvalidYearRange { start: i32, end: i32 },
    Model(ModelError),
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::MissingSalesData => write!(f, "car sales data required"),
            FleetError::InvalidYearRange { start, end } => {
                write!(f, "invalid year range {start}..={end}")
            }
            FleetError::Model(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FleetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetError::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for FleetError {
    fn from(e: ModelError) -> Self {
        FleetError::Model(e)
    }
}

/// Errors from Monte Carlo sensitivity runs
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    InvalidDistribution {
        parameter: &'static str,
        reason: &'static str,
    },
    NoIterations,
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::InvalidDistribution { parameter, reason } => {
                write!(f, "invalid distribution for {parameter}: {reason}")
            }
            SamplingError::NoIterations => write!(f, "sensitivity run needs at least one iteration"),
        }
    }
}

impl std::error::Error for SamplingError {}

pub type Result<T> = std::result::Result<T, ModelError>;
