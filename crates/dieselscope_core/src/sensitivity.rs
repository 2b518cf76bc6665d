//! Monte Carlo sensitivity of the scenario model
//!
//! Draws adjustment parameter triples from independent distributions, runs
//! the scenario model for each, and reports per-year percentile bands.
//! Iterations are split into fixed-size batches, each with its own seeded
//! RNG, so results do not depend on thread scheduling.

use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand_distr::Normal;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::SamplingError;
use crate::model::{AdjustmentParams, BaseSeries, NEUTRAL_SALES_DECLINE};
use crate::scenario::adjust_into;

const MAX_BATCH_SIZE: usize = 100;

/// How one adjustment parameter varies across iterations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParamDistribution {
    Fixed { value: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
}

/// A validated distribution ready to sample
#[derive(Debug, Clone, Copy)]
enum ParamSampler {
    Fixed(i32),
    Normal(Normal<f64>),
    Uniform(Uniform<f64>),
}

/// Round to the nearest whole percent; saturates at the i32 range
fn to_percent(value: f64) -> i32 {
    value.round() as i32
}

impl ParamDistribution {
    fn sampler(&self, parameter: &'static str) -> Result<ParamSampler, SamplingError> {
        match *self {
            ParamDistribution::Fixed { value } if value.is_finite() => {
                Ok(ParamSampler::Fixed(to_percent(value)))
            }
            ParamDistribution::Fixed { .. } => Err(SamplingError::InvalidDistribution {
                parameter,
                reason: "fixed value must be finite",
            }),
            ParamDistribution::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .map(ParamSampler::Normal)
                .map_err(|_| SamplingError::InvalidDistribution {
                    parameter,
                    reason: "std_dev must be non-negative",
                }),
            ParamDistribution::Uniform { min, max } => Uniform::new_inclusive(min, max)
                .map(ParamSampler::Uniform)
                .map_err(|_| SamplingError::InvalidDistribution {
                    parameter,
                    reason: "min must not exceed max and both must be finite",
                }),
        }
    }
}

impl ParamSampler {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        match self {
            ParamSampler::Fixed(v) => *v,
            ParamSampler::Normal(d) => to_percent(d.sample(rng)),
            ParamSampler::Uniform(d) => to_percent(d.sample(rng)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    pub iterations: usize,
    pub seed: u64,
    pub sales_decline: ParamDistribution,
    pub mileage_change: ParamDistribution,
    pub survival_boost: ParamDistribution,
    /// Percentiles to report, as fractions in `[0, 1]`
    pub percentiles: Vec<f64>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: 42,
            sales_decline: ParamDistribution::Normal {
                mean: f64::from(NEUTRAL_SALES_DECLINE),
                std_dev: 5.0,
            },
            mileage_change: ParamDistribution::Normal {
                mean: 0.0,
                std_dev: 2.0,
            },
            survival_boost: ParamDistribution::Normal {
                mean: 0.0,
                std_dev: 5.0,
            },
            percentiles: vec![0.05, 0.50, 0.95],
        }
    }
}

/// Percentile band for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBand {
    pub year: i32,
    pub mean: f64,
    /// `(percentile, value)` pairs in the configured order
    pub percentiles: Vec<(f64, f64)>,
}

impl YearBand {
    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(q, _)| (q - p).abs() < 1e-9)
            .map(|(_, v)| *v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub iterations: usize,
    pub bands: Vec<YearBand>,
}

impl SensitivityResult {
    pub fn band(&self, year: i32) -> Option<&YearBand> {
        self.bands.iter().find(|b| b.year == year)
    }
}

#[derive(Debug, Clone, Copy)]
struct Samplers {
    sales_decline: ParamSampler,
    mileage_change: ParamSampler,
    survival_boost: ParamSampler,
}

impl Samplers {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> AdjustmentParams {
        AdjustmentParams {
            sales_decline: self.sales_decline.sample(rng),
            mileage_change: self.mileage_change.sample(rng),
            survival_boost: self.survival_boost.sample(rng),
        }
    }
}

/// Run one batch; returns `batch_size * base.len()` values, row per iteration
fn run_batch(base: &BaseSeries, samplers: &Samplers, seed: u64, batch_size: usize) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut buffer = Vec::with_capacity(base.len());
    let mut rows = Vec::with_capacity(batch_size * base.len());

    for _ in 0..batch_size {
        let params = samplers.sample(&mut rng);
        adjust_into(base, &params, &mut buffer);
        rows.extend_from_slice(&buffer);
    }
    rows
}

/// Nearest-rank percentile of an ascending slice
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

pub fn run_sensitivity(
    base: &BaseSeries,
    config: &SensitivityConfig,
) -> Result<SensitivityResult, SamplingError> {
    if config.iterations == 0 {
        return Err(SamplingError::NoIterations);
    }
    if config
        .percentiles
        .iter()
        .any(|p| !(0.0..=1.0).contains(p))
    {
        return Err(SamplingError::InvalidDistribution {
            parameter: "percentiles",
            reason: "percentiles must lie in [0, 1]",
        });
    }

    let samplers = Samplers {
        sales_decline: config.sales_decline.sampler("sales_decline")?,
        mileage_change: config.mileage_change.sampler("mileage_change")?,
        survival_boost: config.survival_boost.sampler("survival_boost")?,
    };

    let iterations = config.iterations;
    let num_batches = iterations.div_ceil(MAX_BATCH_SIZE);
    let batch = |i: usize| {
        let batch_size = if i == num_batches - 1 {
            iterations - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };
        run_batch(base, &samplers, config.seed.wrapping_add(i as u64), batch_size)
    };

    #[cfg(feature = "parallel")]
    let batches: Vec<Vec<f64>> = (0..num_batches).into_par_iter().map(batch).collect();

    #[cfg(not(feature = "parallel"))]
    let batches: Vec<Vec<f64>> = (0..num_batches).map(batch).collect();

    let width = base.len();
    let mut column = Vec::with_capacity(iterations);
    let bands = base
        .years()
        .iter()
        .enumerate()
        .map(|(i, &year)| {
            column.clear();
            column.extend(batches.iter().flat_map(|rows| rows.iter().skip(i).step_by(width)));
            column.sort_unstable_by(f64::total_cmp);

            let mean = column.iter().sum::<f64>() / column.len() as f64;
            let percentiles = config
                .percentiles
                .iter()
                .map(|&p| (p, nearest_rank(&column, p)))
                .collect();
            YearBand {
                year,
                mean,
                percentiles,
            }
        })
        .collect();

    Ok(SensitivityResult { iterations, bands })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_rank() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(nearest_rank(&sorted, 0.0), 1.0);
        assert_eq!(nearest_rank(&sorted, 0.5), 3.0);
        assert_eq!(nearest_rank(&sorted, 1.0), 5.0);
    }

    #[test]
    fn test_invalid_distributions() {
        let bad_normal = ParamDistribution::Normal {
            mean: 0.0,
            std_dev: -1.0,
        };
        assert!(bad_normal.sampler("x").is_err());

        let bad_uniform = ParamDistribution::Uniform { min: 5.0, max: 1.0 };
        assert!(bad_uniform.sampler("x").is_err());

        let bad_fixed = ParamDistribution::Fixed { value: f64::NAN };
        assert!(bad_fixed.sampler("x").is_err());
    }

    #[test]
    fn test_fixed_rounds_to_percent() {
        let sampler = ParamDistribution::Fixed { value: 14.6 }.sampler("x").unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(sampler.sample(&mut rng), 15);
    }
}
