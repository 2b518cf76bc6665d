use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use dieselscope::data::{DataDirectory, load_config_file};
use dieselscope::{ExplorerState, init_logging, report, run_explorer};
use dieselscope_core::{
    AdjustmentParams, KeyYearReadout, ModelConfig, adjust, fleet, scenario, sensitivity,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "dieselscope")]
#[command(about = "UK diesel car decline scenarios and fleet projection")]
struct Args {
    /// Path to the data directory (default: ~/.dieselscope/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Config file to use instead of the data directory's config.yaml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply adjustment percentages to the base series
    Scenario {
        /// Sales decline, % per year (neutral 15)
        #[arg(short, long, allow_negative_numbers = true)]
        sales: Option<i32>,

        /// Mileage change, % per year
        #[arg(short, long, allow_negative_numbers = true)]
        mileage: Option<i32>,

        /// Survival boost, %
        #[arg(short = 'v', long, allow_negative_numbers = true)]
        survival: Option<i32>,

        /// Print every compounding factor per year
        #[arg(long)]
        breakdown: bool,

        #[arg(long)]
        json: bool,
    },

    /// Adjust the sliders interactively from stdin
    Explore,

    /// Run the cohort fleet model
    Fleet {
        /// Compare predictions with recorded road diesel
        #[arg(long)]
        backtest: bool,

        /// Project the fleet to this year
        #[arg(long, value_name = "YEAR")]
        forecast: Option<i32>,

        /// Summarize the input data
        #[arg(long)]
        summary: bool,

        #[arg(long)]
        json: bool,
    },

    /// Monte Carlo bands over the adjustment parameters
    Sensitivity {
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Write the built-in config to the data directory
    Init {
        /// Overwrite an existing config.yaml
        #[arg(long)]
        force: bool,
    },
}

/// First and last year of the backtest window
const BACKTEST_YEARS: (i32, i32) = (2015, 2024);
/// Forecast horizon when `fleet` is run without flags
const DEFAULT_FORECAST_YEAR: i32 = 2035;

/// Which fleet reports to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FleetViews {
    summary: bool,
    backtest: bool,
    forecast: Option<i32>,
}

impl FleetViews {
    /// No flag at all means the data summary followed by the default forecast
    fn from_flags(summary: bool, backtest: bool, forecast: Option<i32>) -> Self {
        if !summary && !backtest && forecast.is_none() {
            return Self {
                summary: true,
                backtest: false,
                forecast: Some(DEFAULT_FORECAST_YEAR),
            };
        }
        Self {
            summary,
            backtest,
            forecast,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> color_eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(store: &DataDirectory, path: Option<&PathBuf>) -> color_eyre::Result<ModelConfig> {
    let config = match path {
        Some(path) => load_config_file(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => store.load_config()?,
    };
    Ok(config)
}

#[derive(Serialize)]
struct ScenarioOutput {
    params: AdjustmentParams,
    years: Vec<i32>,
    base: Vec<f64>,
    adjusted: Vec<f64>,
    readout: KeyYearReadout,
}

fn run_scenario(
    config: &ModelConfig,
    params: AdjustmentParams,
    breakdown: bool,
    json: bool,
) -> color_eyre::Result<()> {
    let base = &config.base_series;
    let adjusted = adjust(base, &params);
    let readout = KeyYearReadout::from_series(&adjusted, &config.readout_years);
    tracing::info!(?params, "Scenario evaluated");

    if json {
        return print_json(&ScenarioOutput {
            params,
            years: base.years().to_vec(),
            base: base.consumption().to_vec(),
            adjusted: adjusted.values,
            readout,
        });
    }

    println!("{}\n", report::render_params(&params));
    if breakdown {
        print!("{}", report::render_factors(&scenario::factors(base, &params)));
    } else {
        print!("{}", report::render_scenario(base, &adjusted));
    }
    println!();
    print!("{}", report::render_readout(&readout));
    Ok(())
}

fn run_fleet(config: &ModelConfig, views: FleetViews, json: bool) -> color_eyre::Result<()> {
    let inputs = &config.fleet;

    if views.summary {
        let summary = fleet::summary(inputs);
        if json {
            print_json(&summary)?;
        } else {
            print!("{}", report::render_summary(&summary));
        }
    }

    if views.backtest {
        let (start, end) = BACKTEST_YEARS;
        let rows = fleet::backtest(inputs, start, end)?;
        tracing::info!(rows = rows.len(), "Backtest complete");
        if json {
            print_json(&rows)?;
        } else {
            print!("{}", report::render_backtest(&rows));
        }
    }

    if let Some(target_year) = views.forecast {
        let forecast = fleet::forecast(inputs, target_year)?;
        tracing::info!(target_year, rows = forecast.rows.len(), "Forecast complete");
        if json {
            print_json(&forecast)?;
        } else {
            if views.summary {
                println!();
            }
            print!("{}", report::render_forecast(&forecast, &config.readout_years));
        }
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(DataDirectory::default_path);

    init_logging(&data_dir, &args.log_level)?;
    let store = DataDirectory::new(data_dir);

    match args.command {
        Command::Init { force } => {
            let path = store.init(force)?;
            println!("Wrote {}", path.display());
        }
        Command::Scenario {
            sales,
            mileage,
            survival,
            breakdown,
            json,
        } => {
            let config = load_config(&store, args.config.as_ref())?;
            let defaults = config.params;
            let requested = AdjustmentParams::new(
                sales.unwrap_or(defaults.sales_decline),
                mileage.unwrap_or(defaults.mileage_change),
                survival.unwrap_or(defaults.survival_boost),
            );
            let params = config.sliders.clamp(requested);
            if params != requested {
                tracing::warn!(?requested, ?params, "Parameters clamped to slider ranges");
                eprintln!("Note: parameters limited to slider ranges");
            }
            run_scenario(&config, params, breakdown, json)?;
        }
        Command::Explore => {
            let config = load_config(&store, args.config.as_ref())?;
            let mut state = ExplorerState::from_config(&config);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_explorer(&mut state, stdin.lock(), &mut stdout)?;
            stdout.flush()?;
        }
        Command::Fleet {
            backtest,
            forecast,
            summary,
            json,
        } => {
            let config = load_config(&store, args.config.as_ref())?;
            let views = FleetViews::from_flags(summary, backtest, forecast);
            run_fleet(&config, views, json)?;
        }
        Command::Sensitivity {
            iterations,
            seed,
            json,
        } => {
            let config = load_config(&store, args.config.as_ref())?;
            let mut settings = config.sensitivity.clone();
            if let Some(iterations) = iterations {
                settings.iterations = iterations;
            }
            if let Some(seed) = seed {
                settings.seed = seed;
            }
            let result = sensitivity::run_sensitivity(&config.base_series, &settings)?;
            tracing::info!(iterations = result.iterations, "Sensitivity run complete");
            if json {
                print_json(&result)?;
            } else {
                print!("{}", report::render_sensitivity(&result));
            }
        }
    }

    tracing::info!("dieselscope exiting");
    Ok(())
}
