//! Scenario explorer state
//!
//! `ExplorerState` is the one place the explorer's mutable state lives: the
//! slider positions, their ranges, the base series and the output buffer.
//! The driver owns it and passes it by `&mut` to whatever renders it. Every
//! slider change recomputes the whole buffer from scratch.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use dieselscope_core::model::READOUT_YEARS;
use dieselscope_core::scenario::adjust_into;
use dieselscope_core::{
    AdjustedSeries, AdjustmentParams, BaseSeries, KeyYearReadout, ModelConfig, ParamRange,
    SliderBounds,
};

use crate::report;

/// One of the three explorer inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    SalesDecline,
    MileageChange,
    SurvivalBoost,
}

impl Slider {
    pub fn label(&self) -> &'static str {
        match self {
            Slider::SalesDecline => "Sales decline",
            Slider::MileageChange => "Mileage change",
            Slider::SurvivalBoost => "Survival boost",
        }
    }

    fn range(&self, bounds: &SliderBounds) -> ParamRange {
        match self {
            Slider::SalesDecline => bounds.sales_decline,
            Slider::MileageChange => bounds.mileage_change,
            Slider::SurvivalBoost => bounds.survival_boost,
        }
    }

    fn field<'a>(&self, params: &'a mut AdjustmentParams) -> &'a mut i32 {
        match self {
            Slider::SalesDecline => &mut params.sales_decline,
            Slider::MileageChange => &mut params.mileage_change,
            Slider::SurvivalBoost => &mut params.survival_boost,
        }
    }

    fn value(&self, params: &AdjustmentParams) -> i32 {
        match self {
            Slider::SalesDecline => params.sales_decline,
            Slider::MileageChange => params.mileage_change,
            Slider::SurvivalBoost => params.survival_boost,
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Slider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sales" | "sales-decline" | "s" => Ok(Slider::SalesDecline),
            "mileage" | "mileage-change" | "m" => Ok(Slider::MileageChange),
            "survival" | "survival-boost" | "v" => Ok(Slider::SurvivalBoost),
            other => Err(format!("unknown slider '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplorerState {
    base: BaseSeries,
    bounds: SliderBounds,
    params: AdjustmentParams,
    readout_years: Vec<i32>,
    adjusted: Vec<f64>,
}

impl ExplorerState {
    /// Start with every slider at its default position
    pub fn new(base: BaseSeries, bounds: SliderBounds) -> Self {
        let mut state = Self {
            params: bounds.defaults(),
            adjusted: Vec::with_capacity(base.len()),
            readout_years: READOUT_YEARS.to_vec(),
            base,
            bounds,
        };
        state.recompute();
        state
    }

    /// Start from a config's base series, sliders and starting parameters
    pub fn from_config(config: &ModelConfig) -> Self {
        let mut state = Self::new(config.base_series.clone(), config.sliders);
        state.readout_years = config.readout_years.clone();
        state.set_params(config.params);
        state
    }

    /// Move a slider; the value is clamped into its range.
    ///
    /// Returns the value actually applied.
    pub fn set(&mut self, slider: Slider, value: i32) -> i32 {
        let applied = slider.range(&self.bounds).clamp(value);
        *slider.field(&mut self.params) = applied;
        self.recompute();
        applied
    }

    pub fn set_sales_decline(&mut self, value: i32) -> i32 {
        self.set(Slider::SalesDecline, value)
    }

    pub fn set_mileage_change(&mut self, value: i32) -> i32 {
        self.set(Slider::MileageChange, value)
    }

    pub fn set_survival_boost(&mut self, value: i32) -> i32 {
        self.set(Slider::SurvivalBoost, value)
    }

    /// Set all three sliders at once, clamping each
    pub fn set_params(&mut self, params: AdjustmentParams) {
        self.params = self.bounds.clamp(params);
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.params = self.bounds.defaults();
        self.recompute();
    }

    fn recompute(&mut self) {
        adjust_into(&self.base, &self.params, &mut self.adjusted);
        tracing::debug!(
            sales_decline = self.params.sales_decline,
            mileage_change = self.params.mileage_change,
            survival_boost = self.params.survival_boost,
            "Recomputed scenario"
        );
    }

    pub fn base(&self) -> &BaseSeries {
        &self.base
    }

    pub fn bounds(&self) -> &SliderBounds {
        &self.bounds
    }

    pub fn params(&self) -> AdjustmentParams {
        self.params
    }

    pub fn slider_value(&self, slider: Slider) -> i32 {
        slider.value(&self.params)
    }

    pub fn slider_range(&self, slider: Slider) -> ParamRange {
        slider.range(&self.bounds)
    }

    /// Current output buffer, aligned with `base().years()`
    pub fn adjusted(&self) -> &[f64] {
        &self.adjusted
    }

    pub fn series(&self) -> AdjustedSeries {
        AdjustedSeries {
            years: self.base.years().to_vec(),
            values: self.adjusted.clone(),
        }
    }

    pub fn readout(&self) -> KeyYearReadout {
        KeyYearReadout::from_series(&self.series(), &self.readout_years)
    }
}

/// One line of explorer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerCommand {
    Set(Slider, i32),
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for ExplorerCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".to_string());
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "reset" => ExplorerCommand::Reset,
            "show" => ExplorerCommand::Show,
            "help" | "?" => ExplorerCommand::Help,
            "quit" | "exit" | "q" => ExplorerCommand::Quit,
            _ => {
                let slider: Slider = head.parse()?;
                let value = words
                    .next()
                    .ok_or_else(|| format!("{} needs a value", slider.label()))?;
                let value = value
                    .trim_end_matches('%')
                    .parse::<i32>()
                    .map_err(|_| format!("'{value}' is not a whole percentage"))?;
                ExplorerCommand::Set(slider, value)
            }
        };

        if let Some(extra) = words.next() {
            return Err(format!("unexpected '{extra}'"));
        }
        Ok(command)
    }
}

const HELP: &str = "\
Commands:
  sales <n>      sales decline, % per year
  mileage <n>    mileage change, % per year
  survival <n>   survival boost, %
  reset          restore the default sliders
  show           print the full scenario table
  quit           leave the explorer
";

fn write_status<W: Write>(state: &ExplorerState, output: &mut W) -> io::Result<()> {
    writeln!(output, "{}", report::render_params(&state.params()))?;
    write!(output, "{}", report::render_readout(&state.readout()))
}

/// Read commands from `input` until `quit` or end of input.
///
/// Bad lines get an error message and the loop carries on.
pub fn run_explorer<R: BufRead, W: Write>(
    state: &mut ExplorerState,
    mut input: R,
    output: &mut W,
) -> io::Result<()> {
    write_status(state, output)?;
    writeln!(output, "Type 'help' for commands.")?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and fail to parse like any typo
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match line.parse::<ExplorerCommand>() {
            Ok(ExplorerCommand::Set(slider, value)) => {
                let applied = state.set(slider, value);
                if applied != value {
                    let range = state.slider_range(slider);
                    writeln!(
                        output,
                        "{} limited to {}..={}",
                        slider, range.min, range.max
                    )?;
                }
                write_status(state, output)?;
            }
            Ok(ExplorerCommand::Reset) => {
                state.reset();
                write_status(state, output)?;
            }
            Ok(ExplorerCommand::Show) => {
                write!(
                    output,
                    "{}",
                    report::render_scenario(state.base(), &state.series())
                )?;
            }
            Ok(ExplorerCommand::Help) => write!(output, "{HELP}")?,
            Ok(ExplorerCommand::Quit) => break,
            Err(msg) => {
                tracing::debug!(line = %line, "Rejected explorer input");
                writeln!(output, "error: {msg}")?;
            }
        }
    }

    tracing::info!(params = ?state.params(), "Explorer closed");
    Ok(())
}
