//! Plain-text renderers for command output
//!
//! Each renderer returns a `String` so callers decide where it goes
//! (stdout for commands, the explorer's writer for `show`).

use std::fmt::Write;

use dieselscope_core::fleet::{BacktestRow, DataSummary, ForecastReport, SeriesSummary};
use dieselscope_core::scenario::ScenarioFactors;
use dieselscope_core::sensitivity::SensitivityResult;
use dieselscope_core::{AdjustedSeries, AdjustmentParams, BaseSeries, KeyYearReadout};

use crate::util::format::{
    format_billions, format_change, format_param, format_percent, format_signed_percent,
    format_thousands,
};

pub fn render_params(params: &AdjustmentParams) -> String {
    format!(
        "Sales decline {}  |  Mileage change {}  |  Survival boost {}",
        format_param(params.sales_decline),
        format_param(params.mileage_change),
        format_param(params.survival_boost)
    )
}

/// Year, base and adjusted values side by side
pub fn render_scenario(base: &BaseSeries, adjusted: &AdjustedSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} {:>10} {:>10}", "Year", "Base", "Scenario");
    for ((year, base_value), adjusted_value) in base.iter().zip(&adjusted.values) {
        let _ = writeln!(
            out,
            "{:>6} {:>10} {:>10}",
            year,
            format_billions(base_value),
            format_billions(*adjusted_value)
        );
    }
    out
}

pub fn render_factors(rows: &[ScenarioFactors]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>4} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "Year", "n", "Sales", "Mileage", "Surv.", "Raw", "Adjusted"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>6} {:>4} {:>8.4} {:>8.4} {:>8.4} {:>10.3} {:>10.3}",
            row.year,
            row.years_from_base,
            row.sales,
            row.mileage,
            row.survival,
            row.raw,
            row.adjusted
        );
    }
    out
}

/// The key-year lines shown under the scenario
pub fn render_readout(readout: &KeyYearReadout) -> String {
    let mut out = String::new();
    for entry in &readout.entries {
        let _ = writeln!(
            out,
            "{}: {}B litres ({} vs base year)",
            entry.year,
            format_billions(entry.value),
            format_change(entry.change_from_base)
        );
    }
    out
}

pub fn render_backtest(rows: &[BacktestRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>8} {:>8} {:>10} {:>8} {:>8}",
        "Year", "Cars", "Vans", "Predicted", "Actual", "Error"
    );
    for row in rows {
        let actual = row
            .actual_billions
            .map(format_billions)
            .unwrap_or_else(|| "-".to_string());
        let error = row
            .error_pct
            .map(format_signed_percent)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>6} {:>8} {:>8} {:>10} {:>8} {:>8}",
            row.year,
            format_billions(row.car_litres_billions),
            format_billions(row.van_litres_billions),
            format_billions(row.predicted_billions),
            actual,
            error
        );
    }

    let errors: Vec<f64> = rows.iter().filter_map(|r| r.error_pct).collect();
    if !errors.is_empty() {
        let mean_abs = errors.iter().map(|e| e.abs()).sum::<f64>() / errors.len() as f64;
        let _ = writeln!(out, "Mean absolute error: {}", format_percent(mean_abs));
    }
    out
}

pub fn render_forecast(report: &ForecastReport, key_years: &[i32]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "Year", "Fleet (M)", "Miles (B)", "Litres", "Declining", "vs 2024"
    );
    for row in &report.rows {
        let change = row
            .change_from_reference
            .map(format_change)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>6} {:>10.2} {:>10.1} {:>10} {:>10} {:>8}",
            row.year,
            row.fleet_size_millions,
            row.total_miles_billions,
            format_billions(row.car_litres_billions),
            format_billions(row.declining_mileage_litres_billions),
            change
        );
    }

    for row in report.key_rows(key_years) {
        let _ = write!(
            out,
            "\n{}: {:.2} M cars, {}B litres",
            row.year,
            row.fleet_size_millions,
            format_billions(row.car_litres_billions)
        );
        if let Some(change) = row.change_from_reference {
            let _ = write!(out, " ({} vs 2024)", format_change(change));
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn sales_line(out: &mut String, label: &str, summary: Option<&SeriesSummary>) {
    match summary {
        Some(s) => {
            let _ = writeln!(
                out,
                "{:<18} {}-{}  latest {}  peak {} ({})",
                label,
                s.first_year,
                s.last_year,
                format_thousands(s.latest),
                format_thousands(s.peak),
                s.peak_year
            );
        }
        None => {
            let _ = writeln!(out, "{:<18} no data", label);
        }
    }
}

pub fn render_summary(summary: &DataSummary) -> String {
    let mut out = String::new();
    sales_line(&mut out, "Car sales", summary.car_sales.as_ref());
    match &summary.car_diesel_share {
        Some(s) => {
            let _ = writeln!(
                out,
                "{:<18} {}-{}  latest {}  peak {} ({})",
                "Diesel share",
                s.first_year,
                s.last_year,
                format_percent(s.latest),
                format_percent(s.peak),
                s.peak_year
            );
        }
        None => {
            let _ = writeln!(out, "{:<18} no data", "Diesel share");
        }
    }
    sales_line(&mut out, "Van sales", summary.van_sales.as_ref());
    match &summary.fleet_size {
        Some(s) => {
            let _ = writeln!(
                out,
                "{:<18} {}-{}  latest {:.2} M",
                "Diesel car fleet",
                s.first_year,
                s.last_year,
                s.latest
            );
        }
        None => {
            let _ = writeln!(out, "{:<18} no data", "Diesel car fleet");
        }
    }
    match &summary.road_diesel {
        Some(s) => {
            let _ = writeln!(
                out,
                "{:<18} {}-{}  latest {}B  peak {}B ({})",
                "Road diesel",
                s.first_year,
                s.last_year,
                format_billions(s.latest),
                format_billions(s.peak),
                s.peak_year
            );
        }
        None => {
            let _ = writeln!(out, "{:<18} no data", "Road diesel");
        }
    }
    out
}

pub fn render_sensitivity(result: &SensitivityResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} iterations", result.iterations);

    let Some(first) = result.bands.first() else {
        return out;
    };

    let _ = write!(out, "{:>6} {:>8}", "Year", "Mean");
    for (p, _) in &first.percentiles {
        let _ = write!(out, " {:>8}", format!("P{}", (p * 100.0).round()));
    }
    out.push('\n');

    for band in &result.bands {
        let _ = write!(out, "{:>6} {:>8}", band.year, format_billions(band.mean));
        for (_, value) in &band.percentiles {
            let _ = write!(out, " {:>8}", format_billions(*value));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dieselscope_core::{adjust, data};

    #[test]
    fn test_scenario_table_has_row_per_year() {
        let base = data::base_series();
        let adjusted = adjust(&base, &AdjustmentParams::NEUTRAL);
        let table = render_scenario(&base, &adjusted);

        assert_eq!(table.lines().count(), base.len() + 1);
        assert!(table.contains("  2030       4.23       4.23"));
    }

    #[test]
    fn test_readout_lines() {
        let base = data::base_series();
        let adjusted = adjust(&base, &AdjustmentParams::NEUTRAL);
        let text = render_readout(&KeyYearReadout::standard(&adjusted));

        assert!(text.contains("2030: 4.23B litres (-40% vs base year)"));
        assert!(text.contains("2035: 2.31B litres (-67% vs base year)"));
    }

    #[test]
    fn test_params_line() {
        let line = render_params(&AdjustmentParams::new(20, -2, 0));
        assert_eq!(
            line,
            "Sales decline +20%  |  Mileage change -2%  |  Survival boost +0%"
        );
    }

    #[test]
    fn test_backtest_errors_are_signed() {
        let row = |year, error_pct| BacktestRow {
            year,
            car_litres_billions: 10.0,
            van_litres_billions: 5.0,
            predicted_billions: 15.0,
            actual_billions: Some(27.0),
            error_pct: Some(error_pct),
        };
        let text = render_backtest(&[row(2019, 1.2), row(2020, -2.6)]);

        assert!(text.contains("+1.2%"));
        assert!(text.contains("-2.6%"));
        assert!(text.contains("Mean absolute error: 1.9%"));
    }

    #[test]
    fn test_backtest_missing_actual() {
        let rows = [BacktestRow {
            year: 2019,
            car_litres_billions: 10.0,
            van_litres_billions: 5.0,
            predicted_billions: 15.0,
            actual_billions: None,
            error_pct: None,
        }];
        let text = render_backtest(&rows);
        assert!(text.contains("-"));
        assert!(!text.contains("Mean absolute error"));
    }
}
