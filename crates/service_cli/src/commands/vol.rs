//! Vol command implementation
//!
//! Historical volatility and spot from a file of daily closes.

use std::path::PathBuf;

use clap::Args;
use pricer_models::estimators::HistoricalEstimator;
use tracing::info;

use crate::config::BsvolConfig;
use crate::input::{load_history, HistoryRow};
use crate::output::{Cell, Report};
use crate::Result;

/// Arguments of `bsvol vol`.
#[derive(Debug, Clone, Args)]
pub struct VolArgs {
    /// History CSV with columns date,close
    #[arg(long, value_name = "FILE")]
    pub history: PathBuf,

    /// Estimator (log-return, legacy); overrides the config
    #[arg(long)]
    pub estimator: Option<HistoricalEstimator>,
}

/// Run the vol command
pub fn run(args: &VolArgs, config: &BsvolConfig) -> Result<Report> {
    let rows = load_history(&args.history)?;
    summarize_rows(&rows, args.estimator.unwrap_or(config.estimator))
}

/// Estimate from rows ordered oldest first.
pub fn summarize_rows(rows: &[HistoryRow], estimator: HistoricalEstimator) -> Result<Report> {
    let closes: Vec<f64> = rows.iter().map(|row| row.close).collect();
    let summary = estimator.summarize(&closes)?;
    info!(
        estimator = estimator.as_str(),
        observations = summary.observations,
        volatility = summary.volatility,
        "Estimated"
    );

    let mut report = Report::new(&["from", "to", "observations", "spot", "volatility", "estimator"])
        .with_title("Historical volatility");
    let first = rows.first().map(|row| row.date.to_string());
    let last = rows.last().map(|row| row.date.to_string());
    report.push_row(vec![
        first.map_or(Cell::Missing, Cell::text),
        last.map_or(Cell::Missing, Cell::text),
        Cell::num(summary.observations as f64, 0),
        Cell::num(summary.spot, 4),
        Cell::num(summary.volatility, 4),
        Cell::text(estimator.as_str()),
    ]);
    if estimator == HistoricalEstimator::Legacy {
        report.add_note("legacy estimate is the close-price standard deviation / 100, not an annual volatility");
    }
    Ok(report)
}
