//! Chain command implementation
//!
//! Implied volatility across every strike of a single-expiry chain.

use std::path::PathBuf;

use clap::Args;
use pricer_models::calibration::{
    CalibrationMethod, ImpliedVolCalibrator, ImpliedVolatility, MarketObservation,
};
use rayon::prelude::*;
use tracing::{info, warn};

use super::MaturityArgs;
use crate::config::BsvolConfig;
use crate::input::{load_chain, ChainRow};
use crate::output::{Cell, Report};
use crate::Result;

/// Arguments of `bsvol chain`.
#[derive(Debug, Clone, Args)]
pub struct ChainArgs {
    /// Chain CSV with columns strike,call,put
    #[arg(long, value_name = "FILE")]
    pub chain: PathBuf,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    #[command(flatten)]
    pub maturity: MaturityArgs,

    /// Initial volatility guess for every strike
    #[arg(long, alias = "sigma")]
    pub seed: f64,

    /// Root-finding method (step-search, bracketing); overrides the config
    #[arg(long)]
    pub method: Option<CalibrationMethod>,
}

/// Run the chain command
pub fn run(args: &ChainArgs, config: &BsvolConfig) -> Result<Report> {
    let rows = load_chain(&args.chain)?;
    let expiry = args.maturity.years()?;
    calibrate_rows(&rows, args.spot, expiry, args.seed, args.method, config)
}

/// Calibrate every row in parallel and tabulate the result in row order.
pub fn calibrate_rows(
    rows: &[ChainRow],
    spot: f64,
    expiry: f64,
    seed: f64,
    method: Option<CalibrationMethod>,
    config: &BsvolConfig,
) -> Result<Report> {
    let calibrator = ImpliedVolCalibrator::new(config.calibration.to_config(method));
    let rate = config.risk_free_rate;

    let vols = rows
        .par_iter()
        .map(|row| {
            let mut observation = MarketObservation::new(spot, row.strike, expiry, rate, seed);
            if let Some(call) = row.call {
                observation = observation.with_call(call);
            }
            if let Some(put) = row.put {
                observation = observation.with_put(put);
            }
            calibrator.calibrate(&observation)
        })
        .collect::<std::result::Result<Vec<ImpliedVolatility>, _>>()?;

    let mut report = Report::new(&["strike", "call", "call_iv", "put", "put_iv"])
        .with_title(format!("Implied volatility (T = {:.4})", expiry));
    let mut missed = Vec::new();
    for (row, vol) in rows.iter().zip(&vols) {
        report.push_row(vec![
            Cell::num(row.strike, 2),
            Cell::opt(row.call, 4),
            Cell::opt(vol.call, 4),
            Cell::opt(row.put, 4),
            Cell::opt(vol.put, 4),
        ]);
        if row.call.is_some() && vol.call.is_none() {
            missed.push(format!("call {}", row.strike));
        }
        if row.put.is_some() && vol.put.is_none() {
            missed.push(format!("put {}", row.strike));
        }
    }

    if !missed.is_empty() {
        warn!(count = missed.len(), "Some legs did not converge");
        report.add_note(format!("did not converge: {}", missed.join(", ")));
    }
    info!(
        strikes = rows.len(),
        unconverged = missed.len(),
        method = %calibrator.config().method(),
        "Chain calibrated"
    );
    Ok(report)
}
