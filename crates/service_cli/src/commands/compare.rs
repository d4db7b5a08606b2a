//! Compare command implementation
//!
//! Market prices of one strike across expiries against Black-Scholes values
//! at a fixed volatility.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use pricer_core::types::time_to_maturity;
use pricer_models::instruments::{ContractParameters, OptionKind};
use tracing::{debug, info};

use super::valuation_date;
use crate::config::BsvolConfig;
use crate::input::{load_term_chain, TermRow};
use crate::output::{Cell, Report};
use crate::{CliError, Result};

/// Arguments of `bsvol compare`.
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Chain CSV with columns expiry,strike,call,put
    #[arg(long, value_name = "FILE")]
    pub chain: PathBuf,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike to compare
    #[arg(long)]
    pub strike: f64,

    /// Volatility used for the model prices
    #[arg(long)]
    pub sigma: f64,

    /// Valuation date (YYYY-MM-DD, default: today)
    #[arg(long, value_name = "DATE")]
    pub valuation_date: Option<NaiveDate>,
}

/// Run the compare command
pub fn run(args: &CompareArgs, config: &BsvolConfig) -> Result<Report> {
    let rows = load_term_chain(&args.chain)?;
    compare_rows(
        &rows,
        args.spot,
        args.strike,
        args.sigma,
        valuation_date(args.valuation_date),
        config,
    )
}

/// Tabulate rows at `strike` quoted on both legs, ordered by expiry.
///
/// Expiries on or before `valuation` are skipped.
pub fn compare_rows(
    rows: &[TermRow],
    spot: f64,
    strike: f64,
    sigma: f64,
    valuation: NaiveDate,
    config: &BsvolConfig,
) -> Result<Report> {
    let mut selected: Vec<(NaiveDate, f64, f64, f64)> = Vec::new();
    for row in rows.iter().filter(|row| row.strike == strike) {
        let (Some(call), Some(put)) = (row.call, row.put) else {
            debug!(expiry = %row.expiry, "Skipping expiry without both quotes");
            continue;
        };
        let expiry = time_to_maturity(valuation, row.expiry);
        if expiry <= 0.0 {
            debug!(expiry = %row.expiry, %valuation, "Skipping expired row");
            continue;
        }
        selected.push((row.expiry, expiry, call, put));
    }
    if selected.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "no live expiry with call and put quotes at strike {}",
            strike
        )));
    }
    selected.sort_by_key(|entry| entry.0);

    let mut report = Report::new(&["expiry", "T", "market_call", "bs_call", "market_put", "bs_put"])
        .with_title(format!("Market vs Black-Scholes (K = {}, sigma = {})", strike, sigma));
    for (date, expiry, call, put) in &selected {
        let params = ContractParameters::new(spot, strike, *expiry, config.risk_free_rate, sigma)?;
        report.push_row(vec![
            Cell::text(date.to_string()),
            Cell::num(*expiry, 4),
            Cell::num(*call, 4),
            Cell::num(params.price(OptionKind::Call), 4),
            Cell::num(*put, 4),
            Cell::num(params.price(OptionKind::Put), 4),
        ]);
    }
    info!(expiries = selected.len(), strike, sigma, "Compared");
    Ok(report)
}
