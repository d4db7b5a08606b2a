//! Price command implementation
//!
//! Black-Scholes call and put values for one contract.

use clap::Args;
use pricer_models::instruments::{ContractParameters, OptionKind};
use tracing::info;

use super::MaturityArgs;
use crate::config::BsvolConfig;
use crate::output::{Cell, Report};
use crate::Result;

/// Arguments of `bsvol price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    #[command(flatten)]
    pub maturity: MaturityArgs,

    /// Volatility as a decimal, e.g. 0.2
    #[arg(long)]
    pub sigma: f64,
}

/// Run the price command
pub fn run(args: &PriceArgs, config: &BsvolConfig) -> Result<Report> {
    let expiry = args.maturity.years()?;
    let params = ContractParameters::new(
        args.spot,
        args.strike,
        expiry,
        config.risk_free_rate,
        args.sigma,
    )?;
    let call = params.price(OptionKind::Call);
    let put = params.price(OptionKind::Put);
    info!(spot = args.spot, strike = args.strike, expiry, sigma = args.sigma, call, put, "Priced");

    let mut report = Report::new(&["spot", "strike", "expiry", "rate", "sigma", "call", "put"])
        .with_title("Black-Scholes prices");
    report.push_row(vec![
        Cell::num(args.spot, 2),
        Cell::num(args.strike, 2),
        Cell::num(expiry, 4),
        Cell::num(config.risk_free_rate, 4),
        Cell::num(args.sigma, 4),
        Cell::num(call, 4),
        Cell::num(put, 4),
    ]);
    Ok(report)
}
