//! Implied command implementation
//!
//! Implied call and put volatility for one strike.

use clap::Args;
use pricer_models::calibration::{CalibrationMethod, ImpliedVolCalibrator, MarketObservation};
use pricer_models::instruments::OptionKind;
use tracing::info;

use super::MaturityArgs;
use crate::config::BsvolConfig;
use crate::output::{Cell, Report};
use crate::{CliError, Result};

/// Arguments of `bsvol implied`.
#[derive(Debug, Clone, Args)]
pub struct ImpliedArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    #[command(flatten)]
    pub maturity: MaturityArgs,

    /// Observed call price
    #[arg(long)]
    pub call: Option<f64>,

    /// Observed put price
    #[arg(long)]
    pub put: Option<f64>,

    /// Initial volatility guess
    #[arg(long, alias = "sigma")]
    pub seed: f64,

    /// Root-finding method (step-search, bracketing); overrides the config
    #[arg(long)]
    pub method: Option<CalibrationMethod>,
}

/// Run the implied command
pub fn run(args: &ImpliedArgs, config: &BsvolConfig) -> Result<Report> {
    if args.call.is_none() && args.put.is_none() {
        return Err(CliError::InvalidArgument(
            "at least one of --call or --put is required".to_string(),
        ));
    }
    let expiry = args.maturity.years()?;
    let calibrator = ImpliedVolCalibrator::new(config.calibration.to_config(args.method));

    let mut observation =
        MarketObservation::new(args.spot, args.strike, expiry, config.risk_free_rate, args.seed);
    if let Some(call) = args.call {
        observation = observation.with_call(call);
    }
    if let Some(put) = args.put {
        observation = observation.with_put(put);
    }
    let vol = calibrator.calibrate(&observation)?;
    info!(
        strike = args.strike,
        method = %calibrator.config().method(),
        call = ?vol.call,
        put = ?vol.put,
        "Calibrated"
    );

    let mut report = Report::new(&["strike", "expiry", "call", "call_iv", "put", "put_iv"])
        .with_title("Implied volatility");
    report.push_row(vec![
        Cell::num(args.strike, 2),
        Cell::num(expiry, 4),
        Cell::opt(args.call, 4),
        Cell::opt(vol.call, 4),
        Cell::opt(args.put, 4),
        Cell::opt(vol.put, 4),
    ]);
    for kind in OptionKind::ALL {
        match (observation.price(kind), vol.get(kind)) {
            (None, _) => report.add_note(format!("no {} observation", kind)),
            (Some(price), None) => report.add_note(format!(
                "{} implied volatility did not converge for price {}",
                kind, price
            )),
            (Some(_), Some(_)) => {}
        }
    }
    Ok(report)
}
