//! Rate command implementation
//!
//! Reads the risk-free rate from a saved quote page.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::BsvolConfig;
use crate::input::load_quote_rate;
use crate::output::{Cell, Report};
use crate::Result;

/// Arguments of `bsvol rate`.
#[derive(Debug, Clone, Args)]
pub struct RateArgs {
    /// Saved quote page, or a text file holding a percentage such as 4.52%
    #[arg(long, value_name = "FILE")]
    pub quote: PathBuf,
}

/// Run the rate command
pub fn run(args: &RateArgs, config: &BsvolConfig) -> Result<Report> {
    let rate = load_quote_rate(&args.quote)?;
    info!(rate, path = %args.quote.display(), "Rate extracted");

    let mut report = Report::new(&["rate", "configured"]).with_title("Risk-free rate");
    report.push_row(vec![Cell::num(rate, 6), Cell::num(config.risk_free_rate, 6)]);
    report.add_note(format!("use --rate {} or set BSVOL_RISK_FREE_RATE to apply it", rate));
    Ok(report)
}
