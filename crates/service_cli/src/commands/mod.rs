//! CLI command implementations
//!
//! Each submodule implements one `bsvol` subcommand and returns a
//! [`Report`](crate::output::Report) for the caller to render.

pub mod chain;
pub mod check;
pub mod compare;
pub mod implied;
pub mod price;
pub mod rate;
pub mod sweep;
pub mod vol;

use chrono::NaiveDate;
use clap::Args;
use pricer_core::types::{days_to_years, time_to_maturity};

use crate::{CliError, Result};

/// Time to maturity, given in years, in days, or as a date.
#[derive(Debug, Clone, Default, Args)]
pub struct MaturityArgs {
    /// Time to maturity in years
    #[arg(long, conflicts_with_all = ["days", "maturity_date"])]
    pub expiry: Option<f64>,

    /// Days to maturity (Act/365)
    #[arg(long, conflicts_with = "maturity_date")]
    pub days: Option<i64>,

    /// Maturity date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub maturity_date: Option<NaiveDate>,

    /// Valuation date for --maturity-date (YYYY-MM-DD, default: today)
    #[arg(long, value_name = "DATE")]
    pub valuation_date: Option<NaiveDate>,
}

impl MaturityArgs {
    /// Time to maturity in years.
    ///
    /// The value is not range-checked here; the pricer rejects `T <= 0`.
    pub fn years(&self) -> Result<f64> {
        match (self.expiry, self.days, self.maturity_date) {
            (Some(expiry), None, None) => Ok(expiry),
            (None, Some(days), None) => Ok(days_to_years(days)),
            (None, None, Some(maturity)) => {
                Ok(time_to_maturity(valuation_date(self.valuation_date), maturity))
            }
            (None, None, None) => Err(CliError::InvalidArgument(
                "one of --expiry, --days or --maturity-date is required".to_string(),
            )),
            _ => Err(CliError::InvalidArgument(
                "--expiry, --days and --maturity-date are mutually exclusive".to_string(),
            )),
        }
    }
}

/// The given valuation date, or today's local date.
pub fn valuation_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}
