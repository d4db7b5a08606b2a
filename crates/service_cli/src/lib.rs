//! # bsvol
//!
//! Command-line front end for Black-Scholes pricing and implied volatility.
//!
//! Every subcommand is a `run` function in [`commands`] that takes its parsed
//! arguments and the merged [`config::BsvolConfig`] and returns an
//! [`output::Report`]; the binary only parses flags, sets up logging and
//! prints the rendered report.
//!
//! ## Example
//!
//! ```
//! use service_cli::commands::price::{self, PriceArgs};
//! use service_cli::commands::MaturityArgs;
//! use service_cli::config::BsvolConfig;
//! use service_cli::output::OutputFormat;
//!
//! let args = PriceArgs {
//!     spot: 100.0,
//!     strike: 100.0,
//!     maturity: MaturityArgs {
//!         expiry: Some(1.0),
//!         ..Default::default()
//!     },
//!     sigma: 0.2,
//! };
//! let config = BsvolConfig {
//!     risk_free_rate: 0.05,
//!     ..Default::default()
//! };
//! let report = price::run(&args, &config).unwrap();
//! let csv = report.render(OutputFormat::Csv).unwrap();
//! assert!(csv.ends_with("10.4506,5.5735\n"));
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, Result};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
