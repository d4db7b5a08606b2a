//! Error and time types shared across the workspace.
//!
//! - `error`: structured errors for pricing inputs and solvers
//! - `time`: Act/365 year fractions for maturities
//!
//! # Re-exports
//!
//! - [`PricingError`], [`SolverError`] from `error`
//! - [`time_to_maturity`], [`days_to_years`] from `time`

pub mod error;
pub mod time;

pub use error::{PricingError, SolverError};
pub use time::{days_to_years, time_to_maturity, DAYS_PER_YEAR};
