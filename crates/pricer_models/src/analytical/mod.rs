//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - [`BlackScholes`]: closed-form call and put prices under lognormal dynamics
//! - [`norm_cdf`]: the standard normal CDF used by the formula
//! - [`volatility_sweep`] and [`maturity_sweep`]: prices along a grid
//!
//! All inputs are validated; out-of-domain parameters return
//! [`AnalyticalError`] rather than NaN.

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod sweep;

pub use black_scholes::{price_call, price_put, BlackScholes};
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
pub use sweep::{maturity_sweep, volatility_sweep, Grid, SweepPoint};
