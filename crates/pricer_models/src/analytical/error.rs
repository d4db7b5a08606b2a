//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: invalid Black-Scholes inputs and numerical failures

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Every variant except `NumericalInstability` is an invalid-parameter error:
/// the caller passed a value outside the domain of the Black-Scholes formula.
/// These are raised before any arithmetic, never retried, and never turned
/// into a NaN result.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// assert!(err.is_invalid_parameter());
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-positive strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive time to maturity.
    #[error("Invalid time to maturity: T = {expiry}")]
    InvalidExpiry {
        /// The invalid time to maturity in years
        expiry: f64,
    },

    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Negative observed option price.
    #[error("Invalid market price: {price}")]
    InvalidMarketPrice {
        /// The invalid observed price
        price: f64,
    },

    /// NaN or infinite input where a finite number is required.
    #[error("Non-finite input: {name} = {value}")]
    NonFiniteInput {
        /// Name of the offending parameter
        name: &'static str,
        /// The offending value
        value: f64,
    },

    /// Unusable evaluation grid (non-finite bound, empty range, non-positive step).
    #[error("Invalid grid: {message}")]
    InvalidGrid {
        /// Description of the grid problem
        message: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl AnalyticalError {
    /// True for errors caused by an out-of-domain input parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(self, AnalyticalError::NumericalInstability { .. })
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        if err.is_invalid_parameter() {
            PricingError::InvalidInput(err.to_string())
        } else {
            PricingError::NumericalInstability(err.to_string())
        }
    }
}
