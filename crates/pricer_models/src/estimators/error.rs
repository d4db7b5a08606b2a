//! Error types for volatility estimation.

use thiserror::Error;

/// Historical volatility estimation errors.
///
/// # Examples
/// ```
/// use pricer_models::estimators::EstimatorError;
///
/// let err = EstimatorError::InsufficientData { got: 1, need: 3 };
/// assert_eq!(format!("{}", err), "Insufficient data: got 1 closes, need at least 3");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimatorError {
    /// Too few closing prices for a sample standard deviation.
    #[error("Insufficient data: got {got} closes, need at least {need}")]
    InsufficientData {
        /// Number of closes supplied
        got: usize,
        /// Minimum number of closes
        need: usize,
    },

    /// A close that is zero, negative or not finite.
    #[error("Invalid close at index {index}: {value}")]
    InvalidPrice {
        /// Position in the series
        index: usize,
        /// The offending close
        value: f64,
    },

    /// Constant series: the estimate would be zero.
    #[error("Degenerate series: all {count} closes produce zero volatility")]
    DegenerateSeries {
        /// Number of closes supplied
        count: usize,
    },
}
