//! Volatility estimators from market history.
//!
//! - [`HistoricalEstimator`]: close-to-close estimators over daily closes
//! - [`EstimatorError`]: insufficient or invalid price data

mod error;
mod historical;

pub use error::EstimatorError;
pub use historical::{
    HistoricalEstimator, HistoricalVolatility, ParseEstimatorError, TRADING_DAYS_PER_YEAR,
};
