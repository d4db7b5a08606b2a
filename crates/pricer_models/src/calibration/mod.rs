//! Implied volatility calibration.
//!
//! Recovers the volatility that makes the Black-Scholes price match an
//! observed option price, independently for the call and the put.
//!
//! - [`ImpliedVolCalibrator`]: configurable calibrator over [`MarketObservation`]s
//! - [`implied_volatility`]: positional entry point with default settings
//! - [`CalibrationConfig`] / [`CalibrationMethod`]: step search or bracketing
//!
//! Failure to converge is reported as `None`, never as an error; invalid
//! inputs are reported as [`AnalyticalError`](crate::analytical::AnalyticalError).
//!
//! # Example
//!
//! ```
//! use pricer_models::analytical::price_call;
//! use pricer_models::calibration::{
//!     CalibrationConfig, CalibrationMethod, ImpliedVolCalibrator, MarketObservation,
//! };
//!
//! let call = price_call(100.0, 105.0, 0.5, 0.02, 0.3).unwrap();
//! let obs = MarketObservation::new(100.0, 105.0, 0.5, 0.02, 0.25).with_call(call);
//!
//! let calibrator = ImpliedVolCalibrator::new(
//!     CalibrationConfig::default().with_method(CalibrationMethod::Bracketing),
//! );
//! assert_eq!(calibrator.calibrate(&obs).unwrap().call, Some(0.3));
//! ```

mod config;
mod implied_vol;

pub use config::{
    CalibrationConfig, CalibrationMethod, ParseCalibrationMethodError, DEFAULT_BRACKET,
    DEFAULT_BRACKETING_TOLERANCE, DEFAULT_DECIMALS, DEFAULT_MAX_ITERATIONS, DEFAULT_STEP_FRACTION,
    DEFAULT_TOLERANCE,
};
pub use implied_vol::{
    implied_volatility, ImpliedVolCalibrator, ImpliedVolatility, MarketObservation,
};
