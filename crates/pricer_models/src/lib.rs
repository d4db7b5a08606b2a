//! # Pricer Models
//!
//! Black-Scholes pricing of European options and its inversion.
//!
//! This crate provides:
//! - Contract parameters and option kinds (`instruments`)
//! - The closed-form Black-Scholes pricer and the standard normal CDF (`analytical`)
//! - Implied volatility calibration from observed prices (`calibration`)
//! - Historical volatility estimators from closing prices (`estimators`)
//!
//! ## Quick start
//!
//! ```
//! use pricer_models::analytical::{price_call, price_put};
//! use pricer_models::calibration::implied_volatility;
//!
//! let call = price_call(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let put = price_put(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! assert!((call - 10.4506).abs() < 1e-3);
//! assert!((put - 5.5735).abs() < 1e-3);
//!
//! let (call_vol, _) = implied_volatility(call, 0.0, 100.0, 100.0, 1.0, 0.05, 0.25).unwrap();
//! assert!((call_vol.unwrap() - 0.2).abs() < 0.01);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod calibration;
pub mod estimators;
pub mod instruments;
