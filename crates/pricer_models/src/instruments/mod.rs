//! Contract definitions for European options.
//!
//! - [`OptionKind`]: call or put
//! - [`ContractParameters`]: validated spot, strike, expiry, rate and volatility

mod kind;
mod params;

pub use kind::{OptionKind, ParseOptionKindError};
pub use params::ContractParameters;
