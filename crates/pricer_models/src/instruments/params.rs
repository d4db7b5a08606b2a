//! Validated Black-Scholes contract parameters.

use num_traits::Float;

use super::OptionKind;
use crate::analytical::black_scholes::check_contract;
use crate::analytical::{AnalyticalError, BlackScholes};

/// The five inputs of the Black-Scholes formula, checked once on construction.
///
/// `spot`, `strike`, `expiry` and `volatility` are strictly positive and all
/// fields are finite. The rate may be zero or negative.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ContractParameters, OptionKind};
///
/// let params = ContractParameters::new(100.0_f64, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let call = params.price(OptionKind::Call);
/// assert!((call - 10.4506).abs() < 1e-3);
///
/// // Zero expiry is rejected up front
/// assert!(ContractParameters::new(100.0_f64, 100.0, 0.0, 0.05, 0.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractParameters<T: Float> {
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    volatility: T,
}

impl<T: Float> ContractParameters<T> {
    /// Creates new contract parameters with validation.
    ///
    /// # Errors
    /// The [`AnalyticalError`] variant naming the first invalid parameter.
    pub fn new(spot: T, strike: T, expiry: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        BlackScholes::new(spot, rate, volatility)?;
        check_contract(strike, expiry)?;
        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Same contract priced at another volatility.
    pub fn with_volatility(&self, volatility: T) -> Result<Self, AnalyticalError> {
        Self::new(self.spot, self.strike, self.expiry, self.rate, volatility)
    }

    /// Same contract with another time to maturity.
    pub fn with_expiry(&self, expiry: T) -> Result<Self, AnalyticalError> {
        Self::new(self.spot, self.strike, expiry, self.rate, self.volatility)
    }

    /// Black-Scholes price of the given kind.
    ///
    /// Infallible: the parameters were checked on construction.
    #[inline]
    pub fn price(&self, kind: OptionKind) -> T {
        crate::analytical::black_scholes::price_unchecked(
            kind,
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
        )
    }

    /// Undiscounted payoff at expiry for a terminal spot equal to `spot`.
    #[inline]
    pub fn intrinsic(&self, kind: OptionKind) -> T {
        match kind {
            OptionKind::Call => (self.spot - self.strike).max(T::zero()),
            OptionKind::Put => (self.strike - self.spot).max(T::zero()),
        }
    }
}
