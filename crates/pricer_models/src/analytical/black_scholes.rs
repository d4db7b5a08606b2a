//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The formula is only defined for `S, K, T, σ > 0`. Every entry point checks
//! those preconditions and returns [`AnalyticalError`] instead of letting a
//! division by zero or a log of a non-positive number produce NaN.

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::OptionKind;

/// Black-Scholes model for European option pricing.
///
/// Holds the market side of the formula (spot, rate, volatility); strike and
/// expiry are supplied per pricing call.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0).unwrap();
/// let put_price = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

#[inline]
fn lossy<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

fn check_finite<T: Float>(name: &'static str, value: T) -> Result<(), AnalyticalError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalyticalError::NonFiniteInput {
            name,
            value: lossy(value),
        })
    }
}

/// Validate the contract side of the formula: `K > 0`, `T > 0`, both finite.
pub(crate) fn check_contract<T: Float>(strike: T, expiry: T) -> Result<(), AnalyticalError> {
    check_finite("strike", strike)?;
    check_finite("expiry", expiry)?;
    if strike <= T::zero() {
        return Err(AnalyticalError::InvalidStrike {
            strike: lossy(strike),
        });
    }
    if expiry <= T::zero() {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: lossy(expiry),
        });
    }
    Ok(())
}

/// Closed-form price with no input checks.
///
/// Callers must have validated all parameters, see [`check_contract`] and
/// [`BlackScholes::new`].
#[inline]
pub(crate) fn price_unchecked<T: Float>(
    kind: OptionKind,
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    volatility: T,
) -> T {
    let (d1, d2) = d1_d2(spot, strike, expiry, rate, volatility);
    let discounted_strike = strike * (-rate * expiry).exp();
    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionKind::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

#[inline]
fn d1_d2<T: Float>(spot: T, strike: T, expiry: T, rate: T, volatility: T) -> (T, T) {
    let half = T::from(0.5).unwrap();
    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + half * volatility * volatility) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any finite value)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::NonFiniteInput` if any argument is NaN or infinite
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        check_finite("spot", spot)?;
        check_finite("rate", rate)?;
        check_finite("volatility", volatility)?;

        if spot <= T::zero() {
            return Err(AnalyticalError::InvalidSpot { spot: lossy(spot) });
        }
        if volatility <= T::zero() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: lossy(volatility),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
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

    /// Same market with a different volatility.
    pub fn with_volatility(&self, volatility: T) -> Result<Self, AnalyticalError> {
        Self::new(self.spot, self.rate, volatility)
    }

    /// The d₁ term: (ln(S/K) + (r + σ²/2)T) / (σ√T).
    pub fn d1(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        check_contract(strike, expiry)?;
        Ok(d1_d2(self.spot, strike, expiry, self.rate, self.volatility).0)
    }

    /// The d₂ term: d₁ - σ√T.
    pub fn d2(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        check_contract(strike, expiry)?;
        Ok(d1_d2(self.spot, strike, expiry, self.rate, self.volatility).1)
    }

    /// European option price of the given kind.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    /// - `AnalyticalError::NonFiniteInput` if strike or expiry is not finite
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        check_contract(strike, expiry)?;
        Ok(price_unchecked(
            kind,
            self.spot,
            strike,
            expiry,
            self.rate,
            self.volatility,
        ))
    }

    /// European call price: C = S·N(d₁) - K·e^(-rT)·N(d₂).
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// assert!(bs.price_call(100.0, 1.0).unwrap() > 0.0);
    ///
    /// // Expiry must be strictly positive
    /// assert!(bs.price_call(100.0, 0.0).is_err());
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionKind::Call, strike, expiry)
    }

    /// European put price: P = K·e^(-rT)·N(-d₂) - S·N(-d₁).
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionKind::Put, strike, expiry)
    }
}

/// Black-Scholes price of a European call.
///
/// # Arguments
/// * `spot` - Spot price S (> 0)
/// * `strike` - Strike price K (> 0)
/// * `expiry` - Time to maturity T in years (> 0)
/// * `rate` - Risk-free rate r
/// * `volatility` - Volatility σ (> 0)
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_call;
///
/// let price = price_call(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn price_call(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, rate, volatility)?.price_call(strike, expiry)
}

/// Black-Scholes price of a European put.
///
/// Same arguments and errors as [`price_call`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_put;
///
/// let price = price_put(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((price - 5.5735).abs() < 1e-3);
/// ```
pub fn price_put(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, rate, volatility)?.price_put(strike, expiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot() {
        for spot in [-100.0_f64, 0.0] {
            match BlackScholes::new(spot, 0.05, 0.2) {
                Err(AnalyticalError::InvalidSpot { spot: s }) => assert_eq!(s, spot),
                other => panic!("Expected InvalidSpot error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_invalid_volatility() {
        for vol in [-0.2_f64, 0.0] {
            match BlackScholes::new(100.0, 0.05, vol) {
                Err(AnalyticalError::InvalidVolatility { volatility }) => assert_eq!(volatility, vol),
                other => panic!("Expected InvalidVolatility error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_non_finite_inputs() {
        assert!(matches!(
            BlackScholes::new(f64::NAN, 0.05, 0.2),
            Err(AnalyticalError::NonFiniteInput { name: "spot", .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, f64::INFINITY, 0.2),
            Err(AnalyticalError::NonFiniteInput { name: "rate", .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0, 0.05, f64::NAN),
            Err(AnalyticalError::NonFiniteInput { name: "volatility", .. })
        ));
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.02, 0.2).is_ok());
    }

    #[test]
    fn test_with_volatility() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        let bumped = bs.with_volatility(0.3).unwrap();
        assert_eq!(bumped.volatility(), 0.3);
        assert_eq!(bumped.spot(), 100.0);
        assert!(bs.with_volatility(0.0).is_err());
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_atm_zero_rate() {
        // d1 = σ√T / 2, d2 = -σ√T / 2
        let bs = BlackScholes::new(100.0_f64, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0).unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0).unwrap(), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        let d1 = bs.d1(105.0, 0.5).unwrap();
        let d2 = bs.d2(105.0, 0.5).unwrap();
        assert_relative_eq!(d2, d1 - 0.2 * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    // ==========================================================
    // Precondition Tests
    // ==========================================================

    #[test]
    fn test_zero_expiry_is_invalid() {
        let bs = BlackScholes::new(110.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(
            bs.price_call(100.0, 0.0),
            Err(AnalyticalError::InvalidExpiry { expiry: 0.0 })
        );
        assert_eq!(
            bs.price_put(100.0, -0.5),
            Err(AnalyticalError::InvalidExpiry { expiry: -0.5 })
        );
        assert!(bs.d1(100.0, 0.0).is_err());
    }

    #[test]
    fn test_non_positive_strike_is_invalid() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_eq!(
            bs.price_call(0.0, 1.0),
            Err(AnalyticalError::InvalidStrike { strike: 0.0 })
        );
        assert_eq!(
            bs.price_put(-10.0, 1.0),
            Err(AnalyticalError::InvalidStrike { strike: -10.0 })
        );
    }

    #[test]
    fn test_free_functions_validate_every_parameter() {
        assert!(matches!(
            price_call(0.0, 100.0, 1.0, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            price_call(100.0, 0.0, 1.0, 0.05, 0.2),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            price_put(100.0, 100.0, 0.0, 0.05, 0.2),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(matches!(
            price_put(100.0, 100.0, 1.0, 0.05, -0.1),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            price_call(100.0, 100.0, f64::NAN, 0.05, 0.2),
            Err(AnalyticalError::NonFiniteInput { name: "expiry", .. })
        ));
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1
        let price = price_call(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_put_price_reference_value() {
        let price = price_put(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(price, 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_free_functions_match_model() {
        let bs = BlackScholes::new(105.0_f64, 0.03, 0.25).unwrap();
        assert_eq!(
            bs.price_call(95.0, 0.75).unwrap(),
            price_call(105.0, 95.0, 0.75, 0.03, 0.25).unwrap()
        );
        assert_eq!(
            bs.price(OptionKind::Put, 95.0, 0.75).unwrap(),
            price_put(105.0, 95.0, 0.75, 0.03, 0.25).unwrap()
        );
    }

    #[test]
    fn test_deterministic() {
        let first = price_call(123.4, 117.0, 0.37, 0.021, 0.31).unwrap();
        for _ in 0..10 {
            assert_eq!(price_call(123.4, 117.0, 0.37, 0.021, 0.31).unwrap(), first);
        }
    }

    #[test]
    fn test_deep_itm_call() {
        let price = price_call(200.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert!(price >= 200.0 - 100.0 * (-0.05_f64).exp() - 0.01);
    }

    #[test]
    fn test_deep_otm_call() {
        assert!(price_call(50.0, 100.0, 1.0, 0.05, 0.2).unwrap() < 0.01);
    }

    // ==========================================================
    // Boundary Tests
    // ==========================================================

    #[test]
    fn test_call_vanishing_volatility_is_discounted_intrinsic() {
        let itm = price_call(100.0, 90.0, 1.0, 0.05, 1e-4).unwrap();
        assert_relative_eq!(itm, 100.0 - 90.0 * (-0.05_f64).exp(), epsilon = 1e-9);

        let otm = price_call(100.0, 110.0, 1.0, 0.05, 1e-4).unwrap();
        assert_relative_eq!(otm, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_call_exploding_volatility_tends_to_spot() {
        let price = price_call(100.0, 100.0, 1.0, 0.05, 50.0).unwrap();
        assert_relative_eq!(price, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_put_vanishing_volatility_is_discounted_intrinsic() {
        let itm = price_put(80.0, 100.0, 0.5, 0.03, 1e-4).unwrap();
        assert_relative_eq!(itm, 100.0 * (-0.015_f64).exp() - 80.0, epsilon = 1e-9);
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let call = bs.price_call(strike, 1.0).unwrap();
            let put = bs.price_put(strike, 1.0).unwrap();
            let forward = 100.0 - strike * (-0.05_f64).exp();
            assert_relative_eq!(call - put, forward, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = BlackScholes::new(100.0_f64, -0.02, 0.2).unwrap();
        let call = bs.price_call(100.0, 1.0).unwrap();
        let put = bs.price_put(100.0, 1.0).unwrap();
        let forward = 100.0 - 100.0 * (0.02_f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    // ==========================================================
    // Monotonicity Tests
    // ==========================================================

    #[test]
    fn test_prices_increase_with_volatility() {
        for (spot, strike, expiry, rate) in [
            (100.0, 100.0, 1.0, 0.05),
            (100.0, 80.0, 0.5, 0.03),
            (100.0, 120.0, 2.0, 0.01),
            (50.0, 55.0, 0.25, 0.0),
        ] {
            let mut prev_call = f64::NEG_INFINITY;
            let mut prev_put = f64::NEG_INFINITY;
            for i in 1..150 {
                let vol = i as f64 * 0.01;
                let call = price_call(spot, strike, expiry, rate, vol).unwrap();
                let put = price_put(spot, strike, expiry, rate, vol).unwrap();
                assert!(call >= prev_call, "call decreased at σ = {}", vol);
                assert!(put >= prev_put, "put decreased at σ = {}", vol);
                prev_call = call;
                prev_put = put;
            }
        }
    }

    #[test]
    fn test_call_increases_with_spot_and_expiry_put_decreases_with_spot() {
        let low = price_call(90.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let high = price_call(110.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert!(high > low);

        let short = price_call(100.0, 100.0, 0.5, 0.05, 0.2).unwrap();
        let long = price_call(100.0, 100.0, 2.0, 0.05, 0.2).unwrap();
        assert!(long > short);

        let put_low_spot = price_put(90.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let put_high_spot = price_put(110.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert!(put_high_spot < put_low_spot);
    }

    #[test]
    fn test_f32_compatibility() {
        let bs = BlackScholes::new(100.0_f32, 0.05_f32, 0.2_f32).unwrap();
        let call = bs.price_call(100.0_f32, 1.0_f32).unwrap();
        assert!((call - 10.4506).abs() < 1e-2);
    }

    // ==========================================================
    // Property-based Tests
    // ==========================================================

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 1.0f64..500.0,
            moneyness in 0.5f64..2.0,
            expiry in 0.01f64..5.0,
            rate in -0.02f64..0.15,
            vol in 0.01f64..1.5,
        ) {
            let strike = spot * moneyness;
            let call = price_call(spot, strike, expiry, rate, vol).unwrap();
            let put = price_put(spot, strike, expiry, rate, vol).unwrap();
            let forward = spot - strike * (-rate * expiry).exp();
            prop_assert!((call - put - forward).abs() < 1e-6);
        }

        #[test]
        fn prop_prices_are_arbitrage_bounded(
            spot in 1.0f64..500.0,
            moneyness in 0.5f64..2.0,
            expiry in 0.01f64..5.0,
            rate in 0.0f64..0.15,
            vol in 0.01f64..1.5,
        ) {
            let strike = spot * moneyness;
            let call = price_call(spot, strike, expiry, rate, vol).unwrap();
            let put = price_put(spot, strike, expiry, rate, vol).unwrap();
            let discounted_strike = strike * (-rate * expiry).exp();
            // Tolerance covers the CDF approximation error
            prop_assert!(call <= spot + 1e-4);
            prop_assert!(call >= (spot - discounted_strike).max(0.0) - 1e-4);
            prop_assert!(put <= discounted_strike + 1e-4);
            prop_assert!(put >= -1e-4);
        }

        #[test]
        fn prop_monotonic_in_volatility(
            spot in 10.0f64..200.0,
            moneyness in 0.7f64..1.3,
            expiry in 0.1f64..3.0,
            rate in 0.0f64..0.1,
            vol in 0.05f64..1.0,
        ) {
            let strike = spot * moneyness;
            let bumped = vol + 0.05;
            prop_assert!(
                price_call(spot, strike, expiry, rate, bumped).unwrap()
                    >= price_call(spot, strike, expiry, rate, vol).unwrap()
            );
            prop_assert!(
                price_put(spot, strike, expiry, rate, bumped).unwrap()
                    >= price_put(spot, strike, expiry, rate, vol).unwrap()
            );
        }
    }
}
