//! Implied volatility from observed option prices.

use pricer_core::math::solvers::{BrentSolver, ProportionalStepSolver, SolverConfig};
use pricer_core::types::SolverError;
use tracing::{debug, trace};

use super::config::{CalibrationConfig, CalibrationMethod};
use crate::analytical::black_scholes::{check_contract, price_unchecked};
use crate::analytical::{AnalyticalError, BlackScholes};
use crate::instruments::OptionKind;

/// Observed option prices for one contract, plus the search seed.
///
/// A leg set to `None` is not calibrated.
///
/// # Examples
/// ```
/// use pricer_models::calibration::MarketObservation;
/// use pricer_models::instruments::OptionKind;
///
/// let obs = MarketObservation::new(100.0, 100.0, 1.0, 0.05, 0.25).with_call(10.45);
/// assert_eq!(obs.price(OptionKind::Call), Some(10.45));
/// assert_eq!(obs.price(OptionKind::Put), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketObservation {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    initial_sigma: f64,
    call: Option<f64>,
    put: Option<f64>,
}

impl MarketObservation {
    /// Contract and seed with no observed prices yet.
    ///
    /// Parameters are validated when calibrating, not here.
    pub fn new(spot: f64, strike: f64, expiry: f64, rate: f64, initial_sigma: f64) -> Self {
        Self {
            spot,
            strike,
            expiry,
            rate,
            initial_sigma,
            call: None,
            put: None,
        }
    }

    /// Set the observed call price.
    pub fn with_call(mut self, price: f64) -> Self {
        self.call = Some(price);
        self
    }

    /// Set the observed put price.
    pub fn with_put(mut self, price: f64) -> Self {
        self.put = Some(price);
        self
    }

    /// Observed price of the given leg.
    pub fn price(&self, kind: OptionKind) -> Option<f64> {
        match kind {
            OptionKind::Call => self.call,
            OptionKind::Put => self.put,
        }
    }

    /// Returns the spot price.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to maturity in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the initial volatility guess.
    pub fn initial_sigma(&self) -> f64 {
        self.initial_sigma
    }
}

/// Implied volatility per leg; `None` when the leg was not observed or the
/// search did not converge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolatility {
    /// Implied volatility of the call leg
    pub call: Option<f64>,
    /// Implied volatility of the put leg
    pub put: Option<f64>,
}

impl ImpliedVolatility {
    /// Volatility of the given leg.
    pub fn get(&self, kind: OptionKind) -> Option<f64> {
        match kind {
            OptionKind::Call => self.call,
            OptionKind::Put => self.put,
        }
    }
}

impl From<ImpliedVolatility> for (Option<f64>, Option<f64>) {
    fn from(vol: ImpliedVolatility) -> Self {
        (vol.call, vol.put)
    }
}

/// Inverts the Black-Scholes formula leg by leg.
///
/// Holds only its configuration, so one calibrator can be shared across
/// threads.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_put;
/// use pricer_models::calibration::{ImpliedVolCalibrator, MarketObservation};
///
/// let put = price_put(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let obs = MarketObservation::new(100.0, 100.0, 1.0, 0.05, 0.25).with_put(put);
///
/// let vol = ImpliedVolCalibrator::with_defaults().calibrate(&obs).unwrap();
/// assert_eq!(vol.call, None);
/// assert!((vol.put.unwrap() - 0.2).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolCalibrator {
    config: CalibrationConfig,
}

impl ImpliedVolCalibrator {
    /// Create a calibrator with the given configuration.
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Step search with tolerance 0.01 and 100 iterations.
    pub fn with_defaults() -> Self {
        Self::new(CalibrationConfig::default())
    }

    /// Returns the calibration configuration.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Calibrate every observed leg of `observation`.
    ///
    /// The contract is validated even when no leg is observed.
    ///
    /// # Errors
    /// The `AnalyticalError` for the first invalid parameter. Failure to
    /// converge is not an error.
    pub fn calibrate(
        &self,
        observation: &MarketObservation,
    ) -> Result<ImpliedVolatility, AnalyticalError> {
        validate_contract(observation)?;
        let mut result = ImpliedVolatility::default();
        if let Some(price) = observation.call {
            result.call = self.calibrate_leg(observation, OptionKind::Call, price)?;
        }
        if let Some(price) = observation.put {
            result.put = self.calibrate_leg(observation, OptionKind::Put, price)?;
        }
        Ok(result)
    }

    /// Implied volatility of one leg priced at `market_price`.
    ///
    /// The observed prices stored in `observation` are ignored; only its
    /// contract and seed are used.
    ///
    /// # Returns
    /// * `Ok(Some(sigma))` - converged, rounded to the configured decimals
    /// * `Ok(None)` - no convergence within the budget, or no bracket
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot`, `InvalidStrike`, `InvalidExpiry`,
    ///   `InvalidVolatility` (seed) or `NonFiniteInput` for a bad parameter
    /// - `AnalyticalError::InvalidMarketPrice` for a negative price
    /// - `AnalyticalError::NumericalInstability` if a trial price is not finite
    pub fn calibrate_leg(
        &self,
        observation: &MarketObservation,
        kind: OptionKind,
        market_price: f64,
    ) -> Result<Option<f64>, AnalyticalError> {
        validate_contract(observation)?;
        if !market_price.is_finite() {
            return Err(AnalyticalError::NonFiniteInput {
                name: "market_price",
                value: market_price,
            });
        }
        if market_price < 0.0 {
            return Err(AnalyticalError::InvalidMarketPrice {
                price: market_price,
            });
        }

        let objective = |sigma: f64| {
            let estimated = price_unchecked(
                kind,
                observation.spot,
                observation.strike,
                observation.expiry,
                observation.rate,
                sigma,
            );
            trace!(leg = %kind, sigma, estimated, market_price, "calibration step");
            estimated - market_price
        };

        let outcome = match self.config.method() {
            CalibrationMethod::StepSearch => {
                let solver = ProportionalStepSolver::new(
                    SolverConfig::new(self.config.tolerance(), self.config.max_iterations()),
                    self.config.step_fraction(),
                );
                solver
                    .find_root(objective, observation.initial_sigma)
                    .map(|root| (root.value, Some(root.iterations)))
            }
            CalibrationMethod::Bracketing => {
                let (lower, upper) = self.config.bracket();
                let solver = BrentSolver::new(SolverConfig::new(
                    self.config.bracketing_tolerance(),
                    self.config.max_iterations(),
                ));
                solver
                    .find_root(objective, lower, upper)
                    .map(|sigma| (sigma, None))
            }
        };

        match outcome {
            Ok((sigma, iterations)) => {
                let sigma = self.config.round(sigma);
                debug!(
                    leg = %kind,
                    method = %self.config.method(),
                    sigma,
                    iterations,
                    "implied volatility converged"
                );
                Ok(Some(sigma))
            }
            Err(err) if err.is_no_convergence() => {
                debug!(
                    leg = %kind,
                    method = %self.config.method(),
                    market_price,
                    reason = %err,
                    "implied volatility did not converge"
                );
                Ok(None)
            }
            Err(SolverError::InvalidInitialGuess { x }) => {
                Err(AnalyticalError::InvalidVolatility { volatility: x })
            }
            Err(err) => Err(AnalyticalError::NumericalInstability {
                message: err.to_string(),
            }),
        }
    }
}

fn validate_contract(observation: &MarketObservation) -> Result<(), AnalyticalError> {
    BlackScholes::new(observation.spot, observation.rate, observation.initial_sigma)?;
    check_contract(observation.strike, observation.expiry)
}

/// Implied call and put volatility for one contract.
///
/// Both legs are always computed, seeded from `initial_sigma` and calibrated
/// with the default step search. A market price of `0` conventionally means
/// "no observation": that leg is still computed and the caller discards it.
/// Use [`ImpliedVolCalibrator::calibrate`] with [`MarketObservation`] to skip
/// missing legs instead.
///
/// # Returns
/// `(call, put)`, where `None` means the search did not converge.
///
/// # Errors
/// `AnalyticalError` if `spot`, `strike`, `expiry` or `initial_sigma` is not
/// positive, or any input is not finite.
///
/// # Examples
/// ```
/// use pricer_models::calibration::implied_volatility;
///
/// // A call above the spot price has no implied volatility
/// let (call, _) = implied_volatility(150.0, 5.57, 100.0, 100.0, 1.0, 0.05, 0.25).unwrap();
/// assert_eq!(call, None);
///
/// assert!(implied_volatility(10.0, 5.0, 100.0, 100.0, 0.0, 0.05, 0.25).is_err());
/// ```
pub fn implied_volatility(
    market_call: f64,
    market_put: f64,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    initial_sigma: f64,
) -> Result<(Option<f64>, Option<f64>), AnalyticalError> {
    let observation = MarketObservation::new(spot, strike, expiry, rate, initial_sigma)
        .with_call(market_call)
        .with_put(market_put);
    ImpliedVolCalibrator::with_defaults()
        .calibrate(&observation)
        .map(Into::into)
}
