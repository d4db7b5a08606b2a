//! Calibration method selection and settings.

use std::fmt;
use std::str::FromStr;

/// Root-finding strategy used to invert the Black-Scholes price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CalibrationMethod {
    /// Multiply the guess by `1 ∓ step_fraction` until the price error is
    /// inside the tolerance. No convergence guarantee.
    #[default]
    StepSearch,
    /// Brent's method on a fixed volatility bracket.
    Bracketing,
}

impl CalibrationMethod {
    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            CalibrationMethod::StepSearch => "step-search",
            CalibrationMethod::Bracketing => "bracketing",
        }
    }
}

impl fmt::Display for CalibrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown calibration method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown calibration method: '{0}' (expected 'step-search' or 'bracketing')")]
pub struct ParseCalibrationMethodError(pub String);

impl FromStr for CalibrationMethod {
    type Err = ParseCalibrationMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step-search" | "step_search" | "step" => Ok(CalibrationMethod::StepSearch),
            "bracketing" | "brent" => Ok(CalibrationMethod::Bracketing),
            _ => Err(ParseCalibrationMethodError(s.to_string())),
        }
    }
}

/// Price tolerance of the step search, in currency units.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Iteration budget per leg.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Relative change of the guess per step-search iteration.
pub const DEFAULT_STEP_FRACTION: f64 = 0.05;

/// Volatility bracket searched by [`CalibrationMethod::Bracketing`].
pub const DEFAULT_BRACKET: (f64, f64) = (1e-4, 5.0);

/// Price tolerance of [`CalibrationMethod::Bracketing`].
pub const DEFAULT_BRACKETING_TOLERANCE: f64 = 1e-8;

/// Decimal digits kept in a reported implied volatility.
pub const DEFAULT_DECIMALS: u32 = 4;

/// Settings for [`ImpliedVolCalibrator`](super::ImpliedVolCalibrator).
///
/// # Examples
/// ```
/// use pricer_models::calibration::{CalibrationConfig, CalibrationMethod};
///
/// let config = CalibrationConfig::default();
/// assert_eq!(config.method(), CalibrationMethod::StepSearch);
/// assert_eq!(config.tolerance(), 0.01);
/// assert_eq!(config.max_iterations(), 100);
///
/// let brent = config.with_method(CalibrationMethod::Bracketing);
/// assert_eq!(brent.bracket(), (1e-4, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    method: CalibrationMethod,
    tolerance: f64,
    max_iterations: usize,
    step_fraction: f64,
    bracket: (f64, f64),
    bracketing_tolerance: f64,
    decimals: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            method: CalibrationMethod::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            step_fraction: DEFAULT_STEP_FRACTION,
            bracket: DEFAULT_BRACKET,
            bracketing_tolerance: DEFAULT_BRACKETING_TOLERANCE,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl CalibrationConfig {
    /// Returns the root-finding method.
    pub fn method(&self) -> CalibrationMethod {
        self.method
    }

    /// Returns the step-search price tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the per-leg iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the step-search step fraction.
    pub fn step_fraction(&self) -> f64 {
        self.step_fraction
    }

    /// Returns the `(lower, upper)` volatility bracket.
    pub fn bracket(&self) -> (f64, f64) {
        self.bracket
    }

    /// Returns the bracketing price tolerance.
    pub fn bracketing_tolerance(&self) -> f64 {
        self.bracketing_tolerance
    }

    /// Returns the number of decimals kept in results.
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Use another root-finding method.
    pub fn with_method(mut self, method: CalibrationMethod) -> Self {
        self.method = method;
        self
    }

    /// Use another step-search price tolerance.
    ///
    /// # Panics
    /// Panics unless `tolerance` is finite and positive.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance.is_finite() && tolerance > 0.0,
            "tolerance must be positive"
        );
        self.tolerance = tolerance;
        self
    }

    /// Use another iteration budget.
    ///
    /// # Panics
    /// Panics if `max_iterations == 0`.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        self.max_iterations = max_iterations;
        self
    }

    /// Use another step fraction.
    ///
    /// # Panics
    /// Panics unless `0 < step_fraction < 1`.
    pub fn with_step_fraction(mut self, step_fraction: f64) -> Self {
        assert!(
            step_fraction > 0.0 && step_fraction < 1.0,
            "step_fraction must be in (0, 1)"
        );
        self.step_fraction = step_fraction;
        self
    }

    /// Use another volatility bracket.
    ///
    /// # Panics
    /// Panics unless `0 < lower < upper` and both are finite.
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        assert!(
            lower > 0.0 && lower < upper && upper.is_finite(),
            "bracket must satisfy 0 < lower < upper"
        );
        self.bracket = (lower, upper);
        self
    }

    /// Round `value` to the configured number of decimals.
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (value * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalibrationConfig::default();
        assert_eq!(config.method(), CalibrationMethod::StepSearch);
        assert_eq!(config.tolerance(), 0.01);
        assert_eq!(config.max_iterations(), 100);
        assert_eq!(config.step_fraction(), 0.05);
        assert_eq!(config.bracket(), (1e-4, 5.0));
        assert_eq!(config.bracketing_tolerance(), 1e-8);
        assert_eq!(config.decimals(), 4);
    }

    #[test]
    fn test_round_to_four_decimals() {
        let config = CalibrationConfig::default();
        assert_eq!(config.round(0.200_149_9), 0.2001);
        assert_eq!(config.round(0.199_96), 0.2);
        assert_eq!(config.round(0.25), 0.25);
    }

    #[test]
    fn test_builders() {
        let config = CalibrationConfig::default()
            .with_method(CalibrationMethod::Bracketing)
            .with_tolerance(0.001)
            .with_max_iterations(50)
            .with_step_fraction(0.02)
            .with_bracket(0.01, 3.0);
        assert_eq!(config.method(), CalibrationMethod::Bracketing);
        assert_eq!(config.tolerance(), 0.001);
        assert_eq!(config.max_iterations(), 50);
        assert_eq!(config.step_fraction(), 0.02);
        assert_eq!(config.bracket(), (0.01, 3.0));
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_zero_tolerance_panics() {
        let _ = CalibrationConfig::default().with_tolerance(0.0);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_zero_iterations_panics() {
        let _ = CalibrationConfig::default().with_max_iterations(0);
    }

    #[test]
    #[should_panic(expected = "bracket must satisfy 0 < lower < upper")]
    fn test_inverted_bracket_panics() {
        let _ = CalibrationConfig::default().with_bracket(2.0, 1.0);
    }

    #[test]
    fn test_method_parse_and_display() {
        assert_eq!(
            "step-search".parse::<CalibrationMethod>().unwrap(),
            CalibrationMethod::StepSearch
        );
        assert_eq!(
            "Bracketing".parse::<CalibrationMethod>().unwrap(),
            CalibrationMethod::Bracketing
        );
        assert!("newton".parse::<CalibrationMethod>().is_err());
        for method in [CalibrationMethod::StepSearch, CalibrationMethod::Bracketing] {
            assert_eq!(method.to_string().parse::<CalibrationMethod>().unwrap(), method);
        }
    }
}
