//! Residual tolerance and iteration budget shared by the root finders.

use num_traits::Float;

/// Stopping rule for a one-dimensional root search.
///
/// The tolerance is on the residual `|f(x)|`, not on `x`. For implied
/// volatility that makes it a price tolerance in currency units.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert_eq!(config.max_iterations, 100);
///
/// // Price-unit tolerance used for implied volatility
/// let calibration = SolverConfig::new(0.01, 100);
/// assert_eq!(calibration.tolerance, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Accept `x` once `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Evaluations allowed before `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Tight residual (1e-10) with the calibration budget of 100.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// # Panics
    /// If `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Same iteration budget, different tolerance.
    pub fn with_tolerance(self, tolerance: T) -> Self {
        Self::new(tolerance, self.max_iterations)
    }

    /// Same tolerance, different iteration budget.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self::new(self.tolerance, max_iterations)
    }
}
