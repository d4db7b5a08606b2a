//! Directional proportional-step root search.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Default step: 5% of the current guess.
pub const DEFAULT_STEP_FRACTION: f64 = 0.05;

/// Accepted point of a [`ProportionalStepSolver`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSearchRoot<T> {
    /// The accepted guess.
    pub value: T,
    /// Number of function evaluations, including the accepting one.
    pub iterations: usize,
}

/// Root search that moves a positive guess by a fixed fraction of itself.
///
/// Assumes `f` is increasing in `x` on `(0, ∞)`. At each iteration:
/// - `|f(x)| < tolerance`: accept `x`
/// - `f(x) > 0`: `x := x - x·step_fraction`
/// - otherwise: `x := x + x·step_fraction`
///
/// The step scales with the guess, so the iterate stays strictly positive.
/// There is no convergence guarantee: a step larger than the tolerance window
/// oscillates around the root, and a root outside the reachable range is never
/// found. Both cases end in `SolverError::MaxIterationsExceeded`.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{ProportionalStepSolver, SolverConfig};
///
/// let solver = ProportionalStepSolver::new(SolverConfig::new(1e-2, 100), 0.05);
/// let root = solver.find_root(|x: f64| x * x - 2.0, 2.0).unwrap();
/// assert!((root.value - std::f64::consts::SQRT_2).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct ProportionalStepSolver<T: Float> {
    config: SolverConfig<T>,
    step_fraction: T,
}

impl<T: Float> ProportionalStepSolver<T> {
    /// Create a solver with the given configuration and step fraction.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < step_fraction < 1`.
    pub fn new(config: SolverConfig<T>, step_fraction: T) -> Self {
        assert!(
            step_fraction > T::zero() && step_fraction < T::one(),
            "step_fraction must be in (0, 1)"
        );
        Self {
            config,
            step_fraction,
        }
    }

    /// Default configuration with a 5% step.
    pub fn with_defaults() -> Self {
        Self::new(
            SolverConfig::default(),
            T::from(DEFAULT_STEP_FRACTION).unwrap(),
        )
    }

    /// Search for a root of `f` starting from `initial`.
    ///
    /// # Returns
    ///
    /// * `Ok(root)` - `|f(root.value)| < tolerance`
    /// * `Err(SolverError::InvalidInitialGuess)` - `initial` not finite and positive
    /// * `Err(SolverError::NumericalInstability)` - `f` returned NaN or infinity
    /// * `Err(SolverError::MaxIterationsExceeded)` - budget exhausted
    pub fn find_root<F>(&self, f: F, initial: T) -> Result<StepSearchRoot<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        if !initial.is_finite() || initial <= T::zero() {
            return Err(SolverError::InvalidInitialGuess {
                x: initial.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut x = initial;
        for iteration in 0..self.config.max_iterations {
            let residual = f(x);
            if !residual.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "non-finite residual at x = {}",
                    x.to_f64().unwrap_or(f64::NAN)
                )));
            }

            if residual.abs() < self.config.tolerance {
                return Ok(StepSearchRoot {
                    value: x,
                    iterations: iteration + 1,
                });
            }

            let step = x * self.step_fraction;
            x = if residual > T::zero() { x - step } else { x + step };
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Returns the step fraction.
    pub fn step_fraction(&self) -> T {
        self.step_fraction
    }
}
