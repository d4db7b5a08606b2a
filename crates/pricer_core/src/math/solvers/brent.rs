//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, the secant method and inverse quadratic interpolation.
/// Needs no derivative and always converges for a continuous function once
/// `f(a)` and `f(b)` have opposite signs.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

/// Running state: `best` is the current estimate, `contra` the point
/// bracketing the root with it, `previous` the estimate before `best`.
struct Bracket<T> {
    previous: T,
    f_previous: T,
    best: T,
    f_best: T,
    contra: T,
    f_contra: T,
    step: T,
    prior_step: T,
}

impl<T: Float> Bracket<T> {
    /// Keep `|f(contra)| >= |f(best)|`.
    fn order(&mut self) {
        if self.f_contra.abs() < self.f_best.abs() {
            self.previous = self.best;
            self.f_previous = self.f_best;
            self.best = self.contra;
            self.f_best = self.f_contra;
            self.contra = self.previous;
            self.f_contra = self.f_previous;
        }
    }

    /// Interpolated step proposal as `(p, q)` with step `p / q`, if any.
    fn interpolate(&self, half_width: T) -> Option<(T, T)> {
        let one = T::one();
        let two = T::from(2.0).unwrap();

        if self.f_previous != self.f_contra && self.f_best != self.f_contra {
            // Inverse quadratic interpolation
            let r = self.f_best / self.f_contra;
            let s = self.f_best / self.f_previous;
            let t = self.f_previous / self.f_contra;
            let p = s
                * (t * (r - t) * (self.contra - self.best)
                    - (one - r) * (self.best - self.previous));
            let q = (t - one) * (r - one) * (s - one);
            Some((p, q))
        } else if self.f_best != self.f_previous {
            // Secant
            let s = self.f_best / self.f_previous;
            Some((two * half_width * s, one - s))
        } else {
            None
        }
    }
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - `|f(x)| < tolerance`, or the bracket narrowed to
    ///   `2·ε·|x| + tolerance/2`, whichever comes first
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - failed to converge
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let tol = self.config.tolerance;

        let fa = f(a);
        let fb = f(b);
        if fa * fb > zero {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let (start, f_start, best, f_best) = if fa.abs() < fb.abs() {
            (b, fb, a, fa)
        } else {
            (a, fa, b, fb)
        };
        let mut br = Bracket {
            previous: start,
            f_previous: f_start,
            best,
            f_best,
            contra: start,
            f_contra: f_start,
            step: best - start,
            prior_step: best - start,
        };

        for _ in 0..self.config.max_iterations {
            if br.f_best.abs() < tol {
                return Ok(br.best);
            }

            // Interval tolerance floored at the float resolution around `best`
            let tol1 = two * T::epsilon() * br.best.abs() + tol / two;
            let half_width = (br.contra - br.best) / two;
            if half_width.abs() <= tol1 {
                return Ok(br.best);
            }

            // Accept interpolation only while it shrinks faster than bisection
            let accepted = br.interpolate(half_width).filter(|&(p, q)| {
                p.abs() < (three * half_width * q).abs() / two
                    && p.abs() < (br.prior_step * q).abs() / two
            });
            match accepted {
                Some((p, q)) => {
                    br.prior_step = br.step;
                    br.step = p / q;
                }
                None => {
                    br.step = half_width;
                    br.prior_step = half_width;
                }
            }

            br.previous = br.best;
            br.f_previous = br.f_best;

            br.best = if br.step.abs() > tol1 {
                br.best + br.step
            } else if half_width > zero {
                br.best + tol1
            } else {
                br.best - tol1
            };
            br.f_best = f(br.best);

            // Re-establish the bracket around the root
            if (br.f_best > zero && br.f_contra > zero) || (br.f_best < zero && br.f_contra < zero)
            {
                br.contra = br.previous;
                br.f_contra = br.f_previous;
                br.step = br.best - br.previous;
                br.prior_step = br.step;
            }

            br.order();
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
