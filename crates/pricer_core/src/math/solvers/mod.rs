//! Root-finding solvers for volatility calibration.
//!
//! Implied volatility is the root of `model_price(σ) - market_price`, a
//! function that is monotonically increasing in `σ`. Two solvers cover it:
//!
//! - [`ProportionalStepSolver`]: moves the guess by a fixed fraction of its
//!   current value in the direction given by the sign of the residual. Simple
//!   and scale-adaptive, but not guaranteed to converge.
//! - [`BrentSolver`]: bracketing method combining bisection, secant and inverse
//!   quadratic interpolation. Converges for any continuous function with a
//!   valid bracket.
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`]:
//! - `tolerance`: accept when `|f(x)| < tolerance`
//! - `max_iterations`: iteration budget (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;
mod step_search;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use step_search::{ProportionalStepSolver, StepSearchRoot, DEFAULT_STEP_FRACTION};
