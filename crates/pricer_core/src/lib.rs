//! # pricer_core: Numerical Foundation for bsvol
//!
//! ## Foundation Layer Role
//!
//! pricer_core is the bottom layer of the workspace and has no dependency on
//! any other bsvol crate. It provides:
//! - Root-finding solvers used by volatility calibration (`math::solvers`)
//! - Error types shared by the pricing and calibration layers (`types::error`)
//! - Act/365 year fractions for turning expiry dates into maturities (`types::time`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{ProportionalStepSolver, SolverConfig};
//!
//! // Walk x towards the root of x² - 2 in 1% steps
//! let solver = ProportionalStepSolver::new(SolverConfig::new(1e-2, 200), 0.01);
//! let root = solver.find_root(|x: f64| x * x - 2.0, 1.0).unwrap();
//! assert!((root.value * root.value - 2.0).abs() < 1e-2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for solver errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
