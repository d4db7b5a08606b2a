//! Numerical routines.
//!
//! - [`solvers`]: one-dimensional root finders driven by a [`solvers::SolverConfig`]

pub mod solvers;
