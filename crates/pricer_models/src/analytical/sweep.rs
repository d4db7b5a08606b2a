//! Black-Scholes values along a volatility or maturity grid.
//!
//! One contract is re-priced at every point of a half-open grid
//! `[start, end)`, replacing either its volatility or its time to maturity.

use super::error::AnalyticalError;
use crate::instruments::{ContractParameters, OptionKind};

/// Half-open grid `start, start + step, ...` strictly below `end`.
///
/// The point count is `ceil((end - start) / step)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    start: f64,
    end: f64,
    step: f64,
}

impl Grid {
    /// Most points a grid may hold.
    pub const MAX_POINTS: usize = 1_000_000;

    /// Volatility grid `[0.01, 1.5)` with step 0.01 (149 points).
    pub const VOLATILITY: Grid = Grid {
        start: 0.01,
        end: 1.5,
        step: 0.01,
    };

    /// Maturity grid in years `[0.0001, 1)` with step 0.01 (100 points).
    pub const MATURITY: Grid = Grid {
        start: 0.0001,
        end: 1.0,
        step: 0.01,
    };

    /// Creates a grid.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidGrid` unless all bounds are finite,
    /// `start < end`, `step > 0` and the grid has at most
    /// [`Grid::MAX_POINTS`] points.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, AnalyticalError> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(AnalyticalError::InvalidGrid {
                message: format!("non-finite bound in [{}, {}) step {}", start, end, step),
            });
        }
        if step <= 0.0 {
            return Err(AnalyticalError::InvalidGrid {
                message: format!("step must be positive, got {}", step),
            });
        }
        if start >= end {
            return Err(AnalyticalError::InvalidGrid {
                message: format!("empty range [{}, {})", start, end),
            });
        }
        let count = ((end - start) / step).ceil();
        if count > Self::MAX_POINTS as f64 {
            return Err(AnalyticalError::InvalidGrid {
                message: format!(
                    "[{}, {}) step {} has {} points, limit is {}",
                    start,
                    end,
                    step,
                    count,
                    Self::MAX_POINTS
                ),
            });
        }
        Ok(Self { start, end, step })
    }

    /// First point.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Spacing between points.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.step).ceil() as usize
    }

    /// Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the grid points.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

/// Call and put value at one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    /// Grid coordinate (volatility or years to maturity)
    pub x: f64,
    /// Black-Scholes call value
    pub call: f64,
    /// Black-Scholes put value
    pub put: f64,
}

fn sweep<F>(grid: &Grid, reprice: F) -> Result<Vec<SweepPoint>, AnalyticalError>
where
    F: Fn(f64) -> Result<ContractParameters<f64>, AnalyticalError>,
{
    grid.points()
        .map(|x| {
            let params = reprice(x)?;
            Ok(SweepPoint {
                x,
                call: params.price(OptionKind::Call),
                put: params.price(OptionKind::Put),
            })
        })
        .collect()
}

/// Prices `base` at every volatility of `grid`.
///
/// The volatility of `base` itself is ignored.
///
/// # Errors
/// `AnalyticalError::InvalidVolatility` if the grid reaches a non-positive
/// volatility.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{volatility_sweep, Grid};
/// use pricer_models::instruments::ContractParameters;
///
/// let base = ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let points = volatility_sweep(&base, &Grid::VOLATILITY).unwrap();
/// assert_eq!(points.len(), 149);
/// assert!(points.windows(2).all(|w| w[1].call >= w[0].call));
/// ```
pub fn volatility_sweep(
    base: &ContractParameters<f64>,
    grid: &Grid,
) -> Result<Vec<SweepPoint>, AnalyticalError> {
    sweep(grid, |sigma| base.with_volatility(sigma))
}

/// Prices `base` at every time to maturity (in years) of `grid`.
///
/// # Errors
/// `AnalyticalError::InvalidExpiry` if the grid reaches a non-positive
/// maturity.
pub fn maturity_sweep(
    base: &ContractParameters<f64>,
    grid: &Grid,
) -> Result<Vec<SweepPoint>, AnalyticalError> {
    sweep(grid, |expiry| base.with_expiry(expiry))
}
