//! Sweep command implementation
//!
//! Call and put values along a volatility or maturity grid.

use clap::{Args, Subcommand};
use pricer_models::analytical::{maturity_sweep, volatility_sweep, Grid, SweepPoint};
use pricer_models::instruments::ContractParameters;
use tracing::info;

use super::MaturityArgs;
use crate::config::BsvolConfig;
use crate::output::{Cell, Report};
use crate::Result;

/// Arguments of `bsvol sweep`.
#[derive(Debug, Clone, Args)]
pub struct SweepArgs {
    /// Parameter to vary
    #[command(subcommand)]
    pub axis: SweepAxis,
}

/// Grid bounds; unset values fall back to the axis default.
#[derive(Debug, Clone, Default, Args)]
pub struct GridArgs {
    /// First grid point
    #[arg(long)]
    pub start: Option<f64>,

    /// Exclusive upper bound
    #[arg(long)]
    pub end: Option<f64>,

    /// Grid spacing
    #[arg(long)]
    pub step: Option<f64>,
}

impl GridArgs {
    fn resolve(&self, default: Grid) -> Result<Grid> {
        Ok(Grid::new(
            self.start.unwrap_or(default.start()),
            self.end.unwrap_or(default.end()),
            self.step.unwrap_or(default.step()),
        )?)
    }
}

/// Swept parameter.
#[derive(Debug, Clone, Subcommand)]
pub enum SweepAxis {
    /// Vary volatility (default grid 0.01 to 1.5, step 0.01)
    Sigma {
        /// Spot price of the underlying
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        #[command(flatten)]
        maturity: MaturityArgs,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Vary time to maturity in years (default grid 0.0001 to 1, step 0.01)
    Time {
        /// Spot price of the underlying
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Volatility as a decimal
        #[arg(long)]
        sigma: f64,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Run the sweep command
pub fn run(args: &SweepArgs, config: &BsvolConfig) -> Result<Report> {
    let rate = config.risk_free_rate;
    let (axis, points) = match &args.axis {
        SweepAxis::Sigma {
            spot,
            strike,
            maturity,
            grid,
        } => {
            let grid = grid.resolve(Grid::VOLATILITY)?;
            let base = ContractParameters::new(*spot, *strike, maturity.years()?, rate, grid.start())?;
            ("sigma", volatility_sweep(&base, &grid)?)
        }
        SweepAxis::Time {
            spot,
            strike,
            sigma,
            grid,
        } => {
            let grid = grid.resolve(Grid::MATURITY)?;
            let base = ContractParameters::new(*spot, *strike, grid.start(), rate, *sigma)?;
            ("T", maturity_sweep(&base, &grid)?)
        }
    };
    info!(axis, points = points.len(), "Swept");
    Ok(tabulate(axis, &points))
}

fn tabulate(axis: &str, points: &[SweepPoint]) -> Report {
    let mut report = Report::new(&[axis, "call", "put"])
        .with_title(format!("Black-Scholes values by {}", axis));
    for point in points {
        report.push_row(vec![
            Cell::num(point.x, 4),
            Cell::num(point.call, 4),
            Cell::num(point.put, 4),
        ]);
    }
    report
}
