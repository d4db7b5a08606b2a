//! Historical volatility from a series of daily closes.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use super::error::EstimatorError;

/// Trading days used to annualise daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Historical volatility estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HistoricalEstimator {
    /// Sample standard deviation of daily log returns, times √252.
    #[default]
    LogReturn,
    /// Sample standard deviation of the raw closes divided by 100.
    ///
    /// Scales with the price level and is not a volatility in the usual
    /// sense. Kept for comparison with older results.
    Legacy,
}

/// Spot and volatility derived from one price history.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalVolatility {
    /// Last close
    pub spot: f64,
    /// Estimated annual volatility
    pub volatility: f64,
    /// Number of closes used
    pub observations: usize,
}

impl HistoricalEstimator {
    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoricalEstimator::LogReturn => "log-return",
            HistoricalEstimator::Legacy => "legacy",
        }
    }

    /// Minimum number of closes the estimator needs.
    pub fn min_observations(&self) -> usize {
        match self {
            HistoricalEstimator::LogReturn => 3,
            HistoricalEstimator::Legacy => 2,
        }
    }

    /// Estimate volatility from closes ordered oldest first.
    ///
    /// # Errors
    /// - `EstimatorError::InsufficientData` below [`Self::min_observations`]
    /// - `EstimatorError::InvalidPrice` for a non-positive or non-finite close
    /// - `EstimatorError::DegenerateSeries` if the estimate is zero
    ///
    /// # Examples
    /// ```
    /// use pricer_models::estimators::HistoricalEstimator;
    ///
    /// let closes = [100.0, 101.0, 99.0, 102.0];
    /// let vol = HistoricalEstimator::LogReturn.estimate(&closes).unwrap();
    /// assert!((vol - 0.3984).abs() < 1e-4);
    /// ```
    pub fn estimate(&self, closes: &[f64]) -> Result<f64, EstimatorError> {
        let need = self.min_observations();
        if closes.len() < need {
            return Err(EstimatorError::InsufficientData {
                got: closes.len(),
                need,
            });
        }
        if let Some((index, &value)) = closes
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c <= 0.0)
        {
            return Err(EstimatorError::InvalidPrice { index, value });
        }

        let volatility = match self {
            HistoricalEstimator::LogReturn => {
                let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
                sample_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt()
            }
            HistoricalEstimator::Legacy => {
                warn!(
                    estimator = self.as_str(),
                    "legacy estimator divides the standard deviation of prices by 100; \
                     the result is not an annualised volatility"
                );
                sample_std(closes) / 100.0
            }
        };

        if volatility <= 0.0 {
            return Err(EstimatorError::DegenerateSeries {
                count: closes.len(),
            });
        }

        debug!(
            estimator = self.as_str(),
            observations = closes.len(),
            volatility,
            "historical volatility estimated"
        );
        Ok(volatility)
    }

    /// Spot (last close) and estimated volatility.
    pub fn summarize(&self, closes: &[f64]) -> Result<HistoricalVolatility, EstimatorError> {
        let volatility = self.estimate(closes)?;
        let spot = closes.last().copied().ok_or(EstimatorError::InsufficientData {
            got: 0,
            need: self.min_observations(),
        })?;
        Ok(HistoricalVolatility {
            spot,
            volatility,
            observations: closes.len(),
        })
    }
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}

impl fmt::Display for HistoricalEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown estimator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown estimator: '{0}' (expected 'log-return' or 'legacy')")]
pub struct ParseEstimatorError(pub String);

impl FromStr for HistoricalEstimator {
    type Err = ParseEstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log-return" | "log_return" | "logreturn" => Ok(HistoricalEstimator::LogReturn),
            "legacy" => Ok(HistoricalEstimator::Legacy),
            _ => Err(ParseEstimatorError(s.to_string())),
        }
    }
}
