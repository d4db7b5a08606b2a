//! CLI error types.

use pricer_models::analytical::AnalyticalError;
use pricer_models::estimators::EstimatorError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `bsvol` commands.
///
/// Every variant ends the process with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument combination or value rejected before any computation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pricing or calibration input outside the model domain.
    #[error("Pricing error: {0}")]
    Pricing(#[from] AnalyticalError),

    /// Historical volatility could not be estimated.
    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimatorError),

    /// Malformed CSV input.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read
        path: String,
        /// Underlying parser error
        #[source]
        source: csv::Error,
    },

    /// Input file present but without usable content.
    #[error("Invalid input in {path}: {message}")]
    InvalidInput {
        /// File being read
        path: String,
        /// What was wrong
        message: String,
    },

    /// Result serialisation failed.
    #[error("Output error: {0}")]
    Output(String),

    /// Filesystem or stdout failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
