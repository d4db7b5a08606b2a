//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.

use pricer_models::calibration::{CalibrationConfig, CalibrationMethod};
use pricer_models::estimators::HistoricalEstimator;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::output::OutputFormat;

/// Environment variable for the risk-free rate.
pub const ENV_RISK_FREE_RATE: &str = "BSVOL_RISK_FREE_RATE";
/// Environment variable for the log level.
pub const ENV_LOG_LEVEL: &str = "BSVOL_LOG_LEVEL";
/// Environment variable for the output format.
pub const ENV_FORMAT: &str = "BSVOL_FORMAT";
/// Environment variable for the calibration method.
pub const ENV_CALIBRATION_METHOD: &str = "BSVOL_CALIBRATION_METHOD";
/// Environment variable for the historical volatility estimator.
pub const ENV_ESTIMATOR: &str = "BSVOL_ESTIMATOR";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Rate that is not a finite number.
    #[error("Invalid risk-free rate: {0}. Must be a finite decimal, e.g. 0.045")]
    InvalidRate(String),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format.
    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    /// Unknown calibration method.
    #[error("Invalid calibration method: {0}. Must be one of: step-search, bracketing")]
    InvalidMethod(String),

    /// Unknown volatility estimator.
    #[error("Invalid estimator: {0}. Must be one of: log-return, legacy")]
    InvalidEstimator(String),

    /// Calibration tolerance or iteration budget out of range.
    #[error("Invalid calibration settings: {0}")]
    InvalidCalibration(String),

    /// Config file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Every calibration step
    Trace,
    /// Convergence and estimator details
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Suspicious inputs only
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[calibration]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Root-finding method
    #[serde(deserialize_with = "deserialize_from_str")]
    pub method: CalibrationMethod,
    /// Step-search price tolerance
    pub tolerance: f64,
    /// Iteration budget per leg
    pub max_iterations: usize,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        let defaults = CalibrationConfig::default();
        Self {
            method: defaults.method(),
            tolerance: defaults.tolerance(),
            max_iterations: defaults.max_iterations(),
        }
    }
}

impl CalibrationSettings {
    /// Calibrator configuration, with `method` overriding the configured one.
    ///
    /// Call [`BsvolConfig::validate`] first: out-of-range settings panic.
    pub fn to_config(&self, method: Option<CalibrationMethod>) -> CalibrationConfig {
        CalibrationConfig::default()
            .with_method(method.unwrap_or(self.method))
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BsvolConfig {
    /// Annualised risk-free rate as a decimal
    pub risk_free_rate: f64,
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
    /// Implied volatility settings
    pub calibration: CalibrationSettings,
    /// Historical volatility estimator
    #[serde(deserialize_with = "deserialize_from_str")]
    pub estimator: HistoricalEstimator,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for BsvolConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            log_level: LogLevel::Info,
            format: OutputFormat::Table,
            calibration: CalibrationSettings::default(),
            estimator: HistoricalEstimator::LogReturn,
        }
    }
}

impl BsvolConfig {
    /// Create a new BsvolConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields for which `lookup` returns a value.
    ///
    /// `lookup` maps an environment variable name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_RISK_FREE_RATE) {
            self.risk_free_rate = rate
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidRate(rate.clone()))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }
        if let Some(method) = lookup(ENV_CALIBRATION_METHOD) {
            self.calibration.method = CalibrationMethod::from_str(&method)
                .map_err(|_| ConfigError::InvalidMethod(method.clone()))?;
        }
        if let Some(estimator) = lookup(ENV_ESTIMATOR) {
            self.estimator = HistoricalEstimator::from_str(&estimator)
                .map_err(|_| ConfigError::InvalidEstimator(estimator.clone()))?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BsvolConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::InvalidRate(self.risk_free_rate.to_string()));
        }
        let tolerance = self.calibration.tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidCalibration(format!(
                "tolerance must be positive, got {}",
                tolerance
            )));
        }
        if self.calibration.max_iterations == 0 {
            return Err(ConfigError::InvalidCalibration(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(rate) = cli.rate {
            self.risk_free_rate = rate;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.verbose && self.log_level > LogLevel::Debug {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Risk-free rate override
    pub rate: Option<f64>,
    /// Output format override
    pub format: Option<OutputFormat>,
    /// Raise the log level to debug
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<BsvolConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<BsvolConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        BsvolConfig::from_file(config_path)?
    } else {
        BsvolConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BsvolConfig::default();
        assert_eq!(config.risk_free_rate, 0.0);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.calibration.method, CalibrationMethod::StepSearch);
        assert_eq!(config.calibration.tolerance, 0.01);
        assert_eq!(config.calibration.max_iterations, 100);
        assert_eq!(config.estimator, HistoricalEstimator::LogReturn);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            risk_free_rate = 0.0452
            log_level = "debug"
            format = "json"
            estimator = "legacy"

            [calibration]
            method = "bracketing"
            tolerance = 0.001
            max_iterations = 250
        "#;

        let config = BsvolConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.risk_free_rate, 0.0452);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.estimator, HistoricalEstimator::Legacy);
        assert_eq!(config.calibration.method, CalibrationMethod::Bracketing);
        assert_eq!(config.calibration.tolerance, 0.001);
        assert_eq!(config.calibration.max_iterations, 250);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config = BsvolConfig::from_toml("risk_free_rate = 0.03").unwrap();
        assert_eq!(config.risk_free_rate, 0.03);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.calibration, CalibrationSettings::default());
    }

    #[test]
    fn test_toml_rejects_unknown_values() {
        assert!(matches!(
            BsvolConfig::from_toml("format = \"xml\""),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            BsvolConfig::from_toml("[calibration]\nmax_iterations = 0"),
            Err(ConfigError::InvalidCalibration(_))
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = BsvolConfig::default();
        config.risk_free_rate = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRate(_))));

        let mut config = BsvolConfig::default();
        config.calibration.tolerance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCalibration(_))
        ));

        assert!(BsvolConfig::default().validate().is_ok());
    }

    #[test]
    fn test_apply_env() {
        let mut config = BsvolConfig::default();
        config
            .apply_env(env(&[
                (ENV_RISK_FREE_RATE, "0.05"),
                (ENV_FORMAT, "csv"),
                (ENV_CALIBRATION_METHOD, "bracketing"),
                (ENV_ESTIMATOR, "legacy"),
            ]))
            .unwrap();
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.calibration.method, CalibrationMethod::Bracketing);
        assert_eq!(config.estimator, HistoricalEstimator::Legacy);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let mut config = BsvolConfig::default();
        assert!(matches!(
            config.apply_env(env(&[(ENV_RISK_FREE_RATE, "4.5%")])),
            Err(ConfigError::InvalidRate(_))
        ));
        assert!(matches!(
            config.apply_env(env(&[(ENV_CALIBRATION_METHOD, "newton")])),
            Err(ConfigError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = BsvolConfig::default();
        let cli = CliArgs {
            config_file: None,
            rate: Some(0.04),
            format: Some(OutputFormat::Json),
            verbose: true,
        };

        config.merge_with_cli(&cli);

        assert_eq!(config.risk_free_rate, 0.04);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_verbose_keeps_trace() {
        let mut config = BsvolConfig {
            log_level: LogLevel::Trace,
            ..Default::default()
        };
        config.merge_with_cli(&CliArgs {
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_build_config_priority() {
        let cli = CliArgs {
            rate: Some(0.01),
            ..Default::default()
        };
        let config = build_config_with_env(
            &cli,
            env(&[(ENV_RISK_FREE_RATE, "0.05"), (ENV_LOG_LEVEL, "warn")]),
        )
        .unwrap();
        assert_eq!(config.risk_free_rate, 0.01);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), env(&[])).unwrap();
        assert_eq!(config, BsvolConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/bsvol.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_calibration_settings_to_config() {
        let settings = CalibrationSettings {
            method: CalibrationMethod::StepSearch,
            tolerance: 0.005,
            max_iterations: 40,
        };
        let config = settings.to_config(Some(CalibrationMethod::Bracketing));
        assert_eq!(config.method(), CalibrationMethod::Bracketing);
        assert_eq!(config.tolerance(), 0.005);
        assert_eq!(config.max_iterations(), 40);
        assert_eq!(
            settings.to_config(None).method(),
            CalibrationMethod::StepSearch
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidRate("abc".to_string());
        assert!(err.to_string().contains("Invalid risk-free rate"));

        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));
    }
}
