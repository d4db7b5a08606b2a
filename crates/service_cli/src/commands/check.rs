//! Check command implementation
//!
//! Shows the effective configuration after merging file, environment and
//! flags.

use crate::config::BsvolConfig;
use crate::output::{Cell, Report};
use crate::{Result, VERSION};

/// Run the check command
pub fn run(config: &BsvolConfig) -> Result<Report> {
    let mut report = Report::new(&["setting", "value"]).with_title(format!("bsvol {}", VERSION));
    let settings = [
        ("risk_free_rate", config.risk_free_rate.to_string()),
        ("log_level", config.log_level.to_string()),
        ("format", config.format.to_string()),
        ("calibration.method", config.calibration.method.to_string()),
        ("calibration.tolerance", config.calibration.tolerance.to_string()),
        (
            "calibration.max_iterations",
            config.calibration.max_iterations.to_string(),
        ),
        ("estimator", config.estimator.to_string()),
    ];
    for (name, value) in settings {
        report.push_row(vec![Cell::text(name), Cell::text(value)]);
    }
    Ok(report)
}
