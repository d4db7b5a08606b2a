//! Year fractions for option maturities.
//!
//! Maturities are measured Actual/365: calendar days between the valuation
//! date and the expiry, divided by 365.

use chrono::NaiveDate;

/// Day basis of the Actual/365 convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Convert a day count to years (Act/365).
///
/// # Examples
///
/// ```
/// use pricer_core::types::days_to_years;
///
/// assert_eq!(days_to_years(365), 1.0);
/// assert!((days_to_years(30) - 0.0822).abs() < 1e-4);
/// ```
#[inline]
pub fn days_to_years(days: i64) -> f64 {
    days as f64 / DAYS_PER_YEAR
}

/// Time to maturity in years between two dates (Act/365).
///
/// Negative when `maturity` is before `valuation`, so callers can tell an
/// expired contract from a same-day one.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::time_to_maturity;
///
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let maturity = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
///
/// // 366 days in 2024
/// assert!((time_to_maturity(valuation, maturity) - 1.0027).abs() < 1e-4);
/// ```
pub fn time_to_maturity(valuation: NaiveDate, maturity: NaiveDate) -> f64 {
    days_to_years((maturity - valuation).num_days())
}
