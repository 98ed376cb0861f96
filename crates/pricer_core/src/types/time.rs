//! Day count conventions and time-to-maturity helpers.
//!
//! Option expiries are carried as calendar dates; the analytics consume
//! year fractions. Both conventions here are actual-day counts over a
//! fixed denominator.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{days_to_maturity, DayCountConvention};
//! use chrono::NaiveDate;
//!
//! let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//!
//! assert_eq!(days_to_maturity(valuation, expiry), 182);
//! let yf = DayCountConvention::ActualActual365.year_fraction(valuation, expiry);
//! assert!((yf - 0.4986).abs() < 0.001);
//! ```

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Day count convention for year fraction calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "act365"))]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    #[cfg_attr(feature = "serde", serde(rename = "act360"))]
    ActualActual360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::ActualActual360.name(), "ACT/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
        }
    }

    /// Days in the convention's year.
    #[inline]
    pub fn denominator(&self) -> f64 {
        match self {
            DayCountConvention::ActualActual365 => 365.0,
            DayCountConvention::ActualActual360 => 360.0,
        }
    }

    /// Converts a calendar day count into a year fraction.
    #[inline]
    pub fn days_to_year_fraction(&self, days: i64) -> f64 {
        days as f64 / self.denominator()
    }

    /// Year fraction between two dates.
    ///
    /// Negative when `end` precedes `start`.
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.days_to_year_fraction(days_to_maturity(start, end))
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Accepts "ACT/365", "Actual/365", "A365", "ACT/360", "Actual/360", "A360".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calendar days from `valuation` to `expiry` (negative once expired).
#[inline]
pub fn days_to_maturity(valuation: NaiveDate, expiry: NaiveDate) -> i64 {
    (expiry - valuation).num_days()
}

/// Time to maturity in years under ACT/365.
///
/// ```
/// use pricer_core::types::time::time_to_maturity;
/// use chrono::NaiveDate;
///
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert!((time_to_maturity(valuation, expiry) - 366.0 / 365.0).abs() < 1e-12);
/// ```
pub fn time_to_maturity(valuation: NaiveDate, expiry: NaiveDate) -> f64 {
    DayCountConvention::ActualActual365.year_fraction(valuation, expiry)
}
