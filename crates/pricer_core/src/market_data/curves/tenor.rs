//! Benchmark tenor labels.

use std::fmt;
use std::str::FromStr;

/// Benchmark tenors quoted on the money-market curve.
///
/// Each label maps to a fixed day count used as the spline abscissa.
///
/// ```
/// use pricer_core::market_data::StandardTenor;
///
/// assert_eq!(StandardTenor::Overnight.days(), 1);
/// assert_eq!("6M".parse::<StandardTenor>().unwrap().days(), 180);
/// assert_eq!(StandardTenor::ALL.len(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandardTenor {
    /// "0S", one day
    #[cfg_attr(feature = "serde", serde(rename = "0S"))]
    Overnight,
    /// "1M", 30 days
    #[cfg_attr(feature = "serde", serde(rename = "1M"))]
    OneMonth,
    /// "2M", 60 days
    #[cfg_attr(feature = "serde", serde(rename = "2M"))]
    TwoMonths,
    /// "3M", 90 days
    #[cfg_attr(feature = "serde", serde(rename = "3M"))]
    ThreeMonths,
    /// "6M", 180 days
    #[cfg_attr(feature = "serde", serde(rename = "6M"))]
    SixMonths,
    /// "9M", 270 days
    #[cfg_attr(feature = "serde", serde(rename = "9M"))]
    NineMonths,
    /// "1Y", 360 days
    #[cfg_attr(feature = "serde", serde(rename = "1Y"))]
    OneYear,
}

impl StandardTenor {
    /// All tenors, shortest first.
    pub const ALL: [StandardTenor; 7] = [
        StandardTenor::Overnight,
        StandardTenor::OneMonth,
        StandardTenor::TwoMonths,
        StandardTenor::ThreeMonths,
        StandardTenor::SixMonths,
        StandardTenor::NineMonths,
        StandardTenor::OneYear,
    ];

    /// Day count used as the curve abscissa.
    pub fn days(&self) -> u32 {
        match self {
            StandardTenor::Overnight => 1,
            StandardTenor::OneMonth => 30,
            StandardTenor::TwoMonths => 60,
            StandardTenor::ThreeMonths => 90,
            StandardTenor::SixMonths => 180,
            StandardTenor::NineMonths => 270,
            StandardTenor::OneYear => 360,
        }
    }

    /// Market label, e.g. "3M".
    pub fn label(&self) -> &'static str {
        match self {
            StandardTenor::Overnight => "0S",
            StandardTenor::OneMonth => "1M",
            StandardTenor::TwoMonths => "2M",
            StandardTenor::ThreeMonths => "3M",
            StandardTenor::SixMonths => "6M",
            StandardTenor::NineMonths => "9M",
            StandardTenor::OneYear => "1Y",
        }
    }

    /// Tenor with exactly `days` days, if any.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.days() == days)
    }
}

impl FromStr for StandardTenor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.label() == upper)
            .ok_or_else(|| format!("Unknown tenor: {}", s))
    }
}

impl fmt::Display for StandardTenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
