//! Near-the-money strike band selection and forward averaging.

use super::ForwardError;
use crate::instruments::{OptionQuote, OptionType, UnderlyingGroup};
use crate::moneyness::nearest_strike;

/// Why a strike in the band did not contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkipReason {
    /// No call quote at this strike
    MissingCall,
    /// No put quote at this strike
    MissingPut,
    /// `S - C + P <= 0`: the quotes violate parity bounds
    NonPositiveDenominator,
}

/// A band strike excluded from the average.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedPair {
    /// Strike of the excluded pair
    pub strike: f64,
    /// Exclusion reason
    pub reason: SkipReason,
}

/// Implied forward and carry rate for one maturity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForwardEstimate {
    /// Maturity in calendar days
    pub days_to_maturity: i64,
    /// Maturity in years
    pub expiry: f64,
    /// Average implied forward price
    pub forward: f64,
    /// ln(F/S) / T, the implied r - q
    pub implied_rate: f64,
    /// Strikes whose pairs entered the average
    pub strikes_used: Vec<f64>,
    /// Band strikes that were excluded
    pub skipped: Vec<SkippedPair>,
}

/// Forward implied by one call/put pair, or `None` when `S - C + P <= 0`.
///
/// ```
/// use pricer_models::forward::implied_forward;
///
/// // C - P = S - K·e^(-rT) with S = 100, K = 100, e^(-rT) = 0.99
/// let f = implied_forward(100.0, 100.0, 5.0, 4.0).unwrap();
/// assert!((f - 100.0 / 0.99).abs() < 1e-12);
///
/// assert_eq!(implied_forward(100.0, 10.0, 20.0, 1.0), None);
/// ```
pub fn implied_forward(strike: f64, spot: f64, call: f64, put: f64) -> Option<f64> {
    let denominator = spot - call + put;
    if denominator.is_finite() && denominator > 0.0 {
        Some(strike * spot / denominator)
    } else {
        None
    }
}

/// Put-call-parity forward estimator.
///
/// For one maturity the estimator takes the strike ladder of that maturity,
/// locates the ATM anchor on it (nearest listed strike, ties upward), and
/// averages the implied forwards of the anchor strike plus `calc_number`
/// strikes on each side, clipped to the ladder.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_models::forward::ForwardEstimator;
/// use pricer_models::instruments::{OptionQuote, OptionType, UnderlyingGroup};
///
/// let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
/// // C - P = S - K / 1.01 at every strike
/// let quotes = [95.0, 100.0, 105.0]
///     .iter()
///     .flat_map(|&k| {
///         let put = 2.0;
///         let call = put + 100.0 - k / 1.01;
///         vec![
///             OptionQuote::new(format!("C{k}"), "U", OptionType::Call, k, call, 100.0, 73),
///             OptionQuote::new(format!("P{k}"), "U", OptionType::Put, k, put, 100.0, 73),
///         ]
///     })
///     .collect();
/// let group = UnderlyingGroup::new("U", date, 100.0, quotes).unwrap();
///
/// let estimate = ForwardEstimator::default().estimate(&group, 73, 100.0).unwrap();
/// assert!((estimate.forward - 101.0).abs() < 1e-9);
/// assert!((estimate.implied_rate - 1.01_f64.ln() / 0.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardEstimator {
    calc_number: usize,
}

impl Default for ForwardEstimator {
    fn default() -> Self {
        Self { calc_number: 3 }
    }
}

impl ForwardEstimator {
    /// Estimator averaging over `calc_number` strikes either side of ATM.
    pub fn new(calc_number: usize) -> Self {
        Self { calc_number }
    }

    /// Band half-width.
    pub fn calc_number(&self) -> usize {
        self.calc_number
    }

    /// Estimates the forward for the quotes of `group` expiring in
    /// `days_to_maturity` days, centred on `anchor`.
    ///
    /// # Errors
    /// - `InvalidSpot` for a non-positive group spot
    /// - `NoData` when the maturity has no quotes or no band strike has a
    ///   usable call/put pair
    /// - `InvalidExpiry` for a non-positive year fraction
    pub fn estimate(
        &self,
        group: &UnderlyingGroup,
        days_to_maturity: i64,
        anchor: f64,
    ) -> Result<ForwardEstimate, ForwardError> {
        let spot = group.spot();
        if !(spot.is_finite() && spot > 0.0) {
            return Err(ForwardError::InvalidSpot { spot });
        }

        let no_data = ForwardError::NoData { days_to_maturity };
        let expiry = group
            .quotes_for_maturity(days_to_maturity)
            .next()
            .map(OptionQuote::expiry)
            .ok_or_else(|| no_data.clone())?;
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(ForwardError::InvalidExpiry { expiry });
        }

        let ladder = group.strikes_for_maturity(days_to_maturity);
        let centre = nearest_strike(anchor, &ladder)
            .and_then(|k| ladder.iter().position(|&s| s == k))
            .ok_or_else(|| no_data.clone())?;
        let lo = centre.saturating_sub(self.calc_number);
        let hi = (centre + self.calc_number).min(ladder.len() - 1);

        let mut forwards = Vec::with_capacity(hi - lo + 1);
        let mut strikes_used = Vec::with_capacity(hi - lo + 1);
        let mut skipped = Vec::new();

        for &strike in &ladder[lo..=hi] {
            let call = group
                .find(OptionType::Call, strike, days_to_maturity)
                .map(OptionQuote::market_price);
            let put = group
                .find(OptionType::Put, strike, days_to_maturity)
                .map(OptionQuote::market_price);

            let reason = match (call, put) {
                (Some(c), Some(p)) => match implied_forward(strike, spot, c, p) {
                    Some(forward) => {
                        forwards.push(forward);
                        strikes_used.push(strike);
                        continue;
                    }
                    None => SkipReason::NonPositiveDenominator,
                },
                (None, _) => SkipReason::MissingCall,
                (Some(_), None) => SkipReason::MissingPut,
            };
            skipped.push(SkippedPair { strike, reason });
        }

        if forwards.is_empty() {
            return Err(no_data);
        }

        let forward = forwards.iter().sum::<f64>() / forwards.len() as f64;
        Ok(ForwardEstimate {
            days_to_maturity,
            expiry,
            forward,
            implied_rate: (forward / spot).ln() / expiry,
            strikes_used,
            skipped,
        })
    }

    /// Estimates every maturity of `group`, shortest first.
    pub fn estimate_all(
        &self,
        group: &UnderlyingGroup,
        anchor: f64,
    ) -> Vec<(i64, Result<ForwardEstimate, ForwardError>)> {
        group
            .maturities()
            .into_iter()
            .map(|days| (days, self.estimate(group, days, anchor)))
            .collect()
    }
}
