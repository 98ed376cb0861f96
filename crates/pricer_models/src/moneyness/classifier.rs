//! ATM anchor selection and ATM/ITM/OTM tagging.

use std::fmt;

use super::{MoneynessError, UnderlyingClass};
use crate::instruments::{OptionQuote, OptionType, UnderlyingGroup};

/// Moneyness of one contract relative to the ATM anchor strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum MoneynessTag {
    /// Strike equals the anchor
    Atm,
    /// Positive intrinsic value at the anchor
    Itm,
    /// Zero intrinsic value at the anchor
    Otm,
}

impl MoneynessTag {
    /// Tags `strike` against `anchor`.
    ///
    /// ```
    /// use pricer_models::instruments::OptionType;
    /// use pricer_models::moneyness::MoneynessTag;
    ///
    /// assert_eq!(MoneynessTag::of(OptionType::Call, 2.6, 2.55), MoneynessTag::Otm);
    /// assert_eq!(MoneynessTag::of(OptionType::Put, 2.6, 2.55), MoneynessTag::Itm);
    /// assert_eq!(MoneynessTag::of(OptionType::Put, 2.55, 2.55), MoneynessTag::Atm);
    /// ```
    pub fn of(option_type: OptionType, strike: f64, anchor: f64) -> Self {
        if strike == anchor {
            MoneynessTag::Atm
        } else if (strike > anchor) == option_type.is_call() {
            MoneynessTag::Otm
        } else {
            MoneynessTag::Itm
        }
    }
}

impl fmt::Display for MoneynessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneynessTag::Atm => write!(f, "ATM"),
            MoneynessTag::Itm => write!(f, "ITM"),
            MoneynessTag::Otm => write!(f, "OTM"),
        }
    }
}

/// Picks the ATM anchor for an underlying and tags its contracts.
///
/// Spot is rounded to the product's strike interval (ties to even). When
/// that value is not a listed strike, the nearest listed strike becomes the
/// anchor; of two equidistant strikes the higher wins.
///
/// # Examples
/// ```
/// use pricer_models::moneyness::{MoneynessClassifier, UnderlyingClass};
///
/// let classifier = MoneynessClassifier::new(UnderlyingClass::EquityEtf);
/// let strikes = [2.35, 2.4, 2.45, 2.5, 2.55, 2.6, 2.65];
///
/// assert_eq!(classifier.atm_anchor(2.53, &strikes).unwrap(), 2.55);
/// // Rounded 2.75 is not listed: fall back to the nearest strike
/// assert_eq!(classifier.atm_anchor(2.76, &strikes).unwrap(), 2.65);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneynessClassifier {
    class: UnderlyingClass,
}

impl MoneynessClassifier {
    /// Classifier for a product family.
    pub fn new(class: UnderlyingClass) -> Self {
        Self { class }
    }

    /// Classifier for the product family of `underlying_id`.
    ///
    /// # Errors
    /// `MoneynessError::UnsupportedInstrumentClass` for unknown products.
    pub fn for_underlying(underlying_id: &str) -> Result<Self, MoneynessError> {
        UnderlyingClass::from_underlying_id(underlying_id).map(Self::new)
    }

    /// Product family.
    pub fn class(&self) -> UnderlyingClass {
        self.class
    }

    /// ATM anchor strike among `strikes` (any order).
    ///
    /// # Errors
    /// - `InvalidSpot` for non-positive or non-finite spot
    /// - `EmptyStrikeLadder` when no finite strike is given
    pub fn atm_anchor(&self, spot: f64, strikes: &[f64]) -> Result<f64, MoneynessError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(MoneynessError::InvalidSpot { spot });
        }
        let rounded = self.class.round_to_tick(spot);
        nearest_strike(rounded, strikes).ok_or(MoneynessError::EmptyStrikeLadder)
    }

    /// Tags every quote in the group, in group order.
    ///
    /// The anchor is chosen from all strikes listed for the underlying.
    pub fn classify_group(
        &self,
        group: &UnderlyingGroup,
    ) -> Result<Vec<MoneynessTag>, MoneynessError> {
        let anchor = self.atm_anchor(group.spot(), &group.strikes())?;
        Ok(tag_quotes(group.quotes(), anchor))
    }
}

/// Tags `quotes` against a fixed anchor.
pub fn tag_quotes(quotes: &[OptionQuote], anchor: f64) -> Vec<MoneynessTag> {
    quotes
        .iter()
        .map(|q| MoneynessTag::of(q.option_type(), q.strike(), anchor))
        .collect()
}

/// Strike closest to `target`; equidistant strikes resolve upward.
///
/// Returns `None` when `strikes` holds no finite value.
///
/// ```
/// use pricer_models::moneyness::nearest_strike;
///
/// assert_eq!(nearest_strike(5650.0, &[5500.0, 5600.0, 5700.0]), Some(5700.0));
/// assert_eq!(nearest_strike(5600.0, &[5500.0, 5600.0, 5700.0]), Some(5600.0));
/// assert_eq!(nearest_strike(1.0, &[]), None);
/// ```
pub fn nearest_strike(target: f64, strikes: &[f64]) -> Option<f64> {
    strikes
        .iter()
        .copied()
        .filter(|k| k.is_finite())
        .min_by(|a, b| {
            (a - target)
                .abs()
                .total_cmp(&(b - target).abs())
                .then_with(|| b.total_cmp(a))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CALL: OptionType = OptionType::Call;
    const PUT: OptionType = OptionType::Put;

    #[test]
    fn test_tag_mapping() {
        assert_eq!(MoneynessTag::of(CALL, 90.0, 100.0), MoneynessTag::Itm);
        assert_eq!(MoneynessTag::of(CALL, 110.0, 100.0), MoneynessTag::Otm);
        assert_eq!(MoneynessTag::of(PUT, 90.0, 100.0), MoneynessTag::Otm);
        assert_eq!(MoneynessTag::of(PUT, 110.0, 100.0), MoneynessTag::Itm);
        assert_eq!(MoneynessTag::of(CALL, 100.0, 100.0), MoneynessTag::Atm);
    }

    #[test]
    fn test_exact_rounded_strike_is_anchor() {
        let classifier = MoneynessClassifier::new(UnderlyingClass::Sugar);
        let strikes = [5400.0, 5500.0, 5600.0, 5700.0, 5800.0];
        assert_eq!(classifier.atm_anchor(5630.0, &strikes).unwrap(), 5600.0);
    }

    #[test]
    fn test_nearest_fallback_tie_goes_higher() {
        // Rounded spot 5600 is not listed and 5500/5700 are equidistant
        let classifier = MoneynessClassifier::new(UnderlyingClass::Sugar);
        let strikes = [5300.0, 5500.0, 5700.0, 5900.0];
        assert_eq!(classifier.atm_anchor(5610.0, &strikes).unwrap(), 5700.0);
    }

    #[test]
    fn test_strike_order_does_not_matter() {
        let classifier = MoneynessClassifier::new(UnderlyingClass::Corn);
        let a = classifier.atm_anchor(2531.0, &[2500.0, 2520.0, 2560.0, 2580.0]).unwrap();
        let b = classifier.atm_anchor(2531.0, &[2580.0, 2560.0, 2520.0, 2500.0]).unwrap();
        assert_eq!(a, b);
        // Rounded 2540 is equidistant from 2520 and 2560
        assert_eq!(a, 2560.0);
    }

    #[test]
    fn test_errors() {
        let classifier = MoneynessClassifier::new(UnderlyingClass::EquityEtf);
        assert_eq!(
            classifier.atm_anchor(2.5, &[]).unwrap_err(),
            MoneynessError::EmptyStrikeLadder
        );
        assert!(matches!(
            classifier.atm_anchor(0.0, &[2.5]),
            Err(MoneynessError::InvalidSpot { .. })
        ));
        assert!(MoneynessClassifier::for_underlying("IF2109").is_err());
    }

    #[test]
    fn test_classify_group() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let quotes = vec![
            OptionQuote::new("c1", "510050.XSHG", CALL, 2.5, 0.09, 2.53, 30),
            OptionQuote::new("c2", "510050.XSHG", CALL, 2.55, 0.06, 2.53, 30),
            OptionQuote::new("c3", "510050.XSHG", CALL, 2.6, 0.04, 2.53, 30),
            OptionQuote::new("p1", "510050.XSHG", PUT, 2.5, 0.03, 2.53, 30),
            OptionQuote::new("p3", "510050.XSHG", PUT, 2.6, 0.08, 2.53, 30),
        ];
        let group = UnderlyingGroup::new("510050.XSHG", date, 2.53, quotes).unwrap();
        let classifier = MoneynessClassifier::for_underlying(group.underlying_id()).unwrap();

        let tags = classifier.classify_group(&group).unwrap();
        assert_eq!(
            tags,
            vec![
                MoneynessTag::Itm,
                MoneynessTag::Atm,
                MoneynessTag::Otm,
                MoneynessTag::Otm,
                MoneynessTag::Itm,
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(MoneynessTag::Atm.to_string(), "ATM");
        assert_eq!(MoneynessTag::Otm.to_string(), "OTM");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn ladder_has_exactly_one_atm_strike(
                spot in 2000.0..9000.0_f64,
                offset in -5i32..5,
            ) {
                let classifier = MoneynessClassifier::new(UnderlyingClass::Sugar);
                let base = classifier.class().round_to_tick(spot);
                let step = classifier.class().tick_size(spot);
                let strikes: Vec<f64> = (0..10)
                    .map(|i| base + f64::from(i - 5 + offset) * step)
                    .filter(|k| *k > 0.0)
                    .collect();

                let anchor = classifier.atm_anchor(spot, &strikes).unwrap();
                let atm_count = strikes
                    .iter()
                    .filter(|&&k| MoneynessTag::of(OptionType::Call, k, anchor) == MoneynessTag::Atm)
                    .count();
                prop_assert_eq!(atm_count, 1);

                for &k in &strikes {
                    let call = MoneynessTag::of(OptionType::Call, k, anchor);
                    let put = MoneynessTag::of(OptionType::Put, k, anchor);
                    match call {
                        MoneynessTag::Atm => prop_assert_eq!(put, MoneynessTag::Atm),
                        MoneynessTag::Itm => prop_assert_eq!(put, MoneynessTag::Otm),
                        MoneynessTag::Otm => prop_assert_eq!(put, MoneynessTag::Itm),
                    }
                }
            }
        }
    }
}
