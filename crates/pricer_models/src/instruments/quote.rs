//! Single-contract market snapshot.

use pricer_core::types::DayCountConvention;

use super::OptionType;
use crate::analytical::AnalyticalError;

/// One listed European option as observed on a valuation date.
///
/// A quote is built once from fetched market data and never mutated;
/// the rate and dividend yield are attached by consuming builders that
/// return a new value.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionQuote, OptionType};
///
/// let quote = OptionQuote::new("10002501", "510050.XSHG", OptionType::Call, 2.5, 0.071, 2.53, 73)
///     .with_rate(0.021);
///
/// assert_eq!(quote.days_to_maturity(), 73);
/// assert!((quote.expiry() - 0.2).abs() < 1e-15);
/// assert_eq!(quote.rate(), 0.021);
/// assert!(quote.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    id: String,
    underlying_id: String,
    option_type: OptionType,
    strike: f64,
    market_price: f64,
    spot: f64,
    days_to_maturity: i64,
    expiry: f64,
    rate: f64,
    dividend_yield: f64,
}

impl OptionQuote {
    /// Creates a quote with zero rate and dividend yield.
    ///
    /// The year fraction is `days_to_maturity / 365`; use
    /// [`with_day_count`](Self::with_day_count) for another basis.
    pub fn new(
        id: impl Into<String>,
        underlying_id: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        market_price: f64,
        spot: f64,
        days_to_maturity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            underlying_id: underlying_id.into(),
            option_type,
            strike,
            market_price,
            spot,
            days_to_maturity,
            expiry: DayCountConvention::ActualActual365.days_to_year_fraction(days_to_maturity),
            rate: 0.0,
            dividend_yield: 0.0,
        }
    }

    /// Attaches the continuously compounded risk-free rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Attaches a continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Recomputes the year fraction under `day_count`.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.expiry = day_count.days_to_year_fraction(self.days_to_maturity);
        self
    }

    /// Checks the inputs the closed-form formulas require.
    ///
    /// # Errors
    /// - `InvalidSpot`, `InvalidStrike`, `InvalidExpiry` for non-positive or
    ///   non-finite values
    /// - `InvalidPrice` for a negative or non-finite market price
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot: self.spot });
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike {
                strike: self.strike,
            });
        }
        if !(self.expiry.is_finite() && self.expiry > 0.0) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        if !(self.market_price.is_finite() && self.market_price >= 0.0) {
            return Err(AnalyticalError::InvalidPrice {
                price: self.market_price,
            });
        }
        Ok(())
    }

    /// Instrument id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Underlying instrument id.
    #[inline]
    pub fn underlying_id(&self) -> &str {
        &self.underlying_id
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Quoted option price.
    #[inline]
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Underlying spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Calendar days to expiry.
    #[inline]
    pub fn days_to_maturity(&self) -> i64 {
        self.days_to_maturity
    }

    /// Time to maturity in years (T).
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quote() -> OptionQuote {
        OptionQuote::new("SR2109C5600", "SR2109", OptionType::Call, 5600.0, 112.5, 5630.0, 90)
    }

    #[test]
    fn test_defaults() {
        let q = quote();
        assert_eq!(q.rate(), 0.0);
        assert_eq!(q.dividend_yield(), 0.0);
        assert_relative_eq!(q.expiry(), 90.0 / 365.0, epsilon = 1e-15);
    }

    #[test]
    fn test_builders_return_copies() {
        let base = quote();
        let with_rate = base.clone().with_rate(0.02).with_dividend_yield(0.01);
        assert_eq!(base.rate(), 0.0);
        assert_eq!(with_rate.rate(), 0.02);
        assert_eq!(with_rate.dividend_yield(), 0.01);
        assert_eq!(with_rate.id(), base.id());
    }

    #[test]
    fn test_day_count_rebases_expiry() {
        let q = quote().with_day_count(DayCountConvention::ActualActual360);
        assert_relative_eq!(q.expiry(), 0.25, epsilon = 1e-15);
        assert_eq!(q.days_to_maturity(), 90);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let bad_spot = OptionQuote::new("a", "u", OptionType::Put, 100.0, 1.0, 0.0, 30);
        assert!(matches!(
            bad_spot.validate(),
            Err(AnalyticalError::InvalidSpot { .. })
        ));

        let bad_strike = OptionQuote::new("a", "u", OptionType::Put, -1.0, 1.0, 100.0, 30);
        assert!(matches!(
            bad_strike.validate(),
            Err(AnalyticalError::InvalidStrike { .. })
        ));

        let expired = OptionQuote::new("a", "u", OptionType::Put, 100.0, 1.0, 100.0, 0);
        assert!(matches!(
            expired.validate(),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));

        let bad_price = OptionQuote::new("a", "u", OptionType::Put, 100.0, f64::NAN, 100.0, 30);
        assert!(matches!(
            bad_price.validate(),
            Err(AnalyticalError::InvalidPrice { .. })
        ));
    }
}
