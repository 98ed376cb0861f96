//! Quotes sharing one underlying and valuation date.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use super::{OptionQuote, OptionType, QuoteError};

/// Cross-section of one underlying's option chain on a valuation date.
///
/// Construction enforces that every quote names this underlying, carries
/// this spot exactly, and has a unique id.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_models::instruments::{OptionQuote, OptionType, UnderlyingGroup};
///
/// let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
/// let quotes = vec![
///     OptionQuote::new("c1", "U", OptionType::Call, 100.0, 5.0, 101.0, 30),
///     OptionQuote::new("p1", "U", OptionType::Put, 100.0, 4.0, 101.0, 30),
/// ];
/// let group = UnderlyingGroup::new("U", date, 101.0, quotes).unwrap();
///
/// assert_eq!(group.maturities(), vec![30]);
/// assert!(group.find(OptionType::Put, 100.0, 30).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct UnderlyingGroup {
    underlying_id: String,
    valuation_date: NaiveDate,
    spot: f64,
    quotes: Vec<OptionQuote>,
}

impl UnderlyingGroup {
    /// Groups `quotes` under one underlying.
    ///
    /// # Errors
    /// - `UnderlyingMismatch` if a quote names another underlying
    /// - `SpotMismatch` if a quote's spot differs from `spot`
    /// - `DuplicateId` if two quotes share an id
    pub fn new(
        underlying_id: impl Into<String>,
        valuation_date: NaiveDate,
        spot: f64,
        quotes: Vec<OptionQuote>,
    ) -> Result<Self, QuoteError> {
        let underlying_id = underlying_id.into();
        let mut seen = HashSet::with_capacity(quotes.len());

        for quote in &quotes {
            if quote.underlying_id() != underlying_id {
                return Err(QuoteError::UnderlyingMismatch {
                    id: quote.id().to_string(),
                    expected: underlying_id,
                    got: quote.underlying_id().to_string(),
                });
            }
            if quote.spot() != spot {
                return Err(QuoteError::SpotMismatch {
                    id: quote.id().to_string(),
                    expected: spot,
                    got: quote.spot(),
                });
            }
            if !seen.insert(quote.id()) {
                return Err(QuoteError::DuplicateId(quote.id().to_string()));
            }
        }

        Ok(Self {
            underlying_id,
            valuation_date,
            spot,
            quotes,
        })
    }

    /// Underlying instrument id.
    pub fn underlying_id(&self) -> &str {
        &self.underlying_id
    }

    /// Valuation date shared by every quote.
    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// Spot shared by every quote.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// All quotes, in construction order.
    pub fn quotes(&self) -> &[OptionQuote] {
        &self.quotes
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the group holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Distinct days-to-maturity, shortest first.
    pub fn maturities(&self) -> Vec<i64> {
        self.quotes
            .iter()
            .map(OptionQuote::days_to_maturity)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Quotes expiring in `days_to_maturity` days.
    pub fn quotes_for_maturity(
        &self,
        days_to_maturity: i64,
    ) -> impl Iterator<Item = &OptionQuote> + '_ {
        self.quotes
            .iter()
            .filter(move |q| q.days_to_maturity() == days_to_maturity)
    }

    /// Distinct strikes across all maturities, ascending.
    pub fn strikes(&self) -> Vec<f64> {
        sorted_strikes(self.quotes.iter())
    }

    /// Distinct strikes listed for one maturity, ascending.
    pub fn strikes_for_maturity(&self, days_to_maturity: i64) -> Vec<f64> {
        sorted_strikes(self.quotes_for_maturity(days_to_maturity))
    }

    /// Quote with the given type, strike and maturity, if listed.
    pub fn find(
        &self,
        option_type: OptionType,
        strike: f64,
        days_to_maturity: i64,
    ) -> Option<&OptionQuote> {
        self.quotes.iter().find(|q| {
            q.option_type() == option_type
                && q.strike() == strike
                && q.days_to_maturity() == days_to_maturity
        })
    }
}

fn sorted_strikes<'a>(quotes: impl Iterator<Item = &'a OptionQuote>) -> Vec<f64> {
    let mut strikes: Vec<f64> = quotes.map(OptionQuote::strike).collect();
    strikes.sort_by(f64::total_cmp);
    strikes.dedup();
    strikes
}
