//! Market data access.
//!
//! The batch never talks to a data vendor directly: everything it needs for
//! a valuation date comes through a [`MarketDataProvider`].

use std::collections::HashMap;

use chrono::NaiveDate;
use pricer_models::instruments::OptionType;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Static description of one listed option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Contract id
    pub id: String,
    /// Underlying id
    pub underlying_id: String,
    /// Call or put
    pub option_type: OptionType,
    /// Strike
    pub strike: f64,
    /// Last trading (de-listing) date
    pub expiry_date: NaiveDate,
}

impl InstrumentRecord {
    /// Creates a record.
    pub fn new(
        id: impl Into<String>,
        underlying_id: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            underlying_id: underlying_id.into(),
            option_type,
            strike,
            expiry_date,
        }
    }

    /// True while the contract trades on `date`.
    pub fn is_live(&self, date: NaiveDate) -> bool {
        self.expiry_date > date
    }
}

/// Source of per-date market data.
///
/// Absent values are simply missing from the returned maps; the batch
/// turns them into per-instrument data gaps. An `Err` means the source
/// itself failed and aborts the date.
pub trait MarketDataProvider: Send + Sync {
    /// Every contract listed on `date`, live or not.
    fn instrument_metadata(&self, date: NaiveDate) -> Result<Vec<InstrumentRecord>, ProviderError>;

    /// Closing spot per underlying id.
    fn spot_prices(
        &self,
        underlying_ids: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, ProviderError>;

    /// Closing option price per contract id.
    fn option_quotes(
        &self,
        instrument_ids: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, ProviderError>;

    /// `(tenor days, annual rate)` knots for the requested tenors.
    ///
    /// Rates are decimals. An empty vector means no curve was published.
    fn yield_curve(
        &self,
        date: NaiveDate,
        tenor_days: &[u32],
    ) -> Result<Vec<(f64, f64)>, ProviderError>;
}

/// Provider backed by in-process maps.
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_batch::{InMemoryProvider, InstrumentRecord, MarketDataProvider};
/// use pricer_models::instruments::OptionType;
///
/// let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2021, 6, 23).unwrap();
///
/// let provider = InMemoryProvider::new()
///     .with_instrument(InstrumentRecord::new("c1", "510050.XSHG", OptionType::Call, 3.5, expiry))
///     .with_spot(date, "510050.XSHG", 3.52)
///     .with_quote(date, "c1", 0.061);
///
/// assert_eq!(provider.instrument_metadata(date).unwrap().len(), 1);
/// let quotes = provider.option_quotes(&["c1".to_string()], date).unwrap();
/// assert_eq!(quotes["c1"], 0.061);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    instruments: Vec<InstrumentRecord>,
    spots: HashMap<(NaiveDate, String), f64>,
    quotes: HashMap<(NaiveDate, String), f64>,
    curves: HashMap<NaiveDate, Vec<(u32, f64)>>,
    failing_dates: Vec<NaiveDate>,
}

impl InMemoryProvider {
    /// Empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contract to the metadata listing.
    pub fn with_instrument(mut self, record: InstrumentRecord) -> Self {
        self.instruments.push(record);
        self
    }

    /// Sets an underlying's spot on `date`.
    pub fn with_spot(mut self, date: NaiveDate, underlying_id: impl Into<String>, spot: f64) -> Self {
        self.spots.insert((date, underlying_id.into()), spot);
        self
    }

    /// Sets a contract's market price on `date`.
    pub fn with_quote(mut self, date: NaiveDate, instrument_id: impl Into<String>, price: f64) -> Self {
        self.quotes.insert((date, instrument_id.into()), price);
        self
    }

    /// Sets the curve knots on `date` as `(tenor days, rate)`.
    pub fn with_curve(mut self, date: NaiveDate, knots: &[(u32, f64)]) -> Self {
        self.curves.insert(date, knots.to_vec());
        self
    }

    /// Makes every call for `date` fail.
    pub fn with_failure(mut self, date: NaiveDate) -> Self {
        self.failing_dates.push(date);
        self
    }

    fn check(&self, date: NaiveDate) -> Result<(), ProviderError> {
        if self.failing_dates.contains(&date) {
            Err(ProviderError(format!("source unavailable for {}", date)))
        } else {
            Ok(())
        }
    }

    fn lookup(
        map: &HashMap<(NaiveDate, String), f64>,
        ids: &[String],
        date: NaiveDate,
    ) -> HashMap<String, f64> {
        ids.iter()
            .filter_map(|id| map.get(&(date, id.clone())).map(|&v| (id.clone(), v)))
            .collect()
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn instrument_metadata(&self, date: NaiveDate) -> Result<Vec<InstrumentRecord>, ProviderError> {
        self.check(date)?;
        Ok(self.instruments.clone())
    }

    fn spot_prices(
        &self,
        underlying_ids: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, ProviderError> {
        self.check(date)?;
        Ok(Self::lookup(&self.spots, underlying_ids, date))
    }

    fn option_quotes(
        &self,
        instrument_ids: &[String],
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, ProviderError> {
        self.check(date)?;
        Ok(Self::lookup(&self.quotes, instrument_ids, date))
    }

    fn yield_curve(
        &self,
        date: NaiveDate,
        tenor_days: &[u32],
    ) -> Result<Vec<(f64, f64)>, ProviderError> {
        self.check(date)?;
        let knots = self
            .curves
            .get(&date)
            .map(|knots| {
                knots
                    .iter()
                    .filter(|(days, _)| tenor_days.contains(days))
                    .map(|&(days, rate)| (f64::from(days), rate))
                    .collect()
            })
            .unwrap_or_default();
        Ok(knots)
    }
}
