//! Result persistence.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::SinkError;
use crate::result::GreeksResult;

/// Destination for batch results.
///
/// Writes are upserts keyed by `(instrument id, valuation date)`, so
/// re-running a date replaces its earlier records.
pub trait GreeksSink {
    /// Stores `results`, returning how many records were written.
    fn upsert(&mut self, results: &[GreeksResult]) -> Result<usize, SinkError>;
}

/// Sink holding results in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    records: BTreeMap<(String, NaiveDate), GreeksResult>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for a contract and date.
    pub fn get(&self, instrument_id: &str, date: NaiveDate) -> Option<&GreeksResult> {
        self.records.get(&(instrument_id.to_string(), date))
    }

    /// Records stored for `date`, in id order.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&GreeksResult> {
        self.records
            .values()
            .filter(|r| r.valuation_date == date)
            .collect()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GreeksSink for InMemorySink {
    fn upsert(&mut self, results: &[GreeksResult]) -> Result<usize, SinkError> {
        for result in results {
            self.records.insert(
                (result.instrument_id.clone(), result.valuation_date),
                result.clone(),
            );
        }
        Ok(results.len())
    }
}
