//! Batch output records.

use std::time::Duration;

use chrono::NaiveDate;
use pricer_models::instruments::OptionType;
use pricer_models::moneyness::MoneynessTag;
use serde::{Deserialize, Serialize};

use crate::error::InstrumentError;

/// How the implied volatility of a result was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultStatus {
    /// Solved within tolerance
    Converged {
        /// Brent iterations used
        iterations: usize,
    },
    /// Iteration budget exhausted; the vol is the last iterate
    NonConverged {
        /// Iterations used
        iterations: usize,
    },
    /// Copied from the opposite contract with the same strike and maturity
    FilledFromParity {
        /// Contract the vol was taken from
        donor_id: String,
    },
    /// No bracket could be found; the vol and Greeks are absent
    BoundsUnresolvable {
        /// Bracket widening steps taken
        attempts: usize,
    },
}

impl ResultStatus {
    /// Solver status code: 0 converged, 1 iteration budget exhausted,
    /// 2 unresolvable bounds.
    ///
    /// Parity-filled results report the donor's converged code.
    pub fn code(&self) -> u8 {
        match self {
            ResultStatus::Converged { .. } | ResultStatus::FilledFromParity { .. } => 0,
            ResultStatus::NonConverged { .. } => 1,
            ResultStatus::BoundsUnresolvable { .. } => 2,
        }
    }
}

/// Greeks for one contract on one valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    /// Contract id
    pub instrument_id: String,
    /// Underlying id
    pub underlying_id: String,
    /// Valuation date
    pub valuation_date: NaiveDate,
    /// Call or put
    pub option_type: OptionType,
    /// ATM/ITM/OTM tag
    pub moneyness: MoneynessTag,
    /// Strike
    pub strike: f64,
    /// Underlying spot
    pub spot: f64,
    /// Risk-free rate applied
    pub rate: f64,
    /// Dividend yield applied
    pub dividend_yield: f64,
    /// Time to maturity in years
    pub expiry: f64,
    /// Calendar days to expiry
    pub days_to_maturity: i64,
    /// Observed option price
    pub market_price: f64,
    /// Implied volatility, absent when the bracket was unresolvable
    pub implied_vol: Option<f64>,
    /// ∂V/∂S
    pub delta: Option<f64>,
    /// ∂²V/∂S²
    pub gamma: Option<f64>,
    /// ∂V/∂σ
    pub vega: Option<f64>,
    /// −∂V/∂T
    pub theta: Option<f64>,
    /// ∂V/∂r
    pub rho: Option<f64>,
    /// How the vol was obtained
    pub status: ResultStatus,
}

/// Counters and timing for one valuation date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Live contracts considered
    pub instruments: usize,
    /// Contracts dropped as expired
    pub expired_skipped: usize,
    /// Results emitted
    pub results: usize,
    /// Contracts without a result
    pub failures: usize,
    /// Results that converged
    pub converged: usize,
    /// Results at the iteration limit
    pub non_converged: usize,
    /// Results filled from the opposite contract
    pub filled: usize,
    /// Results emitted without a vol
    pub unresolved: usize,
    /// Wall time of the run
    pub elapsed: Duration,
    /// Whether solving fanned out across threads
    pub used_parallel: bool,
}

impl BatchStats {
    /// Wall time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Fraction of live contracts that produced a result.
    pub fn success_rate(&self) -> f64 {
        if self.instruments == 0 {
            0.0
        } else {
            self.results as f64 / self.instruments as f64
        }
    }
}

/// Everything one valuation date produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Valuation date
    pub valuation_date: NaiveDate,
    /// One result per priced contract, sorted by id
    pub results: Vec<GreeksResult>,
    /// Contracts that produced no result
    pub failures: Vec<(String, InstrumentError)>,
    /// Contracts whose result is emitted but flagged (non-converged or
    /// unresolvable)
    pub warnings: Vec<(String, InstrumentError)>,
    /// Counters
    pub stats: BatchStats,
}

impl BatchReport {
    /// Result for `instrument_id`, if any.
    pub fn result(&self, instrument_id: &str) -> Option<&GreeksResult> {
        self.results
            .binary_search_by(|r| r.instrument_id.as_str().cmp(instrument_id))
            .ok()
            .map(|i| &self.results[i])
    }

    /// Failure for `instrument_id`, if any.
    pub fn failure(&self, instrument_id: &str) -> Option<&InstrumentError> {
        self.failures
            .iter()
            .find(|(id, _)| id == instrument_id)
            .map(|(_, e)| e)
    }
}
