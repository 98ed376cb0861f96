//! Per-instrument and per-date error types.

use chrono::NaiveDate;
use pricer_core::market_data::MarketDataError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::forward::ForwardError;
use pricer_models::moneyness::MoneynessError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failure confined to one instrument.
///
/// These never abort a batch: the instrument is listed in
/// [`BatchReport::failures`](crate::BatchReport::failures) (no result) or
/// [`BatchReport::warnings`](crate::BatchReport::warnings) (result emitted
/// but unreliable) and the remaining instruments carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// A required input is absent.
    #[error("Data gap: missing {field}")]
    DataGap {
        /// Which input is missing
        field: String,
    },

    /// No sign-changing volatility bracket exists for the quote.
    #[error("Implied volatility bracket unresolvable on [{lower}, {upper}] after {attempts} expansions")]
    BoundsUnresolvable {
        /// Lower volatility at give-up
        lower: f64,
        /// Upper volatility at give-up
        upper: f64,
        /// Expansion attempts made
        attempts: usize,
    },

    /// Iteration budget exhausted; the emitted volatility is the last iterate.
    #[error("Implied volatility did not converge in {iterations} iterations")]
    NonConvergence {
        /// Iterations used
        iterations: usize,
    },

    /// Non-positive or non-finite spot, strike, expiry or price.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No tick-size policy for the underlying.
    #[error("Unsupported instrument class: {0}")]
    UnsupportedInstrumentClass(String),
}

impl From<AnalyticalError> for InstrumentError {
    fn from(err: AnalyticalError) -> Self {
        InstrumentError::InvalidInput(err.to_string())
    }
}

impl From<MoneynessError> for InstrumentError {
    fn from(err: MoneynessError) -> Self {
        match err {
            MoneynessError::UnsupportedInstrumentClass(id) => {
                InstrumentError::UnsupportedInstrumentClass(id)
            }
            other => InstrumentError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ForwardError> for InstrumentError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::NoData { days_to_maturity } => InstrumentError::DataGap {
                field: format!("implied forward for {}d maturity", days_to_maturity),
            },
            other => InstrumentError::InvalidInput(other.to_string()),
        }
    }
}

/// Error raised by a [`MarketDataProvider`](crate::MarketDataProvider).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Market data provider error: {0}")]
pub struct ProviderError(pub String);

/// Error raised by a [`GreeksSink`](crate::GreeksSink).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Sink error: {0}")]
pub struct SinkError(pub String);

/// Failure that aborts a whole valuation date.
#[derive(Error, Debug, Clone)]
pub enum BatchError {
    /// The yield curve is missing or empty.
    #[error("Yield curve unavailable for {date}")]
    CurveUnavailable {
        /// Valuation date
        date: NaiveDate,
    },

    /// Nothing left to price after expiry and underlying filters.
    #[error("No live instruments on {date}")]
    NoInstruments {
        /// Valuation date
        date: NaiveDate,
    },

    /// Market data retrieval failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Persistence failed.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Invalid batch configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The fetched curve knots are unusable.
    #[error("Yield curve error: {0}")]
    Curve(#[from] MarketDataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_no_data_becomes_data_gap() {
        let err: InstrumentError = ForwardError::NoData {
            days_to_maturity: 30,
        }
        .into();
        assert!(matches!(err, InstrumentError::DataGap { .. }));
        assert!(err.to_string().contains("30d"));
    }

    #[test]
    fn test_unsupported_class_is_preserved() {
        let err: InstrumentError =
            MoneynessError::UnsupportedInstrumentClass("IF2109".to_string()).into();
        assert_eq!(
            err,
            InstrumentError::UnsupportedInstrumentClass("IF2109".to_string())
        );
    }

    #[test]
    fn test_analytical_error_is_invalid_input() {
        let err: InstrumentError = AnalyticalError::InvalidExpiry { expiry: 0.0 }.into();
        assert!(matches!(err, InstrumentError::InvalidInput(_)));
    }

    #[test]
    fn test_batch_error_display() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        assert_eq!(
            BatchError::CurveUnavailable { date }.to_string(),
            "Yield curve unavailable for 2021-06-01"
        );
        assert_eq!(
            BatchError::from(ProviderError("timeout".to_string())).to_string(),
            "Market data provider error: timeout"
        );
    }
}
