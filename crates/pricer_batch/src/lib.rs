//! # Pricer Batch (L3: Orchestration)
//!
//! Daily implied volatility and Greeks for every live listed option.
//!
//! This crate provides:
//! - A [`MarketDataProvider`] seam for instrument metadata, spots, option
//!   prices and the money-market curve
//! - A [`GreeksSink`] seam for upserting results
//! - [`BatchConfig`], loaded from TOML with `GREEKS_*` environment overrides
//! - [`GreeksBatch`], the per-date pipeline: moneyness, rates, implied
//!   volatility, parity fill of degenerate vols, Greeks
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_batch (L3)            │
//! │  provider -> engine -> vol_fill -> sink │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  BS analytics, IV, moneyness, forwards  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)             │
//! │  Brent, cubic spline, curve, day count  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Instrument-level problems never abort a date; they are collected in the
//! [`BatchReport`]. Only a missing curve, an empty instrument set or a
//! failing provider or sink stops a date, and [`GreeksBatch::run_dates`]
//! moves on to the next one.
//!
//! Logging goes through `tracing`; installing a subscriber is up to the
//! host binary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod parallel;
pub mod provider;
pub mod result;
pub mod sink;
pub mod vol_fill;

pub use config::{BatchConfig, ConfigError, RateSource};
pub use engine::GreeksBatch;
pub use error::{BatchError, InstrumentError, ProviderError, SinkError};
pub use provider::{InMemoryProvider, InstrumentRecord, MarketDataProvider};
pub use result::{BatchReport, BatchStats, GreeksResult, ResultStatus};
pub use sink::{GreeksSink, InMemorySink};
