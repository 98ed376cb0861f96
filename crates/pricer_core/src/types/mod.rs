//! Core time and error types.
//!
//! This module provides:
//! - `time`: Day count conventions and time-to-maturity helpers
//! - `error`: Structured error types for pricing, interpolation, and solver operations
//!
//! # Re-exports
//!
//! - [`DayCountConvention`], [`days_to_maturity`], [`time_to_maturity`] from `time`
//! - [`InterpolationError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

pub use error::{InterpolationError, SolverError};
pub use time::{days_to_maturity, time_to_maturity, DayCountConvention};
