//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to Black-Scholes inputs and the
//!   implied-volatility solver

use pricer_core::types::SolverError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Every variant describes an input that makes the closed-form formulas
/// undefined, so the affected instrument fails fast instead of producing
/// an infinite or NaN sensitivity.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive or non-finite).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive or non-finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to maturity (non-positive or non-finite).
    #[error("Invalid time to maturity: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry, in years
        expiry: f64,
    },

    /// Quoted price that cannot be inverted (negative or non-finite).
    #[error("Invalid target price: {price}")]
    InvalidPrice {
        /// The invalid price
        price: f64,
    },

    /// Root-finder rejected its configuration or objective.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}
