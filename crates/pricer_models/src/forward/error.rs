//! Forward estimation errors.

use thiserror::Error;

/// Errors from the put-call-parity forward estimator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForwardError {
    /// No usable call/put pair for the maturity.
    #[error("No data: no usable call/put pair for maturity {days_to_maturity}d")]
    NoData {
        /// Maturity in calendar days
        days_to_maturity: i64,
    },

    /// Non-positive or non-finite time to maturity.
    #[error("Invalid time to maturity: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry, in years
        expiry: f64,
    },

    /// Non-positive or non-finite spot.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot
        spot: f64,
    },
}
