//! Moneyness classification errors.

use thiserror::Error;

/// Errors from ATM anchor selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoneynessError {
    /// No tick-size policy covers this underlying.
    #[error("Unsupported instrument class: no tick-size policy for {0}")]
    UnsupportedInstrumentClass(String),

    /// No listed strikes to anchor on.
    #[error("Empty strike ladder")]
    EmptyStrikeLadder,

    /// Spot is non-positive or not finite.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot
        spot: f64,
    },
}
