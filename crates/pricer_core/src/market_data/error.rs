//! Market data error types.

use crate::types::InterpolationError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InsufficientData`: Not enough knots for construction
/// - `NonIncreasingTenor`: Knot tenors are not strictly increasing
/// - `InvalidTenor`: Negative or non-finite tenor
/// - `InvalidRate`: Non-finite rate
/// - `Interpolation`: Wrapped interpolation error
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::NonIncreasingTenor { index: 2, tenor: 30.0 };
/// assert!(format!("{}", err).contains("index 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Tenor at `index` does not exceed its predecessor.
    #[error("Tenor {tenor} at index {index} is not strictly increasing")]
    NonIncreasingTenor {
        /// Position of the offending knot
        index: usize,
        /// The offending tenor
        tenor: f64,
    },

    /// Tenor is negative or not finite.
    #[error("Invalid tenor: {tenor}")]
    InvalidTenor {
        /// The invalid tenor
        tenor: f64,
    },

    /// Rate is not finite.
    #[error("Invalid rate {rate} at tenor {tenor}")]
    InvalidRate {
        /// Tenor of the offending knot
        tenor: f64,
        /// The invalid rate
        rate: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}
