//! Quote construction errors.

use thiserror::Error;

/// Errors raised while assembling quotes into an [`UnderlyingGroup`](super::UnderlyingGroup).
///
/// # Examples
/// ```
/// use pricer_models::instruments::QuoteError;
///
/// let err = QuoteError::InvalidOptionType("X".to_string());
/// assert!(format!("{}", err).contains("X"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// Option type code other than call/put.
    #[error("Invalid option type: {0:?}")]
    InvalidOptionType(String),

    /// Quote belongs to a different underlying than its group.
    #[error("Quote {id} references underlying {got}, group is {expected}")]
    UnderlyingMismatch {
        /// Instrument id
        id: String,
        /// Group underlying id
        expected: String,
        /// Quote underlying id
        got: String,
    },

    /// Quote carries a different spot than its group.
    #[error("Quote {id} has spot {got}, group spot is {expected}")]
    SpotMismatch {
        /// Instrument id
        id: String,
        /// Group spot
        expected: f64,
        /// Quote spot
        got: f64,
    },

    /// Same instrument id appears twice.
    #[error("Duplicate instrument id: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_mismatch_display() {
        let err = QuoteError::SpotMismatch {
            id: "10001".to_string(),
            expected: 2.5,
            got: 2.6,
        };
        assert_eq!(
            format!("{}", err),
            "Quote 10001 has spot 2.6, group spot is 2.5"
        );
    }
}
