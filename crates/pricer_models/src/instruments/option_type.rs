//! Call/put tag carried by every quote.

use std::fmt;
use std::str::FromStr;

use super::error::QuoteError;

/// European option type.
///
/// Exchange feeds tag contracts with `"C"` and `"P"`; both the short codes
/// and the words `call`/`put` (any case) parse.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// let call: OptionType = "C".parse().unwrap();
/// assert_eq!(call, OptionType::Call);
/// assert_eq!(call.opposite(), OptionType::Put);
/// assert_eq!(call.code(), 'C');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy at the strike.
    #[cfg_attr(feature = "serde", serde(rename = "C", alias = "call"))]
    Call,
    /// Right to sell at the strike.
    #[cfg_attr(feature = "serde", serde(rename = "P", alias = "put"))]
    Put,
}

impl OptionType {
    /// Exchange code: `'C'` or `'P'`.
    #[inline]
    pub fn code(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }

    /// The other leg of a put-call pair.
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }

    /// Returns `true` for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl FromStr for OptionType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            _ => Err(QuoteError::InvalidOptionType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}
