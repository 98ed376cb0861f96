//! ATM/ITM/OTM classification.
//!
//! Exchanges list strikes on a price-tier-dependent grid. The ATM anchor is
//! spot rounded onto that grid, or the nearest listed strike when the
//! rounded value is not listed. Every contract then gets exactly one
//! [`MoneynessTag`] from its strike, the anchor and its option type.

mod classifier;
mod error;
mod tick;

pub use classifier::{nearest_strike, tag_quotes, MoneynessClassifier, MoneynessTag};
pub use error::MoneynessError;
pub use tick::UnderlyingClass;
