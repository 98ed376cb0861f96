//! Listed option quotes.
//!
//! - [`OptionType`]: call/put tag, one branch per formula downstream
//! - [`OptionQuote`]: one contract's snapshot on a valuation date
//! - [`UnderlyingGroup`]: an option chain sharing spot and date

mod error;
mod group;
mod option_type;
mod quote;

pub use error::QuoteError;
pub use group::UnderlyingGroup;
pub use option_type::OptionType;
pub use quote::OptionQuote;
