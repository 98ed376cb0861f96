//! Market data structures.
//!
//! # Components
//!
//! - [`curves`]: Benchmark tenors and the spline-interpolated [`YieldCurve`]
//! - [`error`]: Market data error types ([`MarketDataError`])
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{StandardTenor, YieldCurve};
//!
//! let quotes = [
//!     (StandardTenor::Overnight, 0.0150),
//!     (StandardTenor::OneMonth, 0.0185),
//!     (StandardTenor::ThreeMonths, 0.0201),
//!     (StandardTenor::OneYear, 0.0230),
//! ];
//! let curve = YieldCurve::from_standard_tenors(&quotes).unwrap();
//! assert!((curve.rate_for_days(30.0) - 0.0185).abs() < 1e-15);
//! ```

pub mod curves;
pub mod error;

pub use curves::{StandardTenor, YieldCurve};
pub use error::MarketDataError;
