//! # Pricer Models (L2: Option Analytics)
//!
//! Closed-form Black-Scholes analytics and the quote-level logic that feeds
//! them.
//!
//! This crate provides:
//! - Normal distribution functions, stable at extreme arguments
//! - Black-Scholes prices and Greeks with a continuous dividend yield
//! - Implied volatility by bracket expansion and Brent's method
//! - Option quotes and per-underlying quote groups
//! - ATM/ITM/OTM classification from exchange tick-size tables
//! - Put-call-parity implied forwards and implied rates
//!
//! ## Design Principles
//!
//! - **Enum-tagged option type** with a single branch per formula
//! - **Typed outcomes** instead of NaN sentinels for solver failures
//! - **Pure functions**: nothing here logs, allocates globals, or does I/O
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::{BlackScholes, ImpliedVolSolver};
//! use pricer_models::instruments::OptionType;
//!
//! let bs = BlackScholes::new(100.0, 0.02, 0.0, 0.25).unwrap();
//! let price = bs.price(OptionType::Call, 105.0, 0.5);
//!
//! let solver = ImpliedVolSolver::default();
//! let outcome = solver
//!     .solve(OptionType::Call, price, 100.0, 105.0, 0.02, 0.0, 0.5)
//!     .unwrap();
//! assert!((outcome.value().unwrap() - 0.25).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod forward;
pub mod instruments;
pub mod moneyness;
