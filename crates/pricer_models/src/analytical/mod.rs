//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Standard normal CDF/PDF, stable in the tails
//! - Black-Scholes-Merton prices and Greeks with dividend yield
//! - Implied volatility by bracket expansion and Brent's method
//!
//! ## Design Principles
//!
//! - **`f64` throughout**: inputs are exchange quotes, not AD tapes
//! - **One branch per formula** on [`OptionType`](crate::instruments::OptionType)
//! - **Checked entry points** (`greeks`, `ImpliedVolSolver::solve`) reject
//!   non-positive spot, strike, expiry and volatility before evaluating

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::{ImpliedVolConfig, ImpliedVolSolver};
