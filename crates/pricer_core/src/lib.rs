//! # pricer_core: Numerical Foundation for Option Analytics
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Bracketed root-finding with outward bracket expansion (`math::solvers`)
//! - Natural cubic spline interpolation (`math::interpolators`)
//! - Benchmark yield curves over tenor-day knots (`market_data`)
//! - Day count conventions and time to maturity (`types::time`)
//! - Error types: `InterpolationError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::YieldCurve;
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//! use pricer_core::types::time_to_maturity;
//! use chrono::NaiveDate;
//!
//! let valuation = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2024, 5, 30).unwrap();
//! let t = time_to_maturity(valuation, expiry);
//!
//! let curve = YieldCurve::new(&[(1.0, 0.015), (90.0, 0.020), (360.0, 0.023)]).unwrap();
//! let r = curve.rate_for_days(90.0);
//!
//! // Continuous rate that discounts to 0.995 over t
//! let solver = BrentSolver::new(SolverConfig::default());
//! let implied = solver.find_root(|x: f64| (-x * t).exp() - 0.995, 0.0, 1.0).unwrap();
//! assert!(implied > 0.0 && r > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for day counts, tenors, solver status and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
