//! Bracketed root-finding.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Inverse quadratic interpolation with secant and
//!   bisection fallbacks; no derivative required
//! - [`BracketExpander`]: Widens an interval until the objective changes sign
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Bracket width and residual tolerance (default: 1e-7)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Outcomes
//!
//! [`BrentSolver::find_root`] returns `Result<T, SolverError>` for callers
//! that treat non-convergence as an error. [`BrentSolver::solve`] returns a
//! [`SolverOutcome`] that keeps the last iterate on exhaustion and reports
//! an unresolvable bracket without failing.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{
//!     BracketExpander, BrentSolver, ExpansionPolicy, SolverConfig, SolverStatus,
//! };
//!
//! let solver = BrentSolver::new(SolverConfig::default())
//!     .with_expansion(BracketExpander::new(ExpansionPolicy::Doubling, 100).with_floor(0.0));
//!
//! let outcome = solver.solve(|x: f64| x * x - 9.0, 0.5, 1.0).unwrap();
//! assert_eq!(outcome.status(), SolverStatus::Converged);
//! assert!((outcome.value().unwrap() - 3.0).abs() < 1e-7);
//! ```

mod bracket;
mod brent;
mod config;
mod outcome;

pub use bracket::{BracketExpander, ExpansionPolicy};
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use outcome::{SolverOutcome, SolverStatus};
