//! Numerical building blocks: root-finding and interpolation.
//!
//! - [`solvers`]: Brent's method with outward bracket expansion
//! - [`interpolators`]: Natural cubic spline

pub mod interpolators;
pub mod solvers;
