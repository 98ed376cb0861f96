//! Benchmark yield curves.
//!
//! - [`StandardTenor`]: Benchmark tenor labels and their day counts
//! - [`YieldCurve`]: Natural cubic spline over (days, rate) knots

mod tenor;
mod yield_curve;

pub use tenor::StandardTenor;
pub use yield_curve::YieldCurve;
