//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`CubicSplineInterpolator`]: Natural cubic spline with C² continuity and
//!   tangent-line extrapolation beyond the knots
//!
//! ## Core Trait
//!
//! All 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`: Compute interpolated value
//! - `domain() -> (T, T)`: Return valid interpolation range
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
//!
//! let xs = [0.0_f64, 1.0, 2.0, 3.0];
//! let ys = [0.0_f64, 1.0, 4.0, 9.0];
//!
//! let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(spline.domain(), (0.0, 3.0));
//! assert!((spline.interpolate(2.0).unwrap() - 4.0).abs() < 1e-12);
//!
//! // Outside the knots the spline continues along its boundary tangent
//! assert!(spline.interpolate(3.5).is_err());
//! let slope = spline.derivative(3.0);
//! assert!((spline.evaluate(3.5) - (9.0 + 0.5 * slope)).abs() < 1e-12);
//! ```

mod cubic_spline;
mod traits;

pub use cubic_spline::CubicSplineInterpolator;
pub use traits::Interpolator;
