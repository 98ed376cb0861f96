//! Natural cubic spline interpolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Polynomial coefficients for a cubic spline segment.
///
/// Represents a cubic polynomial: `y = a + b*(x-xi) + c*(x-xi)² + d*(x-xi)³`
#[derive(Debug, Clone, Copy)]
struct SplineCoeffs<T: Float> {
    a: T,
    b: T,
    c: T,
    d: T,
}

impl<T: Float> SplineCoeffs<T> {
    #[inline]
    fn value(&self, dx: T) -> T {
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }

    #[inline]
    fn slope(&self, dx: T) -> T {
        let two = T::one() + T::one();
        let three = two + T::one();
        self.b + dx * (two * self.c + three * self.d * dx)
    }
}

/// Natural cubic spline interpolator with C² continuity.
///
/// Second derivatives at the first and last knot are zero. The interior
/// second derivatives solve the usual tridiagonal system, eliminated with
/// the Thomas algorithm.
///
/// [`interpolate`](Interpolator::interpolate) is strict on the knot range.
/// [`evaluate`](Self::evaluate) is total: below the first knot and at or
/// above the last knot it follows the tangent line at that boundary knot
/// instead of the boundary cubic.
///
/// # Construction
///
/// Data points are sorted by x-coordinate during construction. At least
/// 2 points are required (two points give a straight line); duplicate
/// abscissae are rejected.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, CubicSplineInterpolator};
///
/// let xs = [1.0_f64, 30.0, 90.0, 180.0];
/// let ys = [0.018_f64, 0.021, 0.023, 0.024];
///
/// let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
/// assert!((spline.interpolate(30.0).unwrap() - 0.021).abs() < 1e-15);
/// assert!(spline.evaluate(365.0).is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    coeffs: Vec<SplineCoeffs<T>>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Construct a natural cubic spline from x and y data points.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InsufficientData)` - Fewer than 2 data points
    /// * `Err(InterpolationError::InvalidInput)` - Mismatched lengths or non-finite data
    /// * `Err(InterpolationError::NonMonotonicData)` - Repeated x-coordinate
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::interpolators::CubicSplineInterpolator;
    ///
    /// assert!(CubicSplineInterpolator::new(&[0.0_f64, 1.0], &[0.0, 1.0]).is_ok());
    /// assert!(CubicSplineInterpolator::new(&[0.0_f64], &[0.0]).is_err());
    /// assert!(CubicSplineInterpolator::new(&[0.0_f64, 1.0, 1.0], &[0.0, 1.0, 2.0]).is_err());
    /// ```
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "data points must be finite".to_string(),
            ));
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (sorted_xs, sorted_ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();

        if let Some(index) = sorted_xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        let coeffs = Self::compute_coefficients(&sorted_xs, &sorted_ys);

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
            coeffs,
        })
    }

    /// Second derivatives at the knots, natural boundary.
    fn second_derivatives(xs: &[T], ys: &[T], h: &[T]) -> Vec<T> {
        let n = xs.len();
        let mut m = vec![T::zero(); n];
        if n < 3 {
            return m;
        }

        let two = T::one() + T::one();
        let six = two + two + two;
        let interior = n - 2;

        // Row j (knot j + 1): h[j] M[j] + 2 (h[j] + h[j+1]) M[j+1] + h[j+1] M[j+2] = rhs[j]
        let mut c_prime: Vec<T> = Vec::with_capacity(interior);
        let mut d_prime: Vec<T> = Vec::with_capacity(interior);

        for j in 0..interior {
            let sub = h[j];
            let diag = two * (h[j] + h[j + 1]);
            let sup = if j + 1 < interior { h[j + 1] } else { T::zero() };
            let rhs = six * ((ys[j + 2] - ys[j + 1]) / h[j + 1] - (ys[j + 1] - ys[j]) / h[j]);

            if j == 0 {
                c_prime.push(sup / diag);
                d_prime.push(rhs / diag);
            } else {
                let denom = diag - sub * c_prime[j - 1];
                c_prime.push(sup / denom);
                d_prime.push((rhs - sub * d_prime[j - 1]) / denom);
            }
        }

        m[interior] = d_prime[interior - 1];
        for j in (0..interior - 1).rev() {
            m[j + 1] = d_prime[j] - c_prime[j] * m[j + 2];
        }
        m
    }

    fn compute_coefficients(xs: &[T], ys: &[T]) -> Vec<SplineCoeffs<T>> {
        let n = xs.len();
        let two = T::one() + T::one();
        let six = two + two + two;

        let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let m = Self::second_derivatives(xs, ys, &h);

        (0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (two * m[i] + m[i + 1]) / six,
                c: m[i] / two,
                d: (m[i + 1] - m[i]) / (six * h[i]),
            })
            .collect()
    }

    /// Returns the index `i` such that `xs[i] <= x < xs[i+1]`,
    /// clamped to valid segment range [0, n-2].
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }

    fn last(&self) -> usize {
        self.xs.len() - 1
    }

    /// Evaluate anywhere on the real line.
    ///
    /// Inside `[x_0, x_n)` this is the cubic piece; outside it is the tangent
    /// line at the nearer boundary knot. NaN propagates.
    pub fn evaluate(&self, x: T) -> T {
        let last = self.last();
        if x < self.xs[0] {
            return self.ys[0] + self.derivative(self.xs[0]) * (x - self.xs[0]);
        }
        if x >= self.xs[last] {
            return self.ys[last] + self.derivative(self.xs[last]) * (x - self.xs[last]);
        }
        let i = self.find_segment(x);
        self.coeffs[i].value(x - self.xs[i])
    }

    /// First derivative of the spline.
    ///
    /// Constant outside the knot range, matching [`evaluate`](Self::evaluate).
    pub fn derivative(&self, x: T) -> T {
        let last = self.last();
        if x <= self.xs[0] {
            return self.coeffs[0].b;
        }
        if x >= self.xs[last] {
            let i = last - 1;
            return self.coeffs[i].slope(self.xs[last] - self.xs[i]);
        }
        let i = self.find_segment(x);
        self.coeffs[i].slope(x - self.xs[i])
    }

    /// Returns a reference to the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns a reference to the y-values in sorted-x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false: construction requires at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    /// Interpolate value at point `x` on the knot range.
    ///
    /// The last knot returns its input value exactly.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x >= x_min && x <= x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.evaluate(x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.last()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_with_two_points_is_linear() {
        let interp = CubicSplineInterpolator::new(&[0.0_f64, 2.0], &[1.0, 5.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 2.0, epsilon = 1e-14);
        assert_relative_eq!(interp.evaluate(-1.0), -1.0, epsilon = 1e-14);
        assert_relative_eq!(interp.evaluate(3.0), 7.0, epsilon = 1e-14);
    }

    #[test]
    fn test_new_insufficient_data_one_point() {
        match CubicSplineInterpolator::new(&[1.0], &[2.0]).unwrap_err() {
            InterpolationError::InsufficientData { got, need } => {
                assert_eq!(got, 1);
                assert_eq!(need, 2);
            }
            other => panic!("Expected InsufficientData error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_mismatched_lengths() {
        match CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0]).unwrap_err() {
            InterpolationError::InvalidInput(msg) => assert!(msg.contains("same length")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_x() {
        let result = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 1.0, 2.0], &[0.0, 1.0, 1.5, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonMonotonicData { index: 2 }
        );
    }

    #[test]
    fn test_new_rejects_nan() {
        let result = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, f64::NAN, 2.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_new_auto_sorts_unsorted_data() {
        let interp =
            CubicSplineInterpolator::new(&[3.0, 1.0, 2.0, 0.0], &[9.0, 1.0, 4.0, 0.0]).unwrap();
        assert_eq!(interp.xs(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(interp.ys(), &[0.0, 1.0, 4.0, 9.0]);
    }

    // ========================================
    // Interpolation Tests
    // ========================================

    #[test]
    fn test_interpolate_at_knot_points() {
        let xs = [1.0, 30.0, 60.0, 90.0, 180.0, 270.0, 360.0];
        let ys = [0.0150, 0.0185, 0.0192, 0.0201, 0.0215, 0.0222, 0.0230];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_three_point_middle_curvature() {
        // Single interior knot: M1 = 6 * (4 - 2) / (2 * 2) = 3
        let interp = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        // s(0.5) = 0 + b*0.5 + d*0.125 with b = 1 - 3/6 = 0.5, d = 3/6 = 0.5
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 0.3125, epsilon = 1e-14);
        assert_relative_eq!(interp.derivative(1.0), 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_linear_data_is_reproduced() {
        let interp =
            CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0]).unwrap();
        for x in [0.25, 0.5, 1.5, 2.5, 2.99] {
            assert_relative_eq!(interp.interpolate(x).unwrap(), x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_interpolate_out_of_bounds() {
        let interp = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        match interp.interpolate(2.1).unwrap_err() {
            InterpolationError::OutOfBounds { x, min, max } => {
                assert_relative_eq!(x, 2.1);
                assert_eq!(min, 0.0);
                assert_eq!(max, 2.0);
            }
            other => panic!("Expected OutOfBounds error, got {:?}", other),
        }
        assert!(interp.interpolate(-0.1).is_err());
        assert!(interp.interpolate(f64::NAN).is_err());
    }

    // ========================================
    // Extrapolation Tests
    // ========================================

    #[test]
    fn test_extrapolation_follows_boundary_tangent() {
        let interp =
            CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();

        let left_slope = interp.derivative(0.0);
        let right_slope = interp.derivative(3.0);

        assert_relative_eq!(interp.evaluate(-2.0), -2.0 * left_slope, epsilon = 1e-12);
        assert_relative_eq!(
            interp.evaluate(5.0),
            9.0 + 2.0 * right_slope,
            epsilon = 1e-12
        );
        // Straight line: second difference vanishes
        let d2 = interp.evaluate(6.0) - 2.0 * interp.evaluate(5.0) + interp.evaluate(4.0);
        assert!(d2.abs() < 1e-12);
    }

    #[test]
    fn test_extrapolation_is_continuous_at_boundaries() {
        let interp =
            CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
        let eps = 1e-9;
        assert!((interp.evaluate(-eps) - interp.evaluate(eps)).abs() < 1e-7);
        assert!((interp.evaluate(3.0 - eps) - interp.evaluate(3.0 + eps)).abs() < 1e-7);
    }

    #[test]
    fn test_evaluate_propagates_nan() {
        let interp = CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        assert!(interp.evaluate(f64::NAN).is_nan());
    }

    // ========================================
    // Continuity Tests
    // ========================================

    #[test]
    fn test_first_derivative_continuous_at_interior_knots() {
        let xs = [0.0, 1.0, 2.5, 3.0, 4.0];
        let ys = [0.0, 1.0, 4.0, 9.0, 16.0];
        let interp = CubicSplineInterpolator::new(&xs, &ys).unwrap();

        for &knot in &xs[1..xs.len() - 1] {
            let h = 1e-6;
            let y_left = interp.interpolate(knot - h).unwrap();
            let y_mid = interp.interpolate(knot).unwrap();
            let y_right = interp.interpolate(knot + h).unwrap();

            let d_left = (y_mid - y_left) / h;
            let d_right = (y_right - y_mid) / h;
            assert!(
                (d_right - d_left).abs() < 1e-3,
                "First derivative discontinuity at knot {}: left={}, right={}",
                knot,
                d_left,
                d_right
            );
        }
    }

    #[test]
    fn test_natural_boundary_conditions() {
        let interp =
            CubicSplineInterpolator::new(&[0.0_f64, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
        let h = 1e-3;
        for x0 in [0.0, 3.0 - 2.0 * h] {
            let y0 = interp.interpolate(x0).unwrap();
            let y1 = interp.interpolate(x0 + h).unwrap();
            let y2 = interp.interpolate(x0 + 2.0 * h).unwrap();
            let d2 = (y2 - 2.0 * y1 + y0) / (h * h);
            assert!(d2.abs() < 0.05, "curvature at boundary: {}", d2);
        }
    }

    #[test]
    fn test_with_f32() {
        let interp =
            CubicSplineInterpolator::new(&[0.0_f32, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
        assert!(interp.interpolate(1.5_f32).unwrap().is_finite());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn knots() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
            prop::collection::vec((1.0f64..60.0, -0.05f64..0.10), 2..9).prop_map(|steps| {
                let mut x = 0.0;
                let mut xs = Vec::with_capacity(steps.len());
                let mut ys = Vec::with_capacity(steps.len());
                for (dx, y) in steps {
                    x += dx;
                    xs.push(x);
                    ys.push(y);
                }
                (xs, ys)
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_reproduces_knots((xs, ys) in knots()) {
                let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
                for (x, y) in xs.iter().zip(ys.iter()) {
                    prop_assert!((spline.interpolate(*x).unwrap() - y).abs() < 1e-12);
                }
            }

            #[test]
            fn test_derivative_matches_finite_difference((xs, ys) in knots(), t in 0.01f64..0.99) {
                let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
                let (lo, hi) = spline.domain();
                let x = lo + t * (hi - lo);
                let h = 1e-6;
                let fd = (spline.evaluate(x + h) - spline.evaluate(x - h)) / (2.0 * h);
                prop_assert!((fd - spline.derivative(x)).abs() < 1e-5);
            }
        }
    }
}
