//! Spline-interpolated benchmark yield curve.

use super::StandardTenor;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::CubicSplineInterpolator;
use crate::types::DayCountConvention;

/// Benchmark yield curve over (tenor-in-days, rate) knots.
///
/// Built once per valuation date and read-only afterwards, so it can be
/// shared by reference across worker threads. Rates are returned in the
/// same units they were supplied in.
///
/// Between knots the curve is a natural cubic spline. Below the first
/// knot and at or beyond the last knot it extends along the spline's
/// tangent at that knot.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::YieldCurve;
///
/// let curve = YieldCurve::new(&[(1.0, 0.015), (90.0, 0.020), (360.0, 0.023)]).unwrap();
///
/// assert!((curve.rate_for_days(90.0) - 0.020).abs() < 1e-15);
/// let r45 = curve.rate_for_days(45.0);
/// assert!(r45 > 0.015 && r45 < 0.020);
/// ```
#[derive(Debug, Clone)]
pub struct YieldCurve {
    spline: CubicSplineInterpolator<f64>,
}

impl YieldCurve {
    /// Construct from knots ordered by strictly increasing tenor.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - fewer than 2 knots
    /// * `MarketDataError::InvalidTenor` - negative or non-finite tenor
    /// * `MarketDataError::NonIncreasingTenor` - tenors out of order or repeated
    /// * `MarketDataError::InvalidRate` - non-finite rate
    pub fn new(knots: &[(f64, f64)]) -> Result<Self, MarketDataError> {
        if knots.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: knots.len(),
                need: 2,
            });
        }

        for (index, &(tenor, rate)) in knots.iter().enumerate() {
            if !tenor.is_finite() || tenor < 0.0 {
                return Err(MarketDataError::InvalidTenor { tenor });
            }
            if !rate.is_finite() {
                return Err(MarketDataError::InvalidRate { tenor, rate });
            }
            if index > 0 && tenor <= knots[index - 1].0 {
                return Err(MarketDataError::NonIncreasingTenor { index, tenor });
            }
        }

        let (tenors, rates): (Vec<f64>, Vec<f64>) = knots.iter().copied().unzip();
        let spline = CubicSplineInterpolator::new(&tenors, &rates)?;
        Ok(Self { spline })
    }

    /// Construct from benchmark tenor quotes.
    ///
    /// Quotes are placed at [`StandardTenor::days`] and must already be
    /// ordered shortest first.
    pub fn from_standard_tenors(quotes: &[(StandardTenor, f64)]) -> Result<Self, MarketDataError> {
        let knots: Vec<(f64, f64)> = quotes
            .iter()
            .map(|(tenor, rate)| (f64::from(tenor.days()), *rate))
            .collect();
        Self::new(&knots)
    }

    /// Rate at `days` calendar days.
    pub fn rate_for_days(&self, days: f64) -> f64 {
        self.spline.evaluate(days)
    }

    /// Rate at a year fraction measured under `day_count`.
    ///
    /// ```
    /// use pricer_core::market_data::YieldCurve;
    /// use pricer_core::types::DayCountConvention;
    ///
    /// let curve = YieldCurve::new(&[(1.0, 0.01), (365.0, 0.03)]).unwrap();
    /// let r = curve.rate_for_year_fraction(1.0, DayCountConvention::ActualActual365);
    /// assert!((r - 0.03).abs() < 1e-15);
    /// ```
    pub fn rate_for_year_fraction(&self, t: f64, day_count: DayCountConvention) -> f64 {
        self.rate_for_days(t * day_count.denominator())
    }

    /// Knot tenors in days.
    pub fn tenors(&self) -> &[f64] {
        self.spline.xs()
    }

    /// Knot rates.
    pub fn rates(&self) -> &[f64] {
        self.spline.ys()
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.spline.len()
    }

    /// Always false: a curve has at least two knots.
    pub fn is_empty(&self) -> bool {
        self.spline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn benchmark() -> YieldCurve {
        let quotes: Vec<(StandardTenor, f64)> = StandardTenor::ALL
            .into_iter()
            .zip([0.0150, 0.0185, 0.0192, 0.0201, 0.0215, 0.0222, 0.0230])
            .collect();
        YieldCurve::from_standard_tenors(&quotes).unwrap()
    }

    #[test]
    fn test_reproduces_knots() {
        let curve = benchmark();
        for (&days, &rate) in curve.tenors().iter().zip(curve.rates()) {
            assert_relative_eq!(curve.rate_for_days(days), rate, epsilon = 1e-15);
        }
        assert_eq!(curve.len(), 7);
    }

    #[test]
    fn test_extrapolates_linearly_beyond_last_knot() {
        let curve = benchmark();
        let r400 = curve.rate_for_days(400.0);
        let r440 = curve.rate_for_days(440.0);
        let r480 = curve.rate_for_days(480.0);
        assert_relative_eq!(r440 - r400, r480 - r440, epsilon = 1e-15);
    }

    #[test]
    fn test_extrapolates_below_first_knot() {
        let curve = YieldCurve::new(&[(1.0, 0.010), (30.0, 0.020), (60.0, 0.025)]).unwrap();
        let r0 = curve.rate_for_days(0.0);
        assert!(r0 < 0.010);
        assert!(r0.is_finite());
    }

    #[test]
    fn test_rejects_single_knot() {
        assert_eq!(
            YieldCurve::new(&[(30.0, 0.02)]).unwrap_err(),
            MarketDataError::InsufficientData { got: 1, need: 2 }
        );
    }

    #[test]
    fn test_rejects_unordered_tenors() {
        let err = YieldCurve::new(&[(1.0, 0.01), (90.0, 0.02), (30.0, 0.015)]).unwrap_err();
        assert_eq!(
            err,
            MarketDataError::NonIncreasingTenor {
                index: 2,
                tenor: 30.0
            }
        );
    }

    #[test]
    fn test_rejects_repeated_tenor() {
        let err = YieldCurve::new(&[(1.0, 0.01), (1.0, 0.02)]).unwrap_err();
        assert!(matches!(err, MarketDataError::NonIncreasingTenor { index: 1, .. }));
    }

    #[test]
    fn test_rejects_nan_rate() {
        let err = YieldCurve::new(&[(1.0, 0.01), (30.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidRate { .. }));
    }

    #[test]
    fn test_rejects_negative_tenor() {
        let err = YieldCurve::new(&[(-1.0, 0.01), (30.0, 0.02)]).unwrap_err();
        assert_eq!(err, MarketDataError::InvalidTenor { tenor: -1.0 });
    }

    #[test]
    fn test_year_fraction_lookup_matches_days() {
        let curve = benchmark();
        let t = 45.0 / 365.0;
        assert_relative_eq!(
            curve.rate_for_year_fraction(t, DayCountConvention::ActualActual365),
            curve.rate_for_days(45.0),
            epsilon = 1e-15
        );
    }
}
