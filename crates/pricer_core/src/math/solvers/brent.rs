//! Brent's method root-finding solver.

use super::{BracketExpander, SolverConfig, SolverOutcome};
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Keeps three points: the current best `b`, the contrapoint `a` with
/// `f(a) * f(b) < 0`, and the previous best `c`. Each step proposes an
/// inverse quadratic interpolation (or a secant step when two function
/// values coincide) and falls back to bisection of `[a, b]` when the
/// proposal:
///
/// 1. lies outside `[(3a + b) / 4, b]`,
/// 2. does not at least halve the step taken one or two iterations ago, or
/// 3. follows a step that has already shrunk below tolerance.
///
/// Iteration stops once the bracket `[a, b]` has closed to `tolerance`
/// (plus a few ulps of `b`) and `|f(b)| < tolerance`, or when `f(b)` is
/// exactly zero. A small residual alone is not enough: on a flat objective
/// it can hold far from the root.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::new(1e-12, 100).unwrap());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
    expander: Option<BracketExpander<T>>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            expander: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Widen unbracketed intervals with `expander` before iterating.
    ///
    /// Only [`solve`](Self::solve) uses the expander.
    pub fn with_expansion(mut self, expander: BracketExpander<T>) -> Self {
        self.expander = Some(expander);
        self
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root within `tolerance` of the true root, with `|f(x)| < tolerance`
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::new(1e-12, 100).unwrap());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        match self.iterate(&f, a, b)? {
            SolverOutcome::Converged { root, .. } => Ok(root),
            SolverOutcome::MaxIterationsExceeded { iterations, .. } => {
                Err(SolverError::MaxIterationsExceeded { iterations })
            }
            SolverOutcome::BoundsUnresolvable { lower, upper, .. } => {
                Err(SolverError::NoBracket {
                    a: to_f64(lower),
                    b: to_f64(upper),
                })
            }
        }
    }

    /// Bracket (expanding if configured) and iterate, reporting a tagged outcome.
    ///
    /// Non-convergence and an unresolvable bracket are outcomes, not errors.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidInput` when the bracket is degenerate or the
    /// objective is NaN at an endpoint.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{
    ///     BracketExpander, BrentSolver, ExpansionPolicy, SolverConfig, SolverOutcome,
    /// };
    ///
    /// let solver = BrentSolver::new(SolverConfig::default())
    ///     .with_expansion(BracketExpander::new(ExpansionPolicy::Doubling, 20));
    ///
    /// // Root at 5 lies outside the initial bracket
    /// let outcome = solver.solve(|x: f64| x - 5.0, 0.0, 1.0).unwrap();
    /// assert!(outcome.is_converged());
    /// assert!((outcome.value().unwrap() - 5.0).abs() < 1e-7);
    ///
    /// // No root at all
    /// let outcome = solver.solve(|x: f64| x * x + 1.0, -1.0, 1.0).unwrap();
    /// assert!(matches!(outcome, SolverOutcome::BoundsUnresolvable { .. }));
    /// ```
    pub fn solve<F>(&self, f: F, lower: T, upper: T) -> Result<SolverOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (lower, upper) = match &self.expander {
            Some(expander) => match expander.expand(&f, lower, upper) {
                Ok(bracket) => bracket,
                Err(SolverError::BracketExpansionFailed {
                    lower,
                    upper,
                    attempts,
                }) => {
                    return Ok(SolverOutcome::BoundsUnresolvable {
                        lower: from_f64(lower),
                        upper: from_f64(upper),
                        attempts,
                    })
                }
                Err(other) => return Err(other),
            },
            None => (lower, upper),
        };
        self.iterate(&f, lower, upper)
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// `b` is accepted once `[a, b]` is within `tolerance` and so is `|f(b)|`.
    #[inline]
    fn has_converged(&self, a: T, b: T, fb: T) -> bool {
        let tol = self.config.tolerance;
        let four = T::from(4.0).unwrap_or_else(T::one);
        let width_tol = tol + four * T::epsilon() * b.abs();
        fb == T::zero() || ((a - b).abs() <= width_tol && fb.abs() < tol)
    }

    fn iterate<F>(&self, f: &F, a: T, b: T) -> Result<SolverOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let tol = self.config.tolerance;
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if fa.is_nan() || fb.is_nan() {
            return Err(SolverError::InvalidInput(format!(
                "objective is NaN on [{}, {}]",
                to_f64(a),
                to_f64(b)
            )));
        }

        if fa * fb > T::zero() {
            return Ok(SolverOutcome::BoundsUnresolvable {
                lower: a.min(b),
                upper: a.max(b),
                attempts: 0,
            });
        }

        // b is always the endpoint closer to a root
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let two = T::one() + T::one();
        let three = two + T::one();
        let four = two + two;

        let mut c = a;
        let mut fc = fa;
        let mut d = c;
        let mut bisected = true;

        for iteration in 0..self.config.max_iterations {
            if self.has_converged(a, b, fb) {
                return Ok(SolverOutcome::Converged {
                    root: b,
                    iterations: iteration,
                });
            }

            let mut s = if fa != fc && fb != fc {
                a * fb * fc / ((fa - fb) * (fa - fc))
                    + b * fa * fc / ((fb - fa) * (fb - fc))
                    + c * fa * fb / ((fc - fa) * (fc - fb))
            } else {
                b - fb * (b - a) / (fb - fa)
            };

            let edge = (three * a + b) / four;
            let outside = !(s.is_finite() && is_between(s, edge, b));
            let slow = if bisected {
                (s - b).abs() >= (b - c).abs() / two
            } else {
                (s - b).abs() >= (c - d).abs() / two
            };
            let stalled = if bisected {
                (b - c).abs() < tol
            } else {
                (c - d).abs() < tol
            };

            if outside || slow || stalled {
                s = (a + b) / two;
                bisected = true;
            } else {
                bisected = false;
            }

            let fs = f(s);
            d = c;
            c = b;
            fc = fb;

            if fa * fs < T::zero() {
                b = s;
                fb = fs;
            } else {
                a = s;
                fa = fs;
            }

            if fa.abs() < fb.abs() {
                std::mem::swap(&mut a, &mut b);
                std::mem::swap(&mut fa, &mut fb);
            }
        }

        if self.has_converged(a, b, fb) {
            return Ok(SolverOutcome::Converged {
                root: b,
                iterations: self.config.max_iterations,
            });
        }

        Ok(SolverOutcome::MaxIterationsExceeded {
            last: b,
            iterations: self.config.max_iterations,
        })
    }
}

#[inline]
fn is_between<T: Float>(x: T, p: T, q: T) -> bool {
    (x >= p && x <= q) || (x >= q && x <= p)
}

fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

fn from_f64<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}
