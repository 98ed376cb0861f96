//! Outward bracket expansion for sign-change search.

use crate::types::SolverError;
use num_traits::Float;

/// How far each expansion step widens the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExpansionPolicy {
    /// Step `k` (0-based) moves the chosen side by `width * 2^(k+1)`.
    #[default]
    Doubling,
    /// Every step moves the chosen side by the initial width.
    Additive,
}

/// Widens `[lower, upper]` until the target function changes sign.
///
/// At each attempt the side whose function value is closer to zero is
/// pushed outward: for a monotone function that is the side facing the
/// root. An optional `floor` clamps the lower endpoint to the legal
/// domain of the unknown (volatility cannot go below zero, for example).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BracketExpander, ExpansionPolicy};
///
/// let expander = BracketExpander::new(ExpansionPolicy::Doubling, 20);
/// let (lo, hi) = expander.expand(|x: f64| x - 10.0, 0.0, 1.0).unwrap();
/// assert!(lo <= 10.0 && hi >= 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketExpander<T: Float> {
    policy: ExpansionPolicy,
    max_expansions: usize,
    floor: Option<T>,
}

impl<T: Float> BracketExpander<T> {
    /// Create an expander with no lower floor.
    pub fn new(policy: ExpansionPolicy, max_expansions: usize) -> Self {
        Self {
            policy,
            max_expansions,
            floor: None,
        }
    }

    /// Clamp the lower endpoint at `floor`.
    pub fn with_floor(mut self, floor: T) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Expansion policy.
    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    /// Maximum number of widening steps.
    pub fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Search for a sign-changing bracket starting from `[lower, upper]`.
    ///
    /// Returns the bracket as `(lower, upper)` with `f(lower) * f(upper) <= 0`.
    ///
    /// # Errors
    ///
    /// - `SolverError::InvalidInput` if the endpoints are not finite, coincide,
    ///   or `f` returns NaN at an endpoint
    /// - `SolverError::BracketExpansionFailed` once the attempt budget is spent,
    ///   the endpoints overflow, or the floor pins the side that needs to move
    pub fn expand<F>(&self, f: F, lower: T, upper: T) -> Result<(T, T), SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut lower, mut upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let width = upper - lower;
        if !lower.is_finite() || !upper.is_finite() || width <= T::zero() {
            return Err(SolverError::InvalidInput(format!(
                "degenerate bracket [{}, {}]",
                to_f64(lower),
                to_f64(upper)
            )));
        }

        let two = T::one() + T::one();
        let mut attempts = 0;

        loop {
            let f_lower = f(lower);
            let f_upper = f(upper);
            if f_lower.is_nan() || f_upper.is_nan() {
                return Err(SolverError::InvalidInput(format!(
                    "objective is NaN on [{}, {}]",
                    to_f64(lower),
                    to_f64(upper)
                )));
            }
            if f_lower * f_upper <= T::zero() {
                return Ok((lower, upper));
            }
            if attempts == self.max_expansions {
                break;
            }

            let step = match self.policy {
                ExpansionPolicy::Doubling => width * two.powi(attempts as i32 + 1),
                ExpansionPolicy::Additive => width,
            };
            attempts += 1;

            if f_upper.abs() <= f_lower.abs() {
                upper = upper + step;
            } else {
                let mut moved = lower - step;
                if let Some(floor) = self.floor {
                    if moved < floor {
                        moved = floor;
                    }
                }
                if moved == lower {
                    break;
                }
                lower = moved;
            }

            if !lower.is_finite() || !upper.is_finite() {
                break;
            }
        }

        Err(SolverError::BracketExpansionFailed {
            lower: to_f64(lower),
            upper: to_f64(upper),
            attempts,
        })
    }
}

fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
