//! Tagged result of a bracketed root search.

use std::fmt;

/// Status code attached to every [`SolverOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolverStatus {
    /// Bracket and residual both within tolerance.
    Converged,
    /// Iteration budget exhausted; the last iterate is unreliable.
    MaxIterationsExceeded,
    /// No sign-changing bracket could be established.
    BoundsUnresolvable,
}

impl SolverStatus {
    /// Numeric code: 0 converged, 1 iteration budget exhausted, 2 unresolvable bounds.
    #[inline]
    pub fn code(&self) -> u8 {
        match self {
            SolverStatus::Converged => 0,
            SolverStatus::MaxIterationsExceeded => 1,
            SolverStatus::BoundsUnresolvable => 2,
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolverStatus::Converged => "converged",
            SolverStatus::MaxIterationsExceeded => "max iterations exceeded",
            SolverStatus::BoundsUnresolvable => "bounds unresolvable",
        };
        f.write_str(label)
    }
}

/// Result of [`BrentSolver::solve`](super::BrentSolver::solve).
///
/// Failure to converge is never folded into a NaN root: callers match on
/// the variant, or use [`SolverOutcome::value`] which yields `None` only
/// when no iterate exists at all.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{SolverOutcome, SolverStatus};
///
/// let outcome = SolverOutcome::Converged { root: 0.2_f64, iterations: 7 };
/// assert!(outcome.is_converged());
/// assert_eq!(outcome.value(), Some(0.2));
/// assert_eq!(outcome.status(), SolverStatus::Converged);
///
/// let failed: SolverOutcome<f64> = SolverOutcome::BoundsUnresolvable {
///     lower: 1e-6,
///     upper: 2.0,
///     attempts: 100,
/// };
/// assert_eq!(failed.value(), None);
/// assert_eq!(failed.status().code(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverOutcome<T> {
    /// `root` is within tolerance of a sign change and `|f(root)| < tolerance`.
    Converged {
        /// Root estimate
        root: T,
        /// Iterations used by the root-finder
        iterations: usize,
    },

    /// Budget exhausted before convergence.
    MaxIterationsExceeded {
        /// Best iterate at exhaustion
        last: T,
        /// Iterations used
        iterations: usize,
    },

    /// The bracket never changed sign, even after expansion.
    BoundsUnresolvable {
        /// Lower endpoint at give-up
        lower: T,
        /// Upper endpoint at give-up
        upper: T,
        /// Expansion attempts made
        attempts: usize,
    },
}

impl<T: Copy> SolverOutcome<T> {
    /// Status tag of this outcome.
    pub fn status(&self) -> SolverStatus {
        match self {
            SolverOutcome::Converged { .. } => SolverStatus::Converged,
            SolverOutcome::MaxIterationsExceeded { .. } => SolverStatus::MaxIterationsExceeded,
            SolverOutcome::BoundsUnresolvable { .. } => SolverStatus::BoundsUnresolvable,
        }
    }

    /// Root or last iterate, if the root-finder ran.
    pub fn value(&self) -> Option<T> {
        match *self {
            SolverOutcome::Converged { root, .. } => Some(root),
            SolverOutcome::MaxIterationsExceeded { last, .. } => Some(last),
            SolverOutcome::BoundsUnresolvable { .. } => None,
        }
    }

    /// Whether the search converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, SolverOutcome::Converged { .. })
    }

    /// Maps the carried values, keeping the status.
    pub fn map<U, F: Fn(T) -> U>(self, f: F) -> SolverOutcome<U> {
        match self {
            SolverOutcome::Converged { root, iterations } => SolverOutcome::Converged {
                root: f(root),
                iterations,
            },
            SolverOutcome::MaxIterationsExceeded { last, iterations } => {
                SolverOutcome::MaxIterationsExceeded {
                    last: f(last),
                    iterations,
                }
            }
            SolverOutcome::BoundsUnresolvable {
                lower,
                upper,
                attempts,
            } => SolverOutcome::BoundsUnresolvable {
                lower: f(lower),
                upper: f(upper),
                attempts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SolverStatus::Converged.code(), 0);
        assert_eq!(SolverStatus::MaxIterationsExceeded.code(), 1);
        assert_eq!(SolverStatus::BoundsUnresolvable.code(), 2);
    }

    #[test]
    fn test_max_iterations_keeps_last_iterate() {
        let outcome = SolverOutcome::MaxIterationsExceeded {
            last: 1.5_f64,
            iterations: 100,
        };
        assert!(!outcome.is_converged());
        assert_eq!(outcome.value(), Some(1.5));
        assert_eq!(outcome.status(), SolverStatus::MaxIterationsExceeded);
    }

    #[test]
    fn test_map_preserves_status() {
        let outcome = SolverOutcome::Converged {
            root: 2.0_f64,
            iterations: 3,
        };
        let mapped = outcome.map(|x| x as f32);
        assert_eq!(
            mapped,
            SolverOutcome::Converged {
                root: 2.0_f32,
                iterations: 3
            }
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            format!("{}", SolverStatus::BoundsUnresolvable),
            "bounds unresolvable"
        );
    }
}
