//! Degenerate implied-vol repair from the opposite contract.
//!
//! A put and a call on the same underlying, strike and maturity share one
//! volatility under put-call parity. When one leg solves to a vanishing vol
//! or has no bracket at all (typically a far-wing quote worth less than the
//! solver tolerance), the other leg's converged vol stands in for it.

use std::collections::HashMap;

use pricer_core::math::solvers::SolverOutcome;
use pricer_models::instruments::{OptionQuote, OptionType};

use crate::error::InstrumentError;
use crate::result::ResultStatus;

/// Volatility assigned to a contract, or why none could be.
pub type ResolvedVol = Result<(f64, ResultStatus), InstrumentError>;

type PairKey<'a> = (&'a str, i64, u64, OptionType);

fn key(quote: &OptionQuote, option_type: OptionType) -> PairKey<'_> {
    (
        quote.underlying_id(),
        quote.days_to_maturity(),
        quote.strike().to_bits(),
        option_type,
    )
}

/// Parity fill policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityFill {
    enabled: bool,
    threshold: f64,
}

impl ParityFill {
    /// Fill vols at or below `threshold` when `enabled`.
    pub fn new(enabled: bool, threshold: f64) -> Self {
        Self { enabled, threshold }
    }

    /// Turns raw solver outcomes into final vols, in input order.
    ///
    /// Only converged vols above the threshold can serve as donors.
    ///
    /// ```
    /// use pricer_batch::vol_fill::ParityFill;
    /// use pricer_batch::ResultStatus;
    /// use pricer_core::math::solvers::SolverOutcome;
    /// use pricer_models::instruments::{OptionQuote, OptionType};
    ///
    /// let call = OptionQuote::new("c", "U", OptionType::Call, 150.0, 1e-9, 100.0, 30);
    /// let put = OptionQuote::new("p", "U", OptionType::Put, 150.0, 49.8, 100.0, 30);
    /// let solved = vec![
    ///     (call, SolverOutcome::BoundsUnresolvable { lower: 1e-6, upper: 2.0, attempts: 0 }),
    ///     (put, SolverOutcome::Converged { root: 0.31, iterations: 9 }),
    /// ];
    ///
    /// let resolved = ParityFill::new(true, 1e-4).resolve(&solved);
    /// let (vol, status) = resolved[0].clone().unwrap();
    /// assert_eq!(vol, 0.31);
    /// assert_eq!(status, ResultStatus::FilledFromParity { donor_id: "p".to_string() });
    /// ```
    pub fn resolve(&self, solved: &[(OptionQuote, SolverOutcome<f64>)]) -> Vec<ResolvedVol> {
        let donors: HashMap<PairKey<'_>, (f64, &str)> = if self.enabled {
            solved
                .iter()
                .filter_map(|(quote, outcome)| match *outcome {
                    SolverOutcome::Converged { root, .. } if root > self.threshold => Some((
                        key(quote, quote.option_type()),
                        (root, quote.id()),
                    )),
                    _ => None,
                })
                .collect()
        } else {
            HashMap::new()
        };

        let donor_for = |quote: &OptionQuote| -> Option<(f64, ResultStatus)> {
            donors
                .get(&key(quote, quote.option_type().opposite()))
                .map(|&(vol, id)| {
                    (
                        vol,
                        ResultStatus::FilledFromParity {
                            donor_id: id.to_string(),
                        },
                    )
                })
        };

        solved
            .iter()
            .map(|(quote, outcome)| match *outcome {
                SolverOutcome::Converged { root, iterations } => {
                    if root <= self.threshold {
                        if let Some(filled) = donor_for(quote) {
                            return Ok(filled);
                        }
                    }
                    Ok((root, ResultStatus::Converged { iterations }))
                }
                SolverOutcome::MaxIterationsExceeded { last, iterations } => {
                    if last <= self.threshold {
                        if let Some(filled) = donor_for(quote) {
                            return Ok(filled);
                        }
                    }
                    Ok((last, ResultStatus::NonConverged { iterations }))
                }
                SolverOutcome::BoundsUnresolvable {
                    lower,
                    upper,
                    attempts,
                } => donor_for(quote).ok_or(InstrumentError::BoundsUnresolvable {
                    lower,
                    upper,
                    attempts,
                }),
            })
            .collect()
    }
}
