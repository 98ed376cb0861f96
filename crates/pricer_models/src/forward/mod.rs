//! Put-call-parity implied forwards.
//!
//! For a call and a put at the same strike K, parity gives the forward
//!
//! F = K·S / (S - C + P)
//!
//! Averaging F over a band of near-the-money strikes and solving
//! F = S·e^((r-q)T) yields the implied carry rate r - q = ln(F/S) / T.

mod error;
mod estimator;

pub use error::ForwardError;
pub use estimator::{implied_forward, ForwardEstimate, ForwardEstimator, SkipReason, SkippedPair};
