//! Implied volatility by bracket expansion and Brent's method.
//!
//! The objective `f(σ) = BS(σ) - target` is increasing in σ. The solver
//! starts from `[lower_bound, upper_bound]`, widens the bracket while both
//! ends share a sign, and then runs Brent's method until the σ bracket has
//! closed to `tolerance` and `|f(σ)| < tolerance`. Deep in- or out-of-the-money
//! quotes have almost no vega, so the price residual alone does not pin σ.
//!
//! Quotes outside the no-arbitrage band cannot be inverted and come back
//! as [`SolverOutcome::BoundsUnresolvable`] without iterating:
//!
//! | Type | Lower band (σ → 0)           | Upper band (σ → ∞) |
//! |------|------------------------------|--------------------|
//! | Call | max(S·e^(-qT) - K·e^(-rT), 0) | S·e^(-qT)          |
//! | Put  | max(K·e^(-rT) - S·e^(-qT), 0) | K·e^(-rT)          |
//!
//! A target within `tolerance` of the lower band is also rejected: every
//! small enough σ reproduces it, so the volatility is not identified.

use pricer_core::math::solvers::{
    BracketExpander, BrentSolver, ExpansionPolicy, SolverConfig, SolverOutcome,
};
use pricer_core::types::SolverError;

use super::{AnalyticalError, BlackScholes};
use crate::instruments::{OptionQuote, OptionType};

/// Search settings for [`ImpliedVolSolver`].
///
/// The lower bound must be strictly positive: d₁ is undefined at σ = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Initial lower volatility; also the floor for expansion
    pub lower_bound: f64,
    /// Initial upper volatility
    pub upper_bound: f64,
    /// Tolerance on σ and on the price residual
    pub tolerance: f64,
    /// Brent iteration budget
    pub max_iterations: usize,
    /// Bracket widening budget
    pub max_expansions: usize,
    /// Bracket widening step
    pub expansion: ExpansionPolicy,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower_bound: 1e-6,
            upper_bound: 2.0,
            tolerance: 1e-7,
            max_iterations: 100,
            max_expansions: 100,
            expansion: ExpansionPolicy::Doubling,
        }
    }
}

impl ImpliedVolConfig {
    /// Checks bounds, tolerance and iteration budget.
    ///
    /// # Errors
    /// `AnalyticalError::Solver(SolverError::InvalidInput)` naming the
    /// first offending field.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        if !(self.lower_bound.is_finite() && self.lower_bound > 0.0) {
            return Err(invalid(format!(
                "lower_bound must be positive, got {}",
                self.lower_bound
            )));
        }
        if !(self.upper_bound.is_finite() && self.upper_bound > self.lower_bound) {
            return Err(invalid(format!(
                "upper_bound must exceed lower_bound, got [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        SolverConfig::new(self.tolerance, self.max_iterations)?;
        Ok(())
    }
}

fn invalid(message: String) -> AnalyticalError {
    AnalyticalError::Solver(SolverError::InvalidInput(message))
}

/// Inverts the Black-Scholes price for volatility.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholes, ImpliedVolSolver};
/// use pricer_models::instruments::OptionType;
/// use pricer_core::math::solvers::SolverStatus;
///
/// let solver = ImpliedVolSolver::default();
///
/// let price = BlackScholes::new(2.5, 0.02, 0.0, 0.18).unwrap().price(OptionType::Put, 2.45, 0.25);
/// let outcome = solver.solve(OptionType::Put, price, 2.5, 2.45, 0.02, 0.0, 0.25).unwrap();
/// assert_eq!(outcome.status(), SolverStatus::Converged);
/// assert!((outcome.value().unwrap() - 0.18).abs() < 1e-5);
///
/// // Below intrinsic: no volatility reproduces it
/// let outcome = solver.solve(OptionType::Call, 0.01, 2.5, 2.0, 0.02, 0.0, 0.25).unwrap();
/// assert_eq!(outcome.status(), SolverStatus::BoundsUnresolvable);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    brent: BrentSolver<f64>,
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        let config = ImpliedVolConfig::default();
        Self {
            brent: Self::brent(&config),
            config,
        }
    }
}

impl ImpliedVolSolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: ImpliedVolConfig) -> Result<Self, AnalyticalError> {
        config.validate()?;
        Ok(Self {
            brent: Self::brent(&config),
            config,
        })
    }

    fn brent(config: &ImpliedVolConfig) -> BrentSolver<f64> {
        BrentSolver::new(SolverConfig {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        })
        .with_expansion(
            BracketExpander::new(config.expansion, config.max_expansions)
                .with_floor(config.lower_bound),
        )
    }

    /// Search settings.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for σ such that the model price equals `target`.
    ///
    /// # Errors
    /// Fails fast on invalid contract inputs (`InvalidSpot`,
    /// `InvalidStrike`, `InvalidExpiry`, `InvalidPrice`). Non-convergence and
    /// arbitrage-violating targets are outcomes, not errors.
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &self,
        option_type: OptionType,
        target: f64,
        spot: f64,
        strike: f64,
        rate: f64,
        dividend: f64,
        expiry: f64,
    ) -> Result<SolverOutcome<f64>, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        if !target.is_finite() {
            return Err(AnalyticalError::InvalidPrice { price: target });
        }

        let forward_spot = spot * (-dividend * expiry).exp();
        let discounted_strike = strike * (-rate * expiry).exp();
        let (floor, cap) = match option_type {
            OptionType::Call => ((forward_spot - discounted_strike).max(0.0), forward_spot),
            OptionType::Put => ((discounted_strike - forward_spot).max(0.0), discounted_strike),
        };

        if target - floor < self.config.tolerance || target >= cap {
            return Ok(SolverOutcome::BoundsUnresolvable {
                lower: self.config.lower_bound,
                upper: self.config.upper_bound,
                attempts: 0,
            });
        }

        let objective = |sigma: f64| match BlackScholes::new(spot, rate, dividend, sigma) {
            Ok(bs) => bs.price(option_type, strike, expiry) - target,
            Err(_) => f64::NAN,
        };

        Ok(self
            .brent
            .solve(objective, self.config.lower_bound, self.config.upper_bound)?)
    }

    /// Solves for the volatility implied by a quote's market price.
    ///
    /// Uses the quote's attached rate and dividend yield.
    pub fn solve_quote(&self, quote: &OptionQuote) -> Result<SolverOutcome<f64>, AnalyticalError> {
        self.solve(
            quote.option_type(),
            quote.market_price(),
            quote.spot(),
            quote.strike(),
            quote.rate(),
            quote.dividend_yield(),
            quote.expiry(),
        )
    }
}
