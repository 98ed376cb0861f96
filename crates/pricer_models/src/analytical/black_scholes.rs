//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes-Merton model with a continuous
//! dividend yield for pricing European call and put options with
//! analytical Greeks.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! Theta is per year, vega per unit of volatility (not per vol point) and
//! rho per unit of rate.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Black-Scholes model for European option pricing.
///
/// The per-contract methods (`d1`, `price`, `delta`, ...) are pure formula
/// evaluations and assume `strike > 0` and `expiry > 0`; at `expiry == 0`
/// they divide by zero. [`BlackScholes::greeks`] checks those inputs and
/// returns an error instead.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price(OptionType::Call, 100.0, 1.0);
/// let put_price = bs.price(OptionType::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Continuous dividend yield (q)
    dividend: f64,
    /// Volatility (σ)
    volatility: f64,
}

/// Price and first-order sensitivities of one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// Theoretical price
    pub price: f64,
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t, per year
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, continuous)
    /// * `dividend` - Continuous dividend yield
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, dividend: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
    /// let price = bs.price(OptionType::Call, 100.0, 1.0);
    /// assert!((price - 10.450583572185565).abs() < 1e-10);
    /// ```
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let forward_spot = self.spot * (-self.dividend * expiry).exp();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => forward_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionType::Put => discounted_strike * norm_cdf(-d2) - forward_spot * norm_cdf(-d1),
        }
    }

    /// Computes Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        let nd1 = norm_cdf(self.d1(strike, expiry));
        let carry = (-self.dividend * expiry).exp();

        match option_type {
            OptionType::Call => carry * nd1,
            OptionType::Put => carry * (nd1 - 1.0),
        }
    }

    /// Computes Gamma (∂²V/∂S²), identical for calls and puts.
    ///
    /// Gamma = e^(-qT)·φ(d₁) / (S·σ·√T)
    #[inline]
    pub fn gamma(&self, strike: f64, expiry: f64) -> f64 {
        let d1 = self.d1(strike, expiry);
        (-self.dividend * expiry).exp() * norm_pdf(d1)
            / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Computes Vega (∂V/∂σ), identical for calls and puts.
    ///
    /// Vega = S·e^(-qT)·φ(d₁)·√T
    #[inline]
    pub fn vega(&self, strike: f64, expiry: f64) -> f64 {
        let d1 = self.d1(strike, expiry);
        self.spot * (-self.dividend * expiry).exp() * norm_pdf(d1) * expiry.sqrt()
    }

    /// Computes Theta (∂V/∂t), per year.
    ///
    /// - Call Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put Theta = -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn theta(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * sqrt_t;
        let forward_spot = self.spot * (-self.dividend * expiry).exp();
        let discounted_strike = strike * (-self.rate * expiry).exp();

        let decay = -forward_spot * norm_pdf(d1) * self.volatility / (2.0 * sqrt_t);
        let funding = self.rate * discounted_strike;
        let carry = self.dividend * forward_spot;

        match option_type {
            OptionType::Call => decay - funding * norm_cdf(d2) + carry * norm_cdf(d1),
            OptionType::Put => decay + funding * norm_cdf(-d2) - carry * norm_cdf(-d1),
        }
    }

    /// Computes Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, option_type: OptionType, strike: f64, expiry: f64) -> f64 {
        let d2 = self.d2(strike, expiry);
        let discounted_strike = strike * (-self.rate * expiry).exp();

        match option_type {
            OptionType::Call => discounted_strike * expiry * norm_cdf(d2),
            OptionType::Put => -discounted_strike * expiry * norm_cdf(-d2),
        }
    }

    /// Price and all Greeks for one contract, with input checks.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0 or not finite
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0, 0.02, 0.0, 0.2).unwrap();
    /// let g = bs.greeks(OptionType::Call, 100.0, 0.5).unwrap();
    /// assert!(g.gamma > 0.0 && g.vega > 0.0);
    ///
    /// assert!(bs.greeks(OptionType::Call, 100.0, 0.0).is_err());
    /// ```
    pub fn greeks(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<Greeks, AnalyticalError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }

        Ok(Greeks {
            price: self.price(option_type, strike, expiry),
            delta: self.delta(option_type, strike, expiry),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(option_type, strike, expiry),
            rho: self.rho(option_type, strike, expiry),
        })
    }
}
