//! Batch configuration.
//!
//! Loaded from TOML with environment variable overrides, then validated
//! before a [`GreeksBatch`](crate::GreeksBatch) is built.
//!
//! ```
//! use pricer_batch::{BatchConfig, RateSource};
//!
//! let config: BatchConfig = toml::from_str(
//!     r#"
//!     rate_source = "implied_forward"
//!     calc_number = 2
//!
//!     [solver]
//!     tolerance = 1e-8
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.rate_source, RateSource::ImpliedForward);
//! assert_eq!(config.solver.tolerance, 1e-8);
//! assert_eq!(config.solver.max_iterations, 100);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use pricer_core::types::DayCountConvention;
use pricer_models::analytical::ImpliedVolConfig;
use serde::Deserialize;
use thiserror::Error;

/// Where each contract's risk-free rate comes from.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Spline-interpolated money-market curve
    #[default]
    YieldCurve,
    /// Per-maturity rate backed out of put-call parity
    ImpliedForward,
}

impl std::str::FromStr for RateSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yield_curve" | "curve" => Ok(RateSource::YieldCurve),
            "implied_forward" | "forward" => Ok(RateSource::ImpliedForward),
            _ => Err(format!("Unknown rate source: {}", s)),
        }
    }
}

/// Batch run configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BatchConfig {
    /// Rate source
    #[serde(default)]
    pub rate_source: RateSource,

    /// Strikes taken either side of ATM for the implied forward
    #[serde(default = "default_calc_number")]
    pub calc_number: usize,

    /// Implied volatility search settings
    #[serde(default)]
    pub solver: ImpliedVolConfig,

    /// Curve tenors requested from the provider, in days
    #[serde(default = "default_tenor_days")]
    pub tenor_days: Vec<u32>,

    /// Basis for converting days to maturity into years
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Replace degenerate vols with the opposite contract's vol
    #[serde(default = "default_true")]
    pub fill_degenerate_vols: bool,

    /// Vols at or below this are degenerate
    #[serde(default = "default_degenerate_vol_threshold")]
    pub degenerate_vol_threshold: f64,

    /// Fan out solving with rayon
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum instrument count before fanning out
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Restrict the run to these underlyings
    #[serde(default)]
    pub underlying_filter: Option<Vec<String>>,
}

fn default_calc_number() -> usize {
    3
}

fn default_tenor_days() -> Vec<u32> {
    vec![1, 30, 60, 90, 180, 270, 360]
}

fn default_true() -> bool {
    true
}

fn default_degenerate_vol_threshold() -> f64 {
    1e-4
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            rate_source: RateSource::default(),
            calc_number: default_calc_number(),
            solver: ImpliedVolConfig::default(),
            tenor_days: default_tenor_days(),
            day_count: DayCountConvention::default(),
            fill_degenerate_vols: true,
            degenerate_vol_threshold: default_degenerate_vol_threshold(),
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
            underlying_filter: None,
        }
    }
}

impl BatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `GREEKS_*` environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values leave the field unchanged.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("GREEKS_RATE_SOURCE") {
            self.rate_source = source.parse().unwrap_or(self.rate_source);
        }
        if let Some(n) = lookup("GREEKS_CALC_NUMBER") {
            self.calc_number = n.trim().parse().unwrap_or(self.calc_number);
        }
        if let Some(parallel) = lookup("GREEKS_PARALLEL") {
            self.parallel = match parallel.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => self.parallel,
            };
        }
        if let Some(tol) = lookup("GREEKS_SOLVER_TOLERANCE") {
            self.solver.tolerance = tol.trim().parse().unwrap_or(self.solver.tolerance);
        }
        if let Some(iters) = lookup("GREEKS_SOLVER_MAX_ITERATIONS") {
            self.solver.max_iterations = iters.trim().parse().unwrap_or(self.solver.max_iterations);
        }
        self
    }

    /// Validate the configuration, reporting every violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.solver.validate() {
            errors.push(format!("solver: {}", e));
        }

        if self.rate_source == RateSource::YieldCurve {
            if self.tenor_days.len() < 2 {
                errors.push("tenor_days needs at least two tenors for the yield curve".to_string());
            }
            if self.tenor_days.windows(2).any(|w| w[0] >= w[1]) {
                errors.push(format!(
                    "tenor_days must be strictly increasing, got {:?}",
                    self.tenor_days
                ));
            }
        }

        if !(self.degenerate_vol_threshold.is_finite() && self.degenerate_vol_threshold >= 0.0) {
            errors.push(format!(
                "degenerate_vol_threshold must be non-negative, got {}",
                self.degenerate_vol_threshold
            ));
        }

        if let Some(filter) = &self.underlying_filter {
            if filter.is_empty() {
                errors.push("underlying_filter cannot be an empty list".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate.
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file with environment overrides and validate.
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("IO error: {0}")]
    Io(String),

    /// The TOML is malformed or mistyped
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more fields are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
