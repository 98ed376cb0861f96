//! Per-date Greeks batch.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Instant;

use chrono::NaiveDate;
use pricer_core::market_data::YieldCurve;
use pricer_core::math::solvers::SolverOutcome;
use pricer_core::types::days_to_maturity;
use pricer_models::analytical::{BlackScholes, ImpliedVolSolver};
use pricer_models::forward::ForwardEstimator;
use pricer_models::instruments::{OptionQuote, UnderlyingGroup};
use pricer_models::moneyness::{tag_quotes, MoneynessClassifier, MoneynessTag};
use tracing::{debug, error, info, warn};

use crate::config::{BatchConfig, ConfigError, RateSource};
use crate::error::{BatchError, InstrumentError};
use crate::parallel::ParallelConfig;
use crate::provider::{InstrumentRecord, MarketDataProvider};
use crate::result::{BatchReport, BatchStats, GreeksResult, ResultStatus};
use crate::sink::GreeksSink;
use crate::vol_fill::ParityFill;

type Failures = Vec<(String, InstrumentError)>;

/// Quote ready for solving.
struct Prepared {
    quote: OptionQuote,
    moneyness: MoneynessTag,
}

/// Implied volatility and Greeks for every live contract of a date.
///
/// Each run is independent: market data is fetched through the injected
/// provider, every contract is solved once, and nothing is carried over
/// to the next date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_batch::{BatchConfig, GreeksBatch, InMemoryProvider, InstrumentRecord};
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2021, 7, 1).unwrap();
/// let price = BlackScholes::new(3.52, 0.02, 0.0, 0.2)
///     .unwrap()
///     .price(OptionType::Call, 3.5, 30.0 / 365.0);
///
/// let provider = InMemoryProvider::new()
///     .with_instrument(InstrumentRecord::new("c1", "510050.XSHG", OptionType::Call, 3.5, expiry))
///     .with_spot(date, "510050.XSHG", 3.52)
///     .with_quote(date, "c1", price)
///     .with_curve(date, &[(1, 0.02), (30, 0.02), (60, 0.02), (90, 0.02), (180, 0.02), (270, 0.02), (360, 0.02)]);
///
/// let batch = GreeksBatch::new(provider, BatchConfig::default()).unwrap();
/// let report = batch.run(date).unwrap();
///
/// let result = report.result("c1").unwrap();
/// assert!((result.implied_vol.unwrap() - 0.2).abs() < 1e-5);
/// assert!(report.failures.is_empty());
/// ```
#[derive(Debug)]
pub struct GreeksBatch<P> {
    provider: P,
    config: BatchConfig,
    solver: ImpliedVolSolver,
    estimator: ForwardEstimator,
    parallel: ParallelConfig,
    fill: ParityFill,
}

impl<P: MarketDataProvider> GreeksBatch<P> {
    /// Builds a batch over `provider`.
    ///
    /// # Errors
    /// `BatchError::Config` when the configuration does not validate.
    pub fn new(provider: P, config: BatchConfig) -> Result<Self, BatchError> {
        config.validate()?;
        let solver = ImpliedVolSolver::new(config.solver)
            .map_err(|e| ConfigError::Validation(vec![format!("solver: {}", e)]))?;

        Ok(Self {
            estimator: ForwardEstimator::new(config.calc_number),
            parallel: ParallelConfig::new(config.parallel, config.parallel_threshold),
            fill: ParityFill::new(config.fill_degenerate_vols, config.degenerate_vol_threshold),
            provider,
            config,
            solver,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Injected market data source.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Prices every live contract on `date`.
    ///
    /// Per-contract problems land in the report's `failures` (no result)
    /// or `warnings` (result flagged: non-converged, or unresolvable with
    /// the vol and Greeks absent). Only whole-date problems are errors.
    ///
    /// # Errors
    /// - `NoInstruments` when nothing is live after filtering
    /// - `CurveUnavailable` when the curve is needed but empty
    /// - `Provider` when the data source fails
    /// - `Curve` when the curve knots are unusable
    pub fn run(&self, date: NaiveDate) -> Result<BatchReport, BatchError> {
        let start = Instant::now();
        let mut stats = BatchStats::default();
        let mut failures: Failures = Vec::new();
        let mut warnings: Failures = Vec::new();

        let live = self.live_instruments(date, &mut stats)?;
        stats.instruments = live.len();
        info!(%date, instruments = live.len(), expired = stats.expired_skipped, "Starting Greeks batch");

        let mut by_underlying: BTreeMap<&str, Vec<&InstrumentRecord>> = BTreeMap::new();
        for record in &live {
            by_underlying
                .entry(record.underlying_id.as_str())
                .or_default()
                .push(record);
        }

        let underlying_ids: Vec<String> = by_underlying.keys().map(|id| id.to_string()).collect();
        let instrument_ids: Vec<String> = live.iter().map(|r| r.id.clone()).collect();
        let spots = self.provider.spot_prices(&underlying_ids, date)?;
        let prices = self.provider.option_quotes(&instrument_ids, date)?;
        let curve = self.curve(date)?;

        let mut prepared = Vec::with_capacity(live.len());
        for (underlying_id, records) in by_underlying {
            let Some(&spot) = spots.get(underlying_id) else {
                warn!(%date, underlying = underlying_id, contracts = records.len(), "Missing spot price");
                failures.extend(records.iter().map(|r| {
                    (
                        r.id.clone(),
                        InstrumentError::DataGap {
                            field: format!("spot price of {}", underlying_id),
                        },
                    )
                }));
                continue;
            };

            let mut quotes = Vec::with_capacity(records.len());
            for record in records {
                match prices.get(&record.id) {
                    Some(&price) => quotes.push(
                        OptionQuote::new(
                            record.id.as_str(),
                            underlying_id,
                            record.option_type,
                            record.strike,
                            price,
                            spot,
                            days_to_maturity(date, record.expiry_date),
                        )
                        .with_day_count(self.config.day_count),
                    ),
                    None => {
                        warn!(%date, instrument = %record.id, "Missing option quote");
                        failures.push((
                            record.id.clone(),
                            InstrumentError::DataGap {
                                field: "option quote".to_string(),
                            },
                        ));
                    }
                }
            }
            if quotes.is_empty() {
                continue;
            }

            prepared.extend(self.prepare_group(
                date,
                underlying_id,
                spot,
                quotes,
                curve.as_ref(),
                &mut failures,
            ));
        }

        let solver = &self.solver;
        let (outcomes, used_parallel) = self.parallel.map(
            &prepared,
            |p| -> Result<SolverOutcome<f64>, InstrumentError> {
                p.quote.validate()?;
                Ok(solver.solve_quote(&p.quote)?)
            },
        );
        stats.used_parallel = used_parallel;

        let mut solved: Vec<(OptionQuote, SolverOutcome<f64>)> = Vec::with_capacity(prepared.len());
        let mut tags = Vec::with_capacity(prepared.len());
        for (p, outcome) in prepared.into_iter().zip(outcomes) {
            match outcome {
                Ok(outcome) => {
                    tags.push(p.moneyness);
                    solved.push((p.quote, outcome));
                }
                Err(e) => {
                    warn!(%date, instrument = p.quote.id(), error = %e, "Rejected quote");
                    failures.push((p.quote.id().to_string(), e));
                }
            }
        }

        let resolved = self.fill.resolve(&solved);
        let mut results = Vec::with_capacity(solved.len());
        for (((quote, _), moneyness), vol) in solved.iter().zip(tags).zip(resolved) {
            let (vol, status, unresolved) = match vol {
                Ok((vol, status)) => (Some(vol), status, None),
                Err(e) => match e {
                    InstrumentError::BoundsUnresolvable { attempts, .. } => {
                        (None, ResultStatus::BoundsUnresolvable { attempts }, Some(e))
                    }
                    e => {
                        warn!(%date, instrument = quote.id(), error = %e, "Implied volatility unavailable");
                        failures.push((quote.id().to_string(), e));
                        continue;
                    }
                },
            };

            let result = match greeks_result(date, quote, moneyness, vol, status) {
                Ok(result) => result,
                Err(e) => {
                    failures.push((quote.id().to_string(), e));
                    continue;
                }
            };

            match &result.status {
                ResultStatus::Converged { .. } => stats.converged += 1,
                ResultStatus::NonConverged { iterations } => {
                    warn!(%date, instrument = quote.id(), iterations, "Implied volatility did not converge");
                    warnings.push((
                        quote.id().to_string(),
                        InstrumentError::NonConvergence {
                            iterations: *iterations,
                        },
                    ));
                    stats.non_converged += 1;
                }
                ResultStatus::FilledFromParity { donor_id } => {
                    debug!(instrument = quote.id(), donor = %donor_id, vol = ?vol, "Filled degenerate vol");
                    stats.filled += 1;
                }
                ResultStatus::BoundsUnresolvable { attempts } => {
                    warn!(%date, instrument = quote.id(), attempts, "No implied volatility bracket");
                    if let Some(e) = unresolved {
                        warnings.push((quote.id().to_string(), e));
                    }
                    stats.unresolved += 1;
                }
            }
            results.push(result);
        }

        results.sort_by(|a, b| a.instrument_id.cmp(&b.instrument_id));
        failures.sort_by(|a, b| a.0.cmp(&b.0));
        warnings.sort_by(|a, b| a.0.cmp(&b.0));

        stats.results = results.len();
        stats.failures = failures.len();
        stats.elapsed = start.elapsed();
        info!(
            %date,
            results = stats.results,
            failures = stats.failures,
            non_converged = stats.non_converged,
            unresolved = stats.unresolved,
            filled = stats.filled,
            elapsed_ms = stats.elapsed_ms(),
            "Greeks batch complete"
        );

        Ok(BatchReport {
            valuation_date: date,
            results,
            failures,
            warnings,
            stats,
        })
    }

    /// Runs `date` and upserts its results into `sink`.
    pub fn run_and_persist<S: GreeksSink>(
        &self,
        date: NaiveDate,
        sink: &mut S,
    ) -> Result<BatchReport, BatchError> {
        let report = self.run(date)?;
        let written = sink.upsert(&report.results)?;
        info!(%date, written, "Persisted Greeks");
        Ok(report)
    }

    /// Runs and persists each date in turn.
    ///
    /// A failed date is logged and reported; later dates still run.
    pub fn run_dates<S: GreeksSink>(
        &self,
        dates: &[NaiveDate],
        sink: &mut S,
    ) -> Vec<(NaiveDate, Result<BatchReport, BatchError>)> {
        dates
            .iter()
            .map(|&date| {
                let outcome = self.run_and_persist(date, sink);
                if let Err(e) = &outcome {
                    error!(%date, error = %e, "Greeks batch failed");
                }
                (date, outcome)
            })
            .collect()
    }

    fn accepts(&self, underlying_id: &str) -> bool {
        self.config
            .underlying_filter
            .as_ref()
            .map_or(true, |ids| ids.iter().any(|id| id == underlying_id))
    }

    fn live_instruments(
        &self,
        date: NaiveDate,
        stats: &mut BatchStats,
    ) -> Result<Vec<InstrumentRecord>, BatchError> {
        let mut seen = HashSet::new();
        let mut live = Vec::new();

        for record in self.provider.instrument_metadata(date)? {
            if !self.accepts(&record.underlying_id) {
                continue;
            }
            if !record.is_live(date) {
                stats.expired_skipped += 1;
                continue;
            }
            if !seen.insert(record.id.clone()) {
                warn!(%date, instrument = %record.id, "Duplicate contract in metadata");
                continue;
            }
            live.push(record);
        }

        if live.is_empty() {
            return Err(BatchError::NoInstruments { date });
        }
        Ok(live)
    }

    fn curve(&self, date: NaiveDate) -> Result<Option<YieldCurve>, BatchError> {
        match self.config.rate_source {
            RateSource::ImpliedForward => Ok(None),
            RateSource::YieldCurve => {
                let knots = self.provider.yield_curve(date, &self.config.tenor_days)?;
                if knots.is_empty() {
                    return Err(BatchError::CurveUnavailable { date });
                }
                Ok(Some(YieldCurve::new(&knots)?))
            }
        }
    }

    /// Tags moneyness and attaches rates for one underlying's quotes.
    fn prepare_group(
        &self,
        date: NaiveDate,
        underlying_id: &str,
        spot: f64,
        quotes: Vec<OptionQuote>,
        curve: Option<&YieldCurve>,
        failures: &mut Failures,
    ) -> Vec<Prepared> {
        let ids: Vec<String> = quotes.iter().map(|q| q.id().to_string()).collect();
        let fail_all = |err: InstrumentError, failures: &mut Failures| {
            warn!(%date, underlying = underlying_id, error = %err, "Skipping underlying");
            failures.extend(ids.iter().map(|id| (id.clone(), err.clone())));
        };

        let group = match UnderlyingGroup::new(underlying_id, date, spot, quotes) {
            Ok(group) => group,
            Err(e) => {
                fail_all(InstrumentError::InvalidInput(e.to_string()), failures);
                return Vec::new();
            }
        };
        let anchor = match MoneynessClassifier::for_underlying(underlying_id)
            .and_then(|c| c.atm_anchor(spot, &group.strikes()))
        {
            Ok(anchor) => anchor,
            Err(e) => {
                fail_all(e.into(), failures);
                return Vec::new();
            }
        };
        debug!(underlying = underlying_id, spot, anchor, contracts = group.len(), "Classified moneyness");

        let tags = tag_quotes(group.quotes(), anchor);
        let rates: HashMap<i64, Result<f64, InstrumentError>> = match curve {
            Some(curve) => group
                .maturities()
                .into_iter()
                .map(|days| (days, Ok(curve.rate_for_days(days as f64))))
                .collect(),
            None => self
                .estimator
                .estimate_all(&group, anchor)
                .into_iter()
                .map(|(days, estimate)| {
                    let rate = estimate.map(|e| {
                        for skip in &e.skipped {
                            warn!(
                                underlying = underlying_id,
                                days,
                                strike = skip.strike,
                                reason = ?skip.reason,
                                "Skipped parity pair"
                            );
                        }
                        debug!(underlying = underlying_id, days, forward = e.forward, rate = e.implied_rate, "Implied forward");
                        e.implied_rate
                    });
                    (days, rate.map_err(InstrumentError::from))
                })
                .collect(),
        };

        let mut prepared = Vec::with_capacity(group.len());
        for (quote, moneyness) in group.quotes().iter().zip(tags) {
            match rates.get(&quote.days_to_maturity()) {
                Some(Ok(rate)) => prepared.push(Prepared {
                    quote: quote.clone().with_rate(*rate),
                    moneyness,
                }),
                Some(Err(e)) => {
                    warn!(%date, instrument = quote.id(), error = %e, "No rate for maturity");
                    failures.push((quote.id().to_string(), e.clone()));
                }
                None => failures.push((
                    quote.id().to_string(),
                    InstrumentError::DataGap {
                        field: "rate".to_string(),
                    },
                )),
            }
        }
        prepared
    }
}

fn greeks_result(
    date: NaiveDate,
    quote: &OptionQuote,
    moneyness: MoneynessTag,
    vol: Option<f64>,
    status: ResultStatus,
) -> Result<GreeksResult, InstrumentError> {
    let greeks = match vol {
        Some(vol) => Some(
            BlackScholes::new(quote.spot(), quote.rate(), quote.dividend_yield(), vol)?.greeks(
                quote.option_type(),
                quote.strike(),
                quote.expiry(),
            )?,
        ),
        None => None,
    };

    Ok(GreeksResult {
        instrument_id: quote.id().to_string(),
        underlying_id: quote.underlying_id().to_string(),
        valuation_date: date,
        option_type: quote.option_type(),
        moneyness,
        strike: quote.strike(),
        spot: quote.spot(),
        rate: quote.rate(),
        dividend_yield: quote.dividend_yield(),
        expiry: quote.expiry(),
        days_to_maturity: quote.days_to_maturity(),
        market_price: quote.market_price(),
        implied_vol: vol,
        delta: greeks.map(|g| g.delta),
        gamma: greeks.map(|g| g.gamma),
        vega: greeks.map(|g| g.vega),
        theta: greeks.map(|g| g.theta),
        rho: greeks.map(|g| g.rho),
        status,
    })
}
