//! Whole-date runs over an in-memory option chain.

use std::collections::HashSet;

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use pricer_batch::{
    BatchConfig, BatchError, GreeksBatch, GreeksSink, InMemoryProvider, InMemorySink,
    InstrumentError, InstrumentRecord, RateSource, ResultStatus,
};
use pricer_core::market_data::YieldCurve;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionType;
use pricer_models::moneyness::MoneynessTag;

const ETF: &str = "510050.XSHG";
const SPOT: f64 = 2.53;
const MATURITIES: [i64; 2] = [52, 115];
const KNOTS: [(u32, f64); 7] = [
    (1, 0.018),
    (30, 0.021),
    (60, 0.023),
    (90, 0.024),
    (180, 0.026),
    (270, 0.027),
    (360, 0.028),
];

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
}

fn curve() -> YieldCurve {
    let knots: Vec<(f64, f64)> = KNOTS.iter().map(|&(d, r)| (f64::from(d), r)).collect();
    YieldCurve::new(&knots).unwrap()
}

fn smile(strike: f64) -> f64 {
    0.2 + 0.8 * (strike / SPOT - 1.0).powi(2)
}

fn strikes() -> Vec<f64> {
    (0..9)
        .map(|i| ((2.35 + 0.05 * f64::from(i)) * 1000.0).round() / 1000.0)
        .collect()
}

fn id(option_type: OptionType, strike: f64, days: i64) -> String {
    format!("{}{:.3}-{}", option_type.code(), strike, days)
}

/// ETF chain priced off the curve rate for each maturity.
fn chain() -> InMemoryProvider {
    let curve = curve();
    let mut provider = InMemoryProvider::new()
        .with_spot(date(), ETF, SPOT)
        .with_curve(date(), &KNOTS);

    for days in MATURITIES {
        let rate = curve.rate_for_days(days as f64);
        let expiry = days as f64 / 365.0;
        for strike in strikes() {
            let bs = BlackScholes::new(SPOT, rate, 0.0, smile(strike)).unwrap();
            for t in [OptionType::Call, OptionType::Put] {
                let contract = id(t, strike, days);
                provider = provider
                    .with_instrument(InstrumentRecord::new(
                        contract.as_str(),
                        ETF,
                        t,
                        strike,
                        date() + Duration::days(days),
                    ))
                    .with_quote(date(), contract, bs.price(t, strike, expiry));
            }
        }
    }

    // Expires today: not live
    provider
        .with_instrument(InstrumentRecord::new("C2.500-0", ETF, OptionType::Call, 2.5, date()))
        .with_quote(date(), "C2.500-0", 0.03)
}

fn sequential() -> BatchConfig {
    BatchConfig {
        parallel: false,
        ..BatchConfig::default()
    }
}

#[test]
fn test_curve_run_round_trips_vols() {
    let batch = GreeksBatch::new(chain(), sequential()).unwrap();
    let report = batch.run(date()).unwrap();
    let curve = curve();

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert!(report.warnings.is_empty());
    assert_eq!(report.results.len(), 36);
    assert_eq!(report.stats.instruments, 36);
    assert_eq!(report.stats.expired_skipped, 1);
    assert_eq!(report.stats.converged, 36);
    assert_eq!(report.stats.success_rate(), 1.0);
    assert!(!report.stats.used_parallel);

    let ids: Vec<&str> = report.results.iter().map(|r| r.instrument_id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);

    for result in &report.results {
        assert_eq!(result.valuation_date, date());
        assert_eq!(result.rate, curve.rate_for_days(result.days_to_maturity as f64));
        assert_eq!(result.dividend_yield, 0.0);
        let vol = result.implied_vol.unwrap();
        assert_relative_eq!(vol, smile(result.strike), epsilon = 1e-5);
        assert!(matches!(result.status, ResultStatus::Converged { .. }));

        let greeks = BlackScholes::new(SPOT, result.rate, 0.0, vol)
            .unwrap()
            .greeks(result.option_type, result.strike, result.expiry)
            .unwrap();
        assert_relative_eq!(result.delta.unwrap(), greeks.delta, epsilon = 1e-12);
        assert_relative_eq!(result.vega.unwrap(), greeks.vega, epsilon = 1e-12);
        assert!(result.gamma.unwrap() > 0.0);
    }
}

#[test]
fn test_moneyness_tags() {
    let report = GreeksBatch::new(chain(), sequential())
        .unwrap()
        .run(date())
        .unwrap();

    let atm: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.moneyness == MoneynessTag::Atm)
        .collect();
    assert_eq!(atm.len(), 4);
    assert!(atm.iter().all(|r| r.strike == 2.55));

    let call = report.result(&id(OptionType::Call, 2.4, 52)).unwrap();
    let put = report.result(&id(OptionType::Put, 2.4, 52)).unwrap();
    assert_eq!(call.moneyness, MoneynessTag::Itm);
    assert_eq!(put.moneyness, MoneynessTag::Otm);
}

#[test]
fn test_implied_forward_recovers_maturity_rates() {
    let config = BatchConfig {
        rate_source: RateSource::ImpliedForward,
        ..sequential()
    };
    // No curve published: implied-forward mode never asks for it
    let provider = chain().with_curve(date(), &[]);
    let report = GreeksBatch::new(provider, config).unwrap().run(date()).unwrap();
    let curve = curve();

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.results.len(), 36);
    for result in &report.results {
        assert_relative_eq!(
            result.rate,
            curve.rate_for_days(result.days_to_maturity as f64),
            epsilon = 1e-9
        );
        assert_relative_eq!(result.implied_vol.unwrap(), smile(result.strike), epsilon = 1e-5);
    }
}

#[test]
fn test_implied_forward_with_atm_pair_only() {
    let config = BatchConfig {
        rate_source: RateSource::ImpliedForward,
        calc_number: 0,
        ..sequential()
    };
    let report = GreeksBatch::new(chain(), config).unwrap().run(date()).unwrap();
    let curve = curve();

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.results.len(), 36);
    for result in &report.results {
        assert_relative_eq!(
            result.rate,
            curve.rate_for_days(result.days_to_maturity as f64),
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_missing_curve_aborts_date() {
    let provider = chain().with_curve(date(), &[]);
    let err = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap_err();
    assert!(matches!(err, BatchError::CurveUnavailable { .. }));
}

#[test]
fn test_nothing_live_aborts_date() {
    let provider = InMemoryProvider::new()
        .with_instrument(InstrumentRecord::new("old", ETF, OptionType::Put, 2.5, date()))
        .with_spot(date(), ETF, SPOT);
    let err = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap_err();
    assert!(matches!(err, BatchError::NoInstruments { .. }));
}

#[test]
fn test_data_gaps_are_per_instrument() {
    let expiry = date() + Duration::days(52);
    let provider = chain()
        // Listed but never quoted
        .with_instrument(InstrumentRecord::new("C2.800-52", ETF, OptionType::Call, 2.8, expiry))
        // Underlying without a spot
        .with_instrument(InstrumentRecord::new("SR109C5600", "SR2109", OptionType::Call, 5600.0, expiry))
        .with_quote(date(), "SR109C5600", 120.0)
        // No tick table for this product
        .with_instrument(InstrumentRecord::new("IO2109C5000", "IF2109", OptionType::Call, 5000.0, expiry))
        .with_spot(date(), "IF2109", 5050.0)
        .with_quote(date(), "IO2109C5000", 140.0);

    let report = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap();

    assert_eq!(report.results.len(), 36);
    assert_eq!(report.failures.len(), 3);
    assert_eq!(report.stats.failures, 3);
    assert!(matches!(
        report.failure("C2.800-52"),
        Some(InstrumentError::DataGap { .. })
    ));
    assert!(matches!(
        report.failure("SR109C5600"),
        Some(InstrumentError::DataGap { .. })
    ));
    assert_eq!(
        report.failure("IO2109C5000"),
        Some(&InstrumentError::UnsupportedInstrumentClass("IF2109".to_string()))
    );
}

#[test]
fn test_invalid_quote_is_rejected() {
    let contract = id(OptionType::Put, 2.5, 52);
    let provider = chain().with_quote(date(), contract.as_str(), -0.01);
    let report = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap();

    assert!(report.result(&contract).is_none());
    assert!(matches!(
        report.failure(&contract),
        Some(InstrumentError::InvalidInput(_))
    ));
}

#[test]
fn test_stale_quote_filled_from_opposite_leg() {
    let call = id(OptionType::Call, 2.75, 115);
    let put = id(OptionType::Put, 2.75, 115);
    let provider = chain().with_quote(date(), call.as_str(), 1e-9);

    let report = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap();

    let filled = report.result(&call).unwrap();
    let donor = report.result(&put).unwrap();
    assert_eq!(
        filled.status,
        ResultStatus::FilledFromParity {
            donor_id: put.clone()
        }
    );
    assert!(filled.implied_vol.is_some());
    assert_eq!(filled.implied_vol, donor.implied_vol);
    assert_eq!(filled.market_price, 1e-9);
    assert_eq!(report.stats.filled, 1);
    assert!(report.failures.is_empty());
}

#[test]
fn test_stale_quote_without_fill_is_recorded_unresolved() {
    let call = id(OptionType::Call, 2.75, 115);
    let provider = chain().with_quote(date(), call.as_str(), 1e-9);
    let config = BatchConfig {
        fill_degenerate_vols: false,
        ..sequential()
    };
    let batch = GreeksBatch::new(provider, config).unwrap();
    let mut sink = InMemorySink::new();

    let report = batch.run_and_persist(date(), &mut sink).unwrap();
    assert!(report.failure(&call).is_none());
    assert_eq!(report.results.len(), 36);
    assert_eq!(report.stats.unresolved, 1);
    assert_eq!(report.stats.converged, 35);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].0, call);
    assert!(matches!(
        report.warnings[0].1,
        InstrumentError::BoundsUnresolvable { .. }
    ));

    let result = report.result(&call).unwrap();
    assert_eq!(result.status.code(), 2);
    assert!(matches!(result.status, ResultStatus::BoundsUnresolvable { .. }));
    assert_eq!(result.implied_vol, None);
    assert_eq!(result.delta, None);
    assert_eq!(result.vega, None);

    let stored = sink.get(&call, date()).unwrap();
    assert_eq!(stored, result);
    assert_eq!(sink.len(), 36);
}

#[test]
fn test_iteration_budget_emits_flagged_results() {
    let mut config = sequential();
    config.solver.max_iterations = 2;
    config.solver.tolerance = 1e-12;

    let report = GreeksBatch::new(chain(), config).unwrap().run(date()).unwrap();

    assert!(!report.warnings.is_empty());
    assert_eq!(report.stats.non_converged, report.warnings.len());
    assert_eq!(report.results.len(), 36);
    for (contract, warning) in &report.warnings {
        assert!(matches!(warning, InstrumentError::NonConvergence { .. }));
        let result = report.result(contract).unwrap();
        assert!(matches!(result.status, ResultStatus::NonConverged { .. }));
        assert_eq!(result.status.code(), 1);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let parallel = BatchConfig {
        parallel: true,
        parallel_threshold: 1,
        ..BatchConfig::default()
    };
    let par = GreeksBatch::new(chain(), parallel).unwrap().run(date()).unwrap();
    let seq = GreeksBatch::new(chain(), sequential()).unwrap().run(date()).unwrap();

    assert!(par.stats.used_parallel);
    assert_eq!(par.results, seq.results);
}

#[test]
fn test_duplicate_metadata_yields_one_result() {
    let expiry = date() + Duration::days(52);
    let contract = id(OptionType::Call, 2.5, 52);
    let provider = chain().with_instrument(InstrumentRecord::new(
        contract.as_str(),
        ETF,
        OptionType::Call,
        2.5,
        expiry,
    ));

    let report = GreeksBatch::new(provider, sequential())
        .unwrap()
        .run(date())
        .unwrap();
    let ids: HashSet<&str> = report.results.iter().map(|r| r.instrument_id.as_str()).collect();
    assert_eq!(ids.len(), report.results.len());
    assert_eq!(report.results.len(), 36);
}

#[test]
fn test_underlying_filter() {
    let expiry = date() + Duration::days(52);
    let provider = chain()
        .with_instrument(InstrumentRecord::new("SR109C5600", "SR2109", OptionType::Call, 5600.0, expiry))
        .with_quote(date(), "SR109C5600", 120.0);
    let config = BatchConfig {
        underlying_filter: Some(vec![ETF.to_string()]),
        ..sequential()
    };

    let report = GreeksBatch::new(provider, config).unwrap().run(date()).unwrap();
    assert_eq!(report.stats.instruments, 36);
    assert!(report.failure("SR109C5600").is_none());
}

#[test]
fn test_run_dates_isolates_failures() {
    let next = date() + Duration::days(1);
    let provider = chain().with_failure(next);
    let batch = GreeksBatch::new(provider, sequential()).unwrap();
    let mut sink = InMemorySink::new();

    let outcomes = batch.run_dates(&[next, date()], &mut sink);
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0].1, Err(BatchError::Provider(_))));
    assert!(outcomes[1].1.is_ok());
    assert_eq!(sink.len(), 36);
    assert!(sink.for_date(next).is_empty());

    // Re-running a date replaces its rows
    batch.run_and_persist(date(), &mut sink).unwrap();
    assert_eq!(sink.len(), 36);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = BatchConfig {
        tenor_days: Vec::new(),
        ..BatchConfig::default()
    };
    let err = GreeksBatch::new(chain(), config).unwrap_err();
    assert!(matches!(err, BatchError::Config(_)));
}

#[test]
fn test_sink_failure_surfaces() {
    struct Broken;
    impl GreeksSink for Broken {
        fn upsert(
            &mut self,
            _: &[pricer_batch::GreeksResult],
        ) -> Result<usize, pricer_batch::SinkError> {
            Err(pricer_batch::SinkError("disk full".to_string()))
        }
    }

    let batch = GreeksBatch::new(chain(), sequential()).unwrap();
    let err = batch.run_and_persist(date(), &mut Broken).unwrap_err();
    assert_eq!(err.to_string(), "Sink error: disk full");
}
