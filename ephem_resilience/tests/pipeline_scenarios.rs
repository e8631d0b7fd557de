//! End-to-end failure scenarios across the dispatcher, diagnostics
//! log, and validator, driven the way a calculation pipeline would.

use std::sync::{Arc, Mutex};

use ephem_common::prelude::*;
use ephem_resilience::{DiagEvent, DiagnosticsLog, FallbackDispatcher, PriorSnapshot, validate};

fn dispatcher() -> FallbackDispatcher {
    FallbackDispatcher::new(Arc::new(Mutex::new(DiagnosticsLog::new())), false)
}

#[test]
fn time_base_failure_terminates_the_pipeline() {
    let d = dispatcher();
    let err = d
        .raise(
            FailureKind::TimeBase,
            ErrorDescriptor::new("dynamical time conversion failed"),
            FailureContext::new(),
        )
        .expect_err("critical kind without strategy must propagate");

    assert_eq!(err.kind, FailureKind::TimeBase);
    assert!(!err.message.is_empty());

    // Exactly one new log entry for the fatal occurrence.
    let stats = d.stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.by_kind[&FailureKind::TimeBase], 1);
}

#[test]
fn coordinate_transform_passes_raw_data_through() {
    let d = dispatcher();
    let mut raw = AngleSet::new();
    raw.insert(Quantity::Sun, 200.0);
    raw.insert(Quantity::Moon, 15.0);

    let result = d
        .raise(
            FailureKind::CoordinateTransform,
            ErrorDescriptor::new("obliquity matrix singular"),
            FailureContext::new().with_raw_data(raw.clone()),
        )
        .unwrap();

    assert!(result.success);
    assert_eq!(result.angles(), Some(&raw));
    assert!(result.warning.as_deref().is_some_and(|w| !w.is_empty()));
}

#[test]
fn precision_floor_double_faults_into_default_result() {
    let d = dispatcher();
    let result = d
        .raise(
            FailureKind::Precision,
            ErrorDescriptor::new("tolerance unreachable"),
            FailureContext::new().with_precision(PrecisionLevel::Minimal),
        )
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.resolved_by, ResolvedBy::Default);
    assert!(result.warning.as_deref().is_some_and(|w| !w.is_empty()));

    // Failure entry plus a fallback-failed entry.
    let snapshot = d.log_snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(matches!(
        snapshot[1].event,
        DiagEvent::FallbackFailed {
            strategy: StrategyId::LowerPrecision
        }
    ));
}

#[test]
fn default_result_survives_validation() {
    let d = dispatcher();
    let result = d
        .raise(
            FailureKind::Unknown,
            ErrorDescriptor::new("unclassified stage failure"),
            FailureContext::new(),
        )
        .unwrap();

    // Degraded data from the default path must still be plausible.
    let report = validate(result.angles().unwrap(), None);
    assert!(report.valid, "{:?}", report.issues);
}

#[test]
fn continuity_check_flags_a_jump_after_fallback() {
    let d = dispatcher();
    let result = d
        .raise(
            FailureKind::LunarSeries,
            ErrorDescriptor::new("series file truncated"),
            FailureContext::new().with_time(0.25),
        )
        .unwrap();
    let current = result.angles().unwrap();

    // A prior snapshot placed far from the fallback output: the Moon
    // cannot plausibly move that far in a tenth of a day.
    let mut prior_angles = AngleSet::new();
    prior_angles.insert(
        Quantity::Moon,
        normalize_deg(current[&Quantity::Moon] + 90.0),
    );
    let prior = PriorSnapshot {
        angles: prior_angles,
        elapsed_days: 0.1,
    };

    let report = validate(current, Some(&prior));
    assert!(!report.valid);
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].starts_with("moon"));
}

#[test]
fn capacity_100_round_trip_retained_and_lifetime_counts() {
    let log = Arc::new(Mutex::new(DiagnosticsLog::new()));
    let d: FallbackDispatcher = FallbackDispatcher::new(log, false);

    for _ in 0..DIAG_LOG_CAPACITY {
        d.raise(
            FailureKind::Cache,
            ErrorDescriptor::new("stale entry"),
            FailureContext::new().with_cache(CacheHandle::new()),
        )
        .unwrap();
    }
    let stats = d.stats();
    assert_eq!(stats.total, DIAG_LOG_CAPACITY);
    assert_eq!(stats.lifetime_total, DIAG_LOG_CAPACITY as u64);

    // One more: retained count saturates, lifetime keeps climbing.
    d.raise(
        FailureKind::Cache,
        ErrorDescriptor::new("stale entry"),
        FailureContext::new(),
    )
    .unwrap();
    let stats = d.stats();
    assert_eq!(stats.total, DIAG_LOG_CAPACITY);
    assert_eq!(stats.lifetime_total, (DIAG_LOG_CAPACITY + 1) as u64);
}

#[test]
fn concurrent_raises_never_exceed_capacity() {
    let log = Arc::new(Mutex::new(DiagnosticsLog::new()));
    let d: FallbackDispatcher = FallbackDispatcher::new(log, false);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let d = d.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    d.raise(
                        FailureKind::Validation,
                        ErrorDescriptor::new("range check failed"),
                        FailureContext::new(),
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = d.stats();
    assert_eq!(stats.total, DIAG_LOG_CAPACITY);
    assert_eq!(stats.lifetime_total, 8 * 50);
    assert!(stats.recent.len() <= DIAG_RECENT_LIMIT);
}

#[test]
fn disable_cache_side_effect_reaches_the_caller() {
    let d = dispatcher();
    let cache = CacheHandle::new();

    let result = d
        .raise(
            FailureKind::Cache,
            ErrorDescriptor::new("checksum mismatch"),
            FailureContext::new().with_cache(cache.clone()),
        )
        .unwrap();

    assert!(result.success);
    assert!(!cache.is_enabled());
}
