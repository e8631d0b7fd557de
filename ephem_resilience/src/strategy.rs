//! Fallback strategy execution.
//!
//! [`invoke`] is an exhaustive match over the closed [`StrategyId`] set,
//! one dedicated function per arm. Every strategy is pure computation
//! over the already-supplied context — no I/O, no suspension — with one
//! sanctioned exception: the disable-cache strategy mutates the
//! caller-supplied [`CacheHandle`]. A strategy either returns a
//! [`FallbackResult`] or a typed [`StrategyFailure`]; the dispatcher
//! turns the latter into a double fault.

use thiserror::Error;

use ephem_common::context::FailureContext;
use ephem_common::quantity::{AngleSet, Quantity, normalize_deg};
use ephem_common::result::{FallbackResult, Payload, ResolvedBy};
use ephem_common::taxonomy::StrategyId;

/// Lunar mean anomaly at J2000.0 [deg] and rate [deg per Julian century].
const MOON_ANOMALY: (f64, f64) = (134.9633964, 477198.8675055);

/// Amplitude of the principal lunar elliptic term [deg].
const MOON_PRINCIPAL_TERM_DEG: f64 = 6.288774;

/// Failure of a fallback strategy itself (second fault after the
/// primary calculation already failed).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyFailure {
    /// A required context field was not supplied by the raise site.
    #[error("strategy {strategy} requires context field `{field}`")]
    MissingContext {
        strategy: StrategyId,
        field: &'static str,
    },

    /// A supplied context field is outside the strategy's domain.
    #[error("strategy {strategy} rejected context: {reason}")]
    InvalidContext {
        strategy: StrategyId,
        reason: String,
    },

    /// Precision is already at the minimal floor.
    #[error("precision already at minimal, cannot step down")]
    PrecisionFloor,
}

/// Execute the strategy identified by `id` against the failure context.
pub fn invoke(id: StrategyId, ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    match id {
        StrategyId::SimplifiedCalculation => simplified_calculation(ctx),
        StrategyId::LegacyCalculation => legacy_calculation(ctx),
        StrategyId::SkipCorrections => Ok(pass_through(
            StrategyId::SkipCorrections,
            ctx,
            "periodic corrections skipped, accuracy reduced",
        )),
        StrategyId::SkipNutation => Ok(pass_through(
            StrategyId::SkipNutation,
            ctx,
            "nutation correction skipped, accuracy reduced",
        )),
        StrategyId::SkipValidation => Ok(pass_through(
            StrategyId::SkipValidation,
            ctx,
            "result validation skipped, plausibility unverified",
        )),
        StrategyId::UtcOffsetFromLongitude => utc_offset_from_longitude(ctx),
        StrategyId::SimplifiedMoon => simplified_moon(ctx),
        StrategyId::LowerPrecision => lower_precision(ctx),
        StrategyId::DisableCache => Ok(disable_cache(ctx)),
    }
}

/// Coarse mean longitudes for every tracked quantity at `t` Julian
/// centuries since J2000.0.
fn coarse_mean_angles(t: f64) -> AngleSet {
    Quantity::ALL
        .iter()
        .map(|q| (*q, q.mean_longitude_deg(t)))
        .collect()
}

fn simplified_calculation(ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    let t = ctx.time_t.ok_or(StrategyFailure::MissingContext {
        strategy: StrategyId::SimplifiedCalculation,
        field: "time_t",
    })?;

    Ok(FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::SimplifiedCalculation),
        message: "coarse mean longitudes from low-order polynomials".to_string(),
        data: Some(Payload::Angles(coarse_mean_angles(t))),
        warning: Some("simplified calculation in use, accuracy strongly reduced".to_string()),
    })
}

fn legacy_calculation(ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    if let Some(legacy) = &ctx.legacy_data {
        return Ok(FallbackResult {
            success: true,
            resolved_by: ResolvedBy::Strategy(StrategyId::LegacyCalculation),
            message: "precomputed legacy dataset substituted".to_string(),
            data: Some(Payload::Angles(legacy.clone())),
            warning: Some("legacy dataset in use, accuracy reduced".to_string()),
        });
    }

    // No legacy dataset supplied: degrade one step further to the
    // simplified means. The time parameter is then required.
    let t = ctx.time_t.ok_or(StrategyFailure::MissingContext {
        strategy: StrategyId::LegacyCalculation,
        field: "time_t",
    })?;

    Ok(FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::LegacyCalculation),
        message: "legacy dataset unavailable, degraded to simplified means".to_string(),
        data: Some(Payload::Angles(coarse_mean_angles(t))),
        warning: Some("simplified calculation in use, accuracy strongly reduced".to_string()),
    })
}

/// Shared body of the three skip strategies: raw data passes through
/// unchanged (or `None`) with a reduced-accuracy warning. Never fails.
fn pass_through(id: StrategyId, ctx: &FailureContext, warning: &str) -> FallbackResult {
    FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(id),
        message: format!("{id}: raw data passed through unchanged"),
        data: ctx.raw_data.clone().map(Payload::Angles),
        warning: Some(warning.to_string()),
    }
}

fn utc_offset_from_longitude(ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    let longitude = ctx.longitude_deg.ok_or(StrategyFailure::MissingContext {
        strategy: StrategyId::UtcOffsetFromLongitude,
        field: "longitude_deg",
    })?;
    if !longitude.is_finite() || longitude.abs() > 180.0 {
        return Err(StrategyFailure::InvalidContext {
            strategy: StrategyId::UtcOffsetFromLongitude,
            reason: format!("longitude {longitude} outside [-180, 180]"),
        });
    }

    let offset = longitude / ephem_common::consts::DEG_PER_HOUR;
    Ok(FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::UtcOffsetFromLongitude),
        message: format!("UTC offset {offset:+.2}h approximated from longitude"),
        data: Some(Payload::UtcOffsetHours(offset)),
        warning: Some("geometric offset ignores political timezone boundaries".to_string()),
    })
}

fn simplified_moon(ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    let t = ctx.time_t.ok_or(StrategyFailure::MissingContext {
        strategy: StrategyId::SimplifiedMoon,
        field: "time_t",
    })?;

    // Mean longitude plus the principal elliptic term only.
    let (m0, m_rate) = MOON_ANOMALY;
    let anomaly_rad = (m0 + m_rate * t).to_radians();
    let longitude = normalize_deg(
        Quantity::Moon.mean_longitude_deg(t) + MOON_PRINCIPAL_TERM_DEG * anomaly_rad.sin(),
    );

    let mut data = AngleSet::new();
    data.insert(Quantity::Moon, longitude);

    Ok(FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::SimplifiedMoon),
        message: "single-term lunar longitude".to_string(),
        data: Some(Payload::Angles(data)),
        warning: Some("lunar position from one series term, accuracy strongly reduced".to_string()),
    })
}

fn lower_precision(ctx: &FailureContext) -> Result<FallbackResult, StrategyFailure> {
    let level = ctx.precision.ok_or(StrategyFailure::MissingContext {
        strategy: StrategyId::LowerPrecision,
        field: "precision",
    })?;
    let next = level.step_down().ok_or(StrategyFailure::PrecisionFloor)?;

    Ok(FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::LowerPrecision),
        message: format!("precision lowered {level} -> {next}"),
        data: Some(Payload::Precision(next)),
        warning: Some(format!("retry with {next} precision, accuracy reduced")),
    })
}

/// The single sanctioned side effect: flips the caller-supplied cache
/// handle off. Succeeds even without a handle (nothing to disable).
fn disable_cache(ctx: &FailureContext) -> FallbackResult {
    let disabled = match &ctx.cache {
        Some(cache) => {
            cache.disable();
            true
        }
        None => false,
    };

    FallbackResult {
        success: true,
        resolved_by: ResolvedBy::Strategy(StrategyId::DisableCache),
        message: if disabled {
            "caching disabled for the remainder of the session".to_string()
        } else {
            "no cache handle supplied, nothing to disable".to_string()
        },
        data: None,
        warning: Some("results recomputed without cache, throughput reduced".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ephem_common::context::{CacheHandle, PrecisionLevel};

    fn assert_angles_in_range(result: &FallbackResult) {
        let angles = result.angles().expect("angles payload");
        for (q, v) in angles {
            assert!((0.0..360.0).contains(v), "{q}: {v}");
        }
    }

    #[test]
    fn simplified_calculation_covers_all_quantities() {
        let ctx = FailureContext::new().with_time(0.25);
        let result = invoke(StrategyId::SimplifiedCalculation, &ctx).unwrap();
        assert!(result.success);
        assert_eq!(result.angles().unwrap().len(), Quantity::ALL.len());
        assert_angles_in_range(&result);
        assert!(result.warning.is_some());
    }

    #[test]
    fn simplified_calculation_requires_time() {
        let err = invoke(StrategyId::SimplifiedCalculation, &FailureContext::new()).unwrap_err();
        assert!(matches!(
            err,
            StrategyFailure::MissingContext { field: "time_t", .. }
        ));
    }

    #[test]
    fn legacy_calculation_prefers_dataset() {
        let mut legacy = AngleSet::new();
        legacy.insert(Quantity::Venus, 42.0);
        let ctx = FailureContext::new().with_legacy_data(legacy);

        let result = invoke(StrategyId::LegacyCalculation, &ctx).unwrap();
        assert_eq!(result.angles().unwrap()[&Quantity::Venus], 42.0);
    }

    #[test]
    fn legacy_calculation_degrades_to_simplified() {
        let ctx = FailureContext::new().with_time(0.0);
        let result = invoke(StrategyId::LegacyCalculation, &ctx).unwrap();
        assert!(result.success);
        assert!(result.message.contains("degraded"));
        assert_eq!(result.angles().unwrap().len(), Quantity::ALL.len());
    }

    #[test]
    fn legacy_calculation_without_dataset_or_time_fails() {
        let err = invoke(StrategyId::LegacyCalculation, &FailureContext::new()).unwrap_err();
        assert!(matches!(
            err,
            StrategyFailure::MissingContext {
                strategy: StrategyId::LegacyCalculation,
                ..
            }
        ));
    }

    #[test]
    fn skip_strategies_pass_raw_data_unchanged() {
        let mut raw = AngleSet::new();
        raw.insert(Quantity::Mars, 123.456);
        let ctx = FailureContext::new().with_raw_data(raw.clone());

        for id in [
            StrategyId::SkipCorrections,
            StrategyId::SkipNutation,
            StrategyId::SkipValidation,
        ] {
            let result = invoke(id, &ctx).unwrap();
            assert!(result.success);
            assert_eq!(result.angles(), Some(&raw), "{id}");
            assert!(result.warning.as_deref().is_some_and(|w| !w.is_empty()));
        }
    }

    #[test]
    fn skip_strategies_never_fail_without_raw_data() {
        let result = invoke(StrategyId::SkipCorrections, &FailureContext::new()).unwrap();
        assert!(result.success);
        assert!(result.data.is_none());
    }

    #[test]
    fn utc_offset_from_longitude_east_and_west() {
        let ctx = FailureContext::new().with_longitude(30.0);
        let result = invoke(StrategyId::UtcOffsetFromLongitude, &ctx).unwrap();
        assert_eq!(result.data, Some(Payload::UtcOffsetHours(2.0)));

        let ctx = FailureContext::new().with_longitude(-97.5);
        let result = invoke(StrategyId::UtcOffsetFromLongitude, &ctx).unwrap();
        assert_eq!(result.data, Some(Payload::UtcOffsetHours(-6.5)));
    }

    #[test]
    fn utc_offset_rejects_missing_or_invalid_longitude() {
        let err = invoke(StrategyId::UtcOffsetFromLongitude, &FailureContext::new()).unwrap_err();
        assert!(matches!(err, StrategyFailure::MissingContext { .. }));

        let ctx = FailureContext::new().with_longitude(250.0);
        let err = invoke(StrategyId::UtcOffsetFromLongitude, &ctx).unwrap_err();
        assert!(matches!(err, StrategyFailure::InvalidContext { .. }));
    }

    #[test]
    fn simplified_moon_single_quantity_in_range() {
        let ctx = FailureContext::new().with_time(0.24);
        let result = invoke(StrategyId::SimplifiedMoon, &ctx).unwrap();
        let angles = result.angles().unwrap();
        assert_eq!(angles.len(), 1);
        assert!((0.0..360.0).contains(&angles[&Quantity::Moon]));
        // Elliptic term stays within its amplitude of the mean longitude.
        let mean = Quantity::Moon.mean_longitude_deg(0.24);
        let diff = ephem_common::quantity::shortest_arc_deg(angles[&Quantity::Moon], mean);
        assert!(diff <= MOON_PRINCIPAL_TERM_DEG + 1e-9);
    }

    #[test]
    fn simplified_moon_requires_time() {
        let err = invoke(StrategyId::SimplifiedMoon, &FailureContext::new()).unwrap_err();
        assert!(matches!(err, StrategyFailure::MissingContext { .. }));
    }

    #[test]
    fn lower_precision_steps_down_one_level() {
        let ctx = FailureContext::new().with_precision(PrecisionLevel::High);
        let result = invoke(StrategyId::LowerPrecision, &ctx).unwrap();
        assert_eq!(
            result.data,
            Some(Payload::Precision(PrecisionLevel::Medium))
        );
    }

    #[test]
    fn lower_precision_fails_at_floor() {
        let ctx = FailureContext::new().with_precision(PrecisionLevel::Minimal);
        let err = invoke(StrategyId::LowerPrecision, &ctx).unwrap_err();
        assert_eq!(err, StrategyFailure::PrecisionFloor);
    }

    #[test]
    fn disable_cache_flips_handle_and_never_fails() {
        let handle = CacheHandle::new();
        let ctx = FailureContext::new().with_cache(handle.clone());
        let result = invoke(StrategyId::DisableCache, &ctx).unwrap();
        assert!(result.success);
        assert!(!handle.is_enabled());

        // Without a handle: still success.
        let result = invoke(StrategyId::DisableCache, &FailureContext::new()).unwrap();
        assert!(result.success);
    }
}
