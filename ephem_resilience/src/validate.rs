//! Post-hoc plausibility validation of computed results.
//!
//! Pure inspection: checks accumulate into an issue list instead of
//! short-circuiting, performs no mutation, and never fails. Range
//! checks require every longitude to be finite and in `[0, 360)`; the
//! continuity check bounds the shorter-arc change between consecutive
//! results by the per-quantity maximum daily rate times elapsed days,
//! with a 2x safety margin.

use ephem_common::consts::RATE_SAFETY_FACTOR;
use ephem_common::quantity::{AngleSet, shortest_arc_deg};

/// Previous trusted result plus the time elapsed since it.
#[derive(Debug, Clone)]
pub struct PriorSnapshot {
    /// Longitudes of the previous result [deg].
    pub angles: AngleSet,
    /// Days elapsed between the previous and current result.
    pub elapsed_days: f64,
}

/// Outcome of a validation pass.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// True when no issue was found.
    pub valid: bool,
    /// One line per failed check.
    pub issues: Vec<String>,
}

/// Validate a computed result for physical plausibility.
///
/// All checks run regardless of earlier failures, except the structural
/// check: an empty result reports a single issue and stops.
pub fn validate(result: &AngleSet, prior: Option<&PriorSnapshot>) -> ValidationReport {
    let mut issues = Vec::new();

    if result.is_empty() {
        return ValidationReport {
            valid: false,
            issues: vec!["result contains no quantities".to_string()],
        };
    }

    for (quantity, value) in result {
        if !value.is_finite() || !(0.0..360.0).contains(value) {
            issues.push(format!("{quantity} out of range: {value}"));
        }
    }

    if let Some(prior) = prior {
        if !prior.elapsed_days.is_finite() || prior.elapsed_days < 0.0 {
            issues.push(format!(
                "elapsed days not usable for continuity check: {}",
                prior.elapsed_days
            ));
        } else {
            for (quantity, value) in result {
                let Some(previous) = prior.angles.get(quantity) else {
                    continue;
                };
                let diff = shortest_arc_deg(*value, *previous);
                let threshold =
                    quantity.max_daily_rate_deg() * prior.elapsed_days * RATE_SAFETY_FACTOR;
                if diff > threshold {
                    issues.push(format!(
                        "{quantity} moved {diff:.3} deg in {:.3} days, exceeds {threshold:.3} deg",
                        prior.elapsed_days
                    ));
                }
            }
        }
    }

    ValidationReport {
        valid: issues.is_empty(),
        issues,
    }
}
