//! Fallback result and payload types returned to the calling pipeline.

use serde::{Deserialize, Serialize};

use crate::context::PrecisionLevel;
use crate::quantity::AngleSet;
use crate::taxonomy::StrategyId;

/// Degraded data produced by a fallback strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Longitudes per quantity [deg, 0..360).
    Angles(AngleSet),
    /// UTC offset approximated from geographic longitude [hours].
    UtcOffsetHours(f64),
    /// New precision level the pipeline should retry with.
    Precision(PrecisionLevel),
}

/// Which path produced a fallback result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBy {
    /// A registered strategy ran to completion.
    Strategy(StrategyId),
    /// Both the primary path and its strategy failed; fixed default data.
    Default,
}

/// The only value returned to the caller on a non-fatal failure.
///
/// Never carries a further error: a strategy failure is absorbed by the
/// dispatcher and surfaces as `success = false` with the default payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackResult {
    /// True when a registered strategy produced usable degraded data.
    pub success: bool,
    /// Path that produced this result.
    pub resolved_by: ResolvedBy,
    /// Human-readable summary of what happened.
    pub message: String,
    /// Degraded data, if the strategy produces any.
    pub data: Option<Payload>,
    /// Reduced-accuracy warning for the caller to surface.
    pub warning: Option<String>,
}

impl FallbackResult {
    /// Angles payload, if this result carries one.
    pub fn angles(&self) -> Option<&AngleSet> {
        match &self.data {
            Some(Payload::Angles(set)) => Some(set),
            _ => None,
        }
    }
}
