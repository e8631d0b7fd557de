//! Failure context passed from the raise site into the selected strategy.
//!
//! The context is a struct of typed optional fields rather than an
//! untyped key/value bag: the dispatcher never inspects it, and each
//! strategy reads only the fields it declares in its contract. Created
//! by the caller per failure occurrence, moved into the dispatcher, and
//! not retained beyond the call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::quantity::AngleSet;

/// Ordered precision level for series evaluation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionLevel {
    /// Coarsest usable truncation.
    Minimal,
    Low,
    Medium,
    /// Full series evaluation.
    High,
}

impl PrecisionLevel {
    /// Step down one level. `None` at the [`Self::Minimal`] floor.
    pub const fn step_down(self) -> Option<Self> {
        match self {
            Self::High => Some(Self::Medium),
            Self::Medium => Some(Self::Low),
            Self::Low => Some(Self::Minimal),
            Self::Minimal => None,
        }
    }

    /// Stable lowercase label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for PrecisionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller-owned cache control handle.
///
/// The disable-cache strategy flips this off — the single sanctioned
/// strategy side effect in the whole resilience core. Clones share the
/// underlying flag.
#[derive(Debug, Clone)]
pub struct CacheHandle {
    enabled: Arc<AtomicBool>,
}

impl CacheHandle {
    /// New handle with caching enabled.
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Permanently disable caching on this handle.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Current cache state.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for CacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Description of the original failure at the raise site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Short human-readable cause.
    pub message: String,
    /// Stack-trace-equivalent detail; retained in log entries only when
    /// the debug flag is enabled.
    pub detail: Option<String>,
}

impl ErrorDescriptor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

impl std::fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Per-occurrence context supplied by the failing calculation stage.
///
/// Every field is optional; strategy contracts state which fields they
/// require and fail with a typed error when one is missing.
#[derive(Debug, Clone, Default)]
pub struct FailureContext {
    /// Time parameter: Julian centuries since J2000.0.
    pub time_t: Option<f64>,
    /// Geographic longitude [deg], east positive.
    pub longitude_deg: Option<f64>,
    /// Precision level in effect when the failure occurred.
    pub precision: Option<PrecisionLevel>,
    /// Partially computed result, passed through by skip strategies.
    pub raw_data: Option<AngleSet>,
    /// Precomputed legacy dataset for the legacy-calculation strategy.
    pub legacy_data: Option<AngleSet>,
    /// Cache control handle for the disable-cache strategy.
    pub cache: Option<CacheHandle>,
}

impl FailureContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(mut self, t: f64) -> Self {
        self.time_t = Some(t);
        self
    }

    pub fn with_longitude(mut self, deg: f64) -> Self {
        self.longitude_deg = Some(deg);
        self
    }

    pub fn with_precision(mut self, level: PrecisionLevel) -> Self {
        self.precision = Some(level);
        self
    }

    pub fn with_raw_data(mut self, data: AngleSet) -> Self {
        self.raw_data = Some(data);
        self
    }

    pub fn with_legacy_data(mut self, data: AngleSet) -> Self {
        self.legacy_data = Some(data);
        self
    }

    pub fn with_cache(mut self, cache: CacheHandle) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Compact JSON presence map for log entries. Values are elided —
    /// the summary records which fields the caller supplied, not their
    /// contents.
    pub fn summary(&self) -> String {
        json!({
            "time": self.time_t.is_some(),
            "longitude": self.longitude_deg.is_some(),
            "precision": self.precision.map(|p| p.label()),
            "raw_data": self.raw_data.as_ref().map(|d| d.len()),
            "legacy_data": self.legacy_data.as_ref().map(|d| d.len()),
            "cache": self.cache.is_some(),
        })
        .to_string()
    }
}
