//! Prelude module for common re-exports.
//!
//! Consumers can do `use ephem_common::prelude::*;` and get the most
//! important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, DiagnosticsConfig, ResilienceConfig};

// ─── Classification ─────────────────────────────────────────────────
pub use crate::kind::{FailureKind, Severity};
pub use crate::taxonomy::{StrategyId, TaxonomyEntry, classify};

// ─── Quantities ─────────────────────────────────────────────────────
pub use crate::quantity::{AngleSet, Quantity, normalize_deg, shortest_arc_deg};

// ─── Context & results ──────────────────────────────────────────────
pub use crate::context::{CacheHandle, ErrorDescriptor, FailureContext, PrecisionLevel};
pub use crate::result::{FallbackResult, Payload, ResolvedBy};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DIAG_LOG_CAPACITY, DIAG_RECENT_LIMIT, RATE_SAFETY_FACTOR};
