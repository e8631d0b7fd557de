//! Fallback dispatcher — the per-failure orchestrator.
//!
//! State machine per occurrence:
//!
//! ```text
//! Raised → Classified → Logged → StrategyAttempted
//!        → { Resolved | DoubleFault → DefaultResolved | Fatal }
//! ```
//!
//! Classification and logging always happen, even when the outcome is
//! fatal; only the propagation differs. The only `Err` path is a
//! `Critical` kind with no registered strategy — every other severity
//! is absorbed locally, at worst as the fixed default result.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use thiserror::Error;
use tracing::{debug, error, warn};

use ephem_common::consts::DIAG_LOG_CAPACITY;
use ephem_common::context::{ErrorDescriptor, FailureContext};
use ephem_common::kind::{FailureKind, Severity};
use ephem_common::quantity::epoch_mean_angles;
use ephem_common::result::{FallbackResult, Payload, ResolvedBy};
use ephem_common::taxonomy::{TaxonomyEntry, classify};

use crate::diag::{DiagEvent, DiagStats, DiagnosticsLog, LogEntry};
use crate::strategy;

/// Terminal pipeline error: a `Critical` kind with no fallback.
///
/// The caller must not continue the pipeline for this unit of work.
#[derive(Debug, Clone, Error)]
#[error("fatal {kind} failure: {message} (cause: {original})")]
pub struct FatalFailure {
    /// Taxonomy description of the failure.
    pub message: String,
    /// Classified kind.
    pub kind: FailureKind,
    /// Original error raised by the calculation stage.
    pub original: ErrorDescriptor,
    /// Context presence summary from the raise site.
    pub context_summary: String,
    /// Wall-clock time of classification.
    pub timestamp: SystemTime,
}

/// Orchestrates classification, logging, and fallback execution.
///
/// Owns no global state: the diagnostics log is constructed by the
/// pipeline and injected, shared behind a mutex for concurrent
/// calculation tasks.
#[derive(Debug, Clone)]
pub struct FallbackDispatcher<const N: usize = DIAG_LOG_CAPACITY> {
    log: Arc<Mutex<DiagnosticsLog<N>>>,
    retain_source_detail: bool,
}

impl<const N: usize> FallbackDispatcher<N> {
    /// New dispatcher over an injected diagnostics log.
    ///
    /// `retain_source_detail` controls whether stack-trace-equivalent
    /// detail from the original error is kept in log entries.
    pub fn new(log: Arc<Mutex<DiagnosticsLog<N>>>, retain_source_detail: bool) -> Self {
        Self {
            log,
            retain_source_detail,
        }
    }

    /// Handle a failure raised by a calculation stage.
    ///
    /// Logging strictly precedes strategy invocation: diagnostics
    /// reflect every failure even when the fallback later succeeds.
    pub fn raise(
        &self,
        kind: FailureKind,
        original: ErrorDescriptor,
        ctx: FailureContext,
    ) -> Result<FallbackResult, FatalFailure> {
        let entry = classify(kind);
        let context_summary = ctx.summary();

        warn!(
            kind = %entry.kind,
            severity = %entry.severity,
            cause = %original.message,
            "calculation failure classified"
        );

        self.lock_log().record(LogEntry::new(
            entry.kind,
            entry.severity,
            DiagEvent::Failure,
            format!("{}: {}", entry.description, original.message),
            context_summary.clone(),
            self.retained_detail(&original),
        ));

        let Some(strategy_id) = entry.strategy else {
            if entry.severity == Severity::Critical {
                error!(kind = %entry.kind, "no fallback exists, aborting unit of work");
                return Err(FatalFailure {
                    message: entry.description.to_string(),
                    kind: entry.kind,
                    original,
                    context_summary,
                    timestamp: SystemTime::now(),
                });
            }
            return Ok(self.default_result(entry));
        };

        match strategy::invoke(strategy_id, &ctx) {
            Ok(result) => {
                debug!(kind = %entry.kind, strategy = %strategy_id, "fallback resolved");
                Ok(result)
            }
            Err(fault) => {
                warn!(
                    kind = %entry.kind,
                    strategy = %strategy_id,
                    cause = %fault,
                    "fallback strategy failed, using default result"
                );
                self.lock_log().record(LogEntry::new(
                    entry.kind,
                    entry.severity,
                    DiagEvent::FallbackFailed {
                        strategy: strategy_id,
                    },
                    fault.to_string(),
                    context_summary,
                    None,
                ));
                Ok(self.default_result(entry))
            }
        }
    }

    /// Aggregate diagnostics counts.
    pub fn stats(&self) -> DiagStats {
        self.lock_log().stats()
    }

    /// Read-only snapshot of the diagnostics log, oldest first.
    pub fn log_snapshot(&self) -> Vec<LogEntry> {
        self.lock_log().snapshot()
    }

    /// Empty the diagnostics log unconditionally.
    pub fn clear_log(&self) {
        self.lock_log().clear();
    }

    /// Fixed, always-available result: epoch mean longitudes plus an
    /// explicit low-confidence warning.
    fn default_result(&self, entry: &TaxonomyEntry) -> FallbackResult {
        FallbackResult {
            success: false,
            resolved_by: ResolvedBy::Default,
            message: format!("{}: default epoch data substituted", entry.description),
            data: Some(Payload::Angles(epoch_mean_angles())),
            warning: Some("fallback defaults in use, results may be highly inaccurate".to_string()),
        }
    }

    fn retained_detail(&self, original: &ErrorDescriptor) -> Option<String> {
        if self.retain_source_detail {
            original.detail.clone()
        } else {
            None
        }
    }

    /// A poisoned lock only means another task panicked mid-record;
    /// the log itself stays structurally valid.
    fn lock_log(&self) -> MutexGuard<'_, DiagnosticsLog<N>> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
