//! Bounded diagnostics log for classified failures.
//!
//! A fixed-capacity FIFO ring over `heapless::Deque`: inserting entry
//! `N + 1` evicts the oldest entry, so retained length never exceeds
//! the capacity. A separate monotonic `lifetime_total` counter records
//! every entry ever written, so observability does not have to infer
//! drop counts from buffer length. The log is owned by the pipeline and
//! shared behind a mutex; entries are written atomically under the lock.

use std::collections::BTreeMap;
use std::time::SystemTime;

use heapless::Deque;
use serde::Serialize;

use ephem_common::consts::{DIAG_LOG_CAPACITY, DIAG_RECENT_LIMIT};
use ephem_common::kind::{FailureKind, Severity};
use ephem_common::taxonomy::StrategyId;

/// What a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagEvent {
    /// A classified calculation failure.
    Failure,
    /// The fallback strategy for an already-logged failure itself
    /// failed (double fault). Carries the strategy that failed; the
    /// entry's `kind` stays the original failure kind.
    FallbackFailed { strategy: StrategyId },
}

/// One structured diagnostics record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Wall-clock time the entry was recorded.
    pub timestamp: SystemTime,
    /// Classified failure kind.
    pub kind: FailureKind,
    /// Severity from the taxonomy.
    pub severity: Severity,
    /// Failure or double fault.
    pub event: DiagEvent,
    /// Human-readable message.
    pub message: String,
    /// Compact JSON presence map of the failure context.
    pub context_summary: String,
    /// Stack-trace-equivalent detail, retained only when the debug
    /// flag is enabled.
    pub source_detail: Option<String>,
}

impl LogEntry {
    /// New entry stamped with the current wall-clock time.
    pub fn new(
        kind: FailureKind,
        severity: Severity,
        event: DiagEvent,
        message: impl Into<String>,
        context_summary: impl Into<String>,
        source_detail: Option<String>,
    ) -> Self {
        Self {
            timestamp: SystemTime::now(),
            kind,
            severity,
            event,
            message: message.into(),
            context_summary: context_summary.into(),
            source_detail,
        }
    }
}

/// Aggregate view returned by [`DiagnosticsLog::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct DiagStats {
    /// Retained entry count (≤ capacity).
    pub total: usize,
    /// Entries ever recorded, including evicted ones.
    pub lifetime_total: u64,
    /// Retained entry counts per failure kind.
    pub by_kind: BTreeMap<FailureKind, u32>,
    /// Newest retained entries, reverse-chronological, at most
    /// [`DIAG_RECENT_LIMIT`].
    pub recent: Vec<LogEntry>,
}

/// Bounded, append-only diagnostics log with FIFO eviction.
#[derive(Debug)]
pub struct DiagnosticsLog<const N: usize = DIAG_LOG_CAPACITY> {
    entries: Deque<LogEntry, N>,
    lifetime_total: u64,
}

impl<const N: usize> DiagnosticsLog<N> {
    /// New empty log. Capacity is fixed at compile time.
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            lifetime_total: 0,
        }
    }

    /// Append an entry, evicting the oldest when full.
    pub fn record(&mut self, entry: LogEntry) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // A slot was freed above; the push cannot fail.
        let _ = self.entries.push_back(entry);
        self.lifetime_total += 1;
    }

    /// Retained entry count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ever recorded, including evicted ones.
    pub fn lifetime_total(&self) -> u64 {
        self.lifetime_total
    }

    /// Aggregate counts plus the newest entries.
    pub fn stats(&self) -> DiagStats {
        let mut by_kind: BTreeMap<FailureKind, u32> = BTreeMap::new();
        for entry in self.entries.iter() {
            *by_kind.entry(entry.kind).or_insert(0) += 1;
        }

        DiagStats {
            total: self.entries.len(),
            lifetime_total: self.lifetime_total,
            by_kind,
            recent: self
                .entries
                .iter()
                .rev()
                .take(DIAG_RECENT_LIMIT)
                .cloned()
                .collect(),
        }
    }

    /// Read-only copy of all retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Empty the retained entries. The lifetime counter is not reset.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<const N: usize> Default for DiagnosticsLog<N> {
    fn default() -> Self {
        Self::new()
    }
}
