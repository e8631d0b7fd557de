//! # Ephem Resilience Library
//!
//! Failure-handling core for a multi-stage ephemeris calculation
//! pipeline. A calculation stage that fails raises a classified failure
//! into this crate and receives back either usable degraded data or an
//! explicit fatal error — never an unhandled panic.
//!
//! ## Per-Occurrence Flow
//!
//! 1. **Classify** — static taxonomy lookup (total, O(1))
//! 2. **Log** — diagnostics entry recorded before any fallback runs
//! 3. **Fallback** — the registered strategy executes, if one exists
//! 4. **Resolve** — strategy result, fixed default data on a double
//!    fault, or a fatal error for critical kinds with no strategy
//!
//! ## Bounded Diagnostics
//!
//! The diagnostics log is a fixed-capacity FIFO ring; all access is
//! serialized behind a mutex so the eviction invariant holds under
//! concurrent calculation tasks. Nothing in this crate performs network
//! or disk I/O.

pub mod diag;
pub mod dispatch;
pub mod strategy;
pub mod validate;

pub use diag::{DiagEvent, DiagStats, DiagnosticsLog, LogEntry};
pub use dispatch::{FallbackDispatcher, FatalFailure};
pub use strategy::{StrategyFailure, invoke};
pub use validate::{PriorSnapshot, ValidationReport, validate};
