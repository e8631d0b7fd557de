//! Ephem Common Library
//!
//! This crate provides the shared contract types for the ephemeris
//! resilience workspace: failure classification, the static error
//! taxonomy, tracked quantities with their physical rate limits, the
//! failure context passed from calculation stages, and configuration
//! loading utilities.
//!
//! # Module Structure
//!
//! - [`kind`] - Failure kinds and severity ordering
//! - [`taxonomy`] - Static failure taxonomy and strategy identifiers
//! - [`quantity`] - Tracked quantities, rate table, angle helpers
//! - [`context`] - Failure context, precision levels, cache handle
//! - [`result`] - Fallback result and payload types
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - System-wide constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use ephem_common::prelude::*;
//!
//! let entry = classify(FailureKind::SeriesData);
//! assert_eq!(entry.severity, Severity::High);
//! ```

pub mod config;
pub mod consts;
pub mod context;
pub mod kind;
pub mod prelude;
pub mod quantity;
pub mod result;
pub mod taxonomy;
