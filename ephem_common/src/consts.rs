//! System-wide constants for the ephemeris resilience workspace.
//!
//! Single source of truth for all numeric limits and default paths.
//! Imported by all crates — no duplication permitted.

use static_assertions::const_assert;

/// Diagnostics log ring-buffer capacity (retained entries).
pub const DIAG_LOG_CAPACITY: usize = 100;

/// Maximum number of entries returned by the `recent` stats view.
pub const DIAG_RECENT_LIMIT: usize = 10;

/// Safety factor applied to the per-quantity maximum daily rate when
/// checking continuity between consecutive results.
pub const RATE_SAFETY_FACTOR: f64 = 2.0;

/// Degrees of longitude per hour of UTC offset (360° / 24h).
pub const DEG_PER_HOUR: f64 = 15.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ephem/config.toml";

const_assert!(DIAG_RECENT_LIMIT <= DIAG_LOG_CAPACITY);
const_assert!(DIAG_LOG_CAPACITY > 0);
