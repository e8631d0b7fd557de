//! Failure classification tags and severity ordering.
//!
//! `FailureKind` is a closed set — defined once, never extended at
//! runtime. Labels arriving from outside the workspace (stage names,
//! serialized diagnostics) are mapped through [`FailureKind::from_label`],
//! which is total: anything unrecognized becomes [`FailureKind::Unknown`].

use serde::{Deserialize, Serialize};

/// Classification tag for a calculation failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Periodic series data missing, truncated, or corrupt.
    SeriesData,
    /// Ecliptic/equatorial coordinate transform failed.
    CoordinateTransform,
    /// Nutation correction could not be computed.
    Nutation,
    /// Time base conversion (UTC → dynamical time) failed.
    TimeBase,
    /// Timezone resolution failed.
    Timezone,
    /// Lunar series evaluation failed.
    LunarSeries,
    /// Requested precision level cannot be satisfied.
    Precision,
    /// Result validation stage itself failed.
    Validation,
    /// Cache layer returned inconsistent data.
    Cache,
    /// Anything that does not match a declared kind.
    Unknown,
}

impl FailureKind {
    /// All declared kinds, for exhaustive iteration in tests and stats.
    pub const ALL: [Self; 10] = [
        Self::SeriesData,
        Self::CoordinateTransform,
        Self::Nutation,
        Self::TimeBase,
        Self::Timezone,
        Self::LunarSeries,
        Self::Precision,
        Self::Validation,
        Self::Cache,
        Self::Unknown,
    ];

    /// Stable snake_case label for logs and summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SeriesData => "series_data",
            Self::CoordinateTransform => "coordinate_transform",
            Self::Nutation => "nutation",
            Self::TimeBase => "time_base",
            Self::Timezone => "timezone",
            Self::LunarSeries => "lunar_series",
            Self::Precision => "precision",
            Self::Validation => "validation",
            Self::Cache => "cache",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a boundary label. Total — unrecognized labels map to
    /// [`Self::Unknown`], never an error.
    pub fn from_label(label: &str) -> Self {
        match label {
            "series_data" => Self::SeriesData,
            "coordinate_transform" => Self::CoordinateTransform,
            "nutation" => Self::Nutation,
            "time_base" => Self::TimeBase,
            "timezone" => Self::Timezone,
            "lunar_series" => Self::LunarSeries,
            "precision" => Self::Precision,
            "validation" => Self::Validation,
            "cache" => Self::Cache,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered criticality level attached to a failure kind.
///
/// Ordering matters for escalation decisions: `Low < Medium < High <
/// Critical`. Only `Critical` kinds without a registered strategy may
/// abort the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic degradation, result still fully usable.
    Low,
    /// Noticeable degradation, result usable with a warning.
    Medium,
    /// Significant degradation, fallback data only.
    High,
    /// No acceptable degradation exists.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}
