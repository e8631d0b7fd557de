//! Static failure taxonomy and fallback strategy identifiers.
//!
//! The taxonomy maps every [`FailureKind`] to its severity, optional
//! fallback strategy, and a human-readable description. It is fixed at
//! build time: [`classify`] is total and O(1), and no runtime mutation
//! exists. A kind with `strategy = None` and `severity = Critical` is
//! always fatal.

use serde::{Deserialize, Serialize};

use crate::kind::{FailureKind, Severity};

/// Identifier of an executable fallback strategy.
///
/// Closed set — every kind has at most one strategy, enforced by the
/// exhaustive match in [`classify`] rather than a dynamic map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    /// Coarse mean longitudes from low-order polynomials in time.
    SimplifiedCalculation,
    /// Precomputed legacy dataset; degrades to simplified output.
    LegacyCalculation,
    /// Pass raw data through, skipping periodic corrections.
    SkipCorrections,
    /// Pass raw data through, skipping the nutation correction.
    SkipNutation,
    /// Pass raw data through, skipping result validation.
    SkipValidation,
    /// UTC offset approximated from geographic longitude.
    UtcOffsetFromLongitude,
    /// Single-term coarse lunar longitude.
    SimplifiedMoon,
    /// Step the precision level down by one.
    LowerPrecision,
    /// Disable the caller's cache handle (sanctioned side effect).
    DisableCache,
}

impl StrategyId {
    /// Stable kebab-case label for logs and messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SimplifiedCalculation => "simplified-calculation",
            Self::LegacyCalculation => "legacy-calculation",
            Self::SkipCorrections => "skip-corrections",
            Self::SkipNutation => "skip-nutation",
            Self::SkipValidation => "skip-validation",
            Self::UtcOffsetFromLongitude => "utc-offset-from-longitude",
            Self::SimplifiedMoon => "simplified-moon",
            Self::LowerPrecision => "lower-precision",
            Self::DisableCache => "disable-cache",
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the static taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// The classified kind.
    pub kind: FailureKind,
    /// Criticality of this kind.
    pub severity: Severity,
    /// Fallback strategy, if one exists. `None` + `Critical` is fatal.
    pub strategy: Option<StrategyId>,
    /// Human-readable description for diagnostics.
    pub description: &'static str,
}

static SERIES_DATA: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::SeriesData,
    severity: Severity::High,
    strategy: Some(StrategyId::LegacyCalculation),
    description: "periodic series data missing or corrupt",
};

static COORDINATE_TRANSFORM: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::CoordinateTransform,
    severity: Severity::Medium,
    strategy: Some(StrategyId::SkipCorrections),
    description: "coordinate transform failed, corrections unavailable",
};

static NUTATION: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Nutation,
    severity: Severity::Low,
    strategy: Some(StrategyId::SkipNutation),
    description: "nutation correction unavailable",
};

static TIME_BASE: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::TimeBase,
    severity: Severity::Critical,
    strategy: None,
    description: "time base conversion failed, no usable epoch",
};

static TIMEZONE: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Timezone,
    severity: Severity::Medium,
    strategy: Some(StrategyId::UtcOffsetFromLongitude),
    description: "timezone resolution failed",
};

static LUNAR_SERIES: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::LunarSeries,
    severity: Severity::High,
    strategy: Some(StrategyId::SimplifiedMoon),
    description: "lunar series evaluation failed",
};

static PRECISION: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Precision,
    severity: Severity::Low,
    strategy: Some(StrategyId::LowerPrecision),
    description: "requested precision cannot be satisfied",
};

static VALIDATION: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Validation,
    severity: Severity::Medium,
    strategy: Some(StrategyId::SkipValidation),
    description: "result validation stage failed",
};

static CACHE: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Cache,
    severity: Severity::Low,
    strategy: Some(StrategyId::DisableCache),
    description: "cache layer returned inconsistent data",
};

static UNKNOWN: TaxonomyEntry = TaxonomyEntry {
    kind: FailureKind::Unknown,
    severity: Severity::Medium,
    strategy: None,
    description: "unclassified calculation failure",
};

/// Look up the taxonomy entry for a kind.
///
/// Total over the closed [`FailureKind`] set; boundary labels that do
/// not parse land on [`FailureKind::Unknown`] upstream and classify to
/// the unknown entry here. Never a lookup failure.
pub fn classify(kind: FailureKind) -> &'static TaxonomyEntry {
    match kind {
        FailureKind::SeriesData => &SERIES_DATA,
        FailureKind::CoordinateTransform => &COORDINATE_TRANSFORM,
        FailureKind::Nutation => &NUTATION,
        FailureKind::TimeBase => &TIME_BASE,
        FailureKind::Timezone => &TIMEZONE,
        FailureKind::LunarSeries => &LUNAR_SERIES,
        FailureKind::Precision => &PRECISION,
        FailureKind::Validation => &VALIDATION,
        FailureKind::Cache => &CACHE,
        FailureKind::Unknown => &UNKNOWN,
    }
}
