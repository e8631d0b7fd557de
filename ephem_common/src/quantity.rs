//! Tracked ephemeris quantities, the static rate table, and angle helpers.
//!
//! Each quantity is a mean ecliptic longitude in degrees. The rate table
//! gives the maximum plausible apparent daily motion per quantity and is
//! the physical basis of the continuity check in the result validator.
//! Mean-longitude coefficients are the standard low-order J2000 values
//! (degrees, degrees per Julian century).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A set of computed longitudes, keyed by quantity, in degrees.
pub type AngleSet = BTreeMap<Quantity, f64>;

/// Tracked ephemeris quantity (geocentric ecliptic longitude).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Quantity {
    /// All tracked quantities, in display order.
    pub const ALL: [Self; 7] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
    ];

    /// Maximum plausible apparent daily motion [deg/day].
    ///
    /// Static rate table. Values are generous upper bounds on geocentric
    /// longitude rate; the validator multiplies by the safety factor on
    /// top of these.
    pub const fn max_daily_rate_deg(&self) -> f64 {
        match self {
            Self::Sun => 1.02,
            Self::Moon => 15.4,
            Self::Mercury => 2.2,
            Self::Venus => 1.27,
            Self::Mars => 0.86,
            Self::Jupiter => 0.25,
            Self::Saturn => 0.14,
        }
    }

    /// Mean longitude at epoch J2000.0 [deg] and rate [deg per Julian
    /// century], low-order linear terms.
    const fn mean_elements(&self) -> (f64, f64) {
        match self {
            Self::Sun => (280.46646, 36000.76983),
            Self::Moon => (218.3164477, 481267.88123421),
            Self::Mercury => (252.250906, 149472.6746358),
            Self::Venus => (181.979801, 58517.8156760),
            Self::Mars => (355.433275, 19140.2993313),
            Self::Jupiter => (34.351484, 3034.9056746),
            Self::Saturn => (50.077471, 1222.1137943),
        }
    }

    /// Coarse mean longitude [deg, 0..360) at `t` Julian centuries since
    /// J2000.0. Linear polynomial only — fallback accuracy, not ephemeris
    /// accuracy.
    pub fn mean_longitude_deg(&self, t: f64) -> f64 {
        let (l0, rate) = self.mean_elements();
        normalize_deg(l0 + rate * t)
    }

    /// Stable lowercase label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalize an angle into `[0, 360)` degrees.
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Angular separation along the shorter arc, in degrees `[0, 180]`.
pub fn shortest_arc_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Mean longitudes at epoch J2000.0 for every tracked quantity.
///
/// The conservative always-valid payload used by the dispatcher's
/// default result: every value is a real longitude in `[0, 360)`.
pub fn epoch_mean_angles() -> AngleSet {
    Quantity::ALL
        .iter()
        .map(|q| (*q, q.mean_longitude_deg(0.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_into_range() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert!((normalize_deg(-30.0) - 330.0).abs() < 1e-9);
        assert!((normalize_deg(725.0) - 5.0).abs() < 1e-9);
        let v = normalize_deg(123456.789);
        assert!((0.0..360.0).contains(&v));
    }

    #[test]
    fn shortest_arc_wraps() {
        assert!((shortest_arc_deg(359.0, 1.0) - 2.0).abs() < 1e-9);
        assert!((shortest_arc_deg(1.0, 359.0) - 2.0).abs() < 1e-9);
        assert!((shortest_arc_deg(10.0, 190.0) - 180.0).abs() < 1e-9);
        assert_eq!(shortest_arc_deg(42.0, 42.0), 0.0);
    }

    #[test]
    fn rate_table_is_positive_and_moon_fastest() {
        for q in Quantity::ALL {
            assert!(q.max_daily_rate_deg() > 0.0, "{q} rate must be positive");
            assert!(
                q.max_daily_rate_deg() <= Quantity::Moon.max_daily_rate_deg(),
                "{q} cannot outrun the Moon"
            );
        }
    }

    #[test]
    fn mean_longitudes_in_range() {
        for t in [-1.0, 0.0, 0.24, 5.0] {
            for q in Quantity::ALL {
                let l = q.mean_longitude_deg(t);
                assert!((0.0..360.0).contains(&l), "{q} at t={t}: {l}");
            }
        }
    }

    #[test]
    fn epoch_angles_cover_all_quantities() {
        let angles = epoch_mean_angles();
        assert_eq!(angles.len(), Quantity::ALL.len());
        // Sun's J2000 mean longitude is ~280.5°.
        assert!((angles[&Quantity::Sun] - 280.46646).abs() < 1e-6);
    }
}
