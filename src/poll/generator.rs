use serde::Serialize;
use std::f64::consts::TAU;
use strum_macros::Display;
use utoipa::ToSchema;

use super::types::OrbitSnapshot;
use crate::orbit::{wrap_degrees, OrbitalElements};

/// Requests served by each archetype before moving to the next.
pub const STEPS_PER_ARCHETYPE: u64 = 100;
const TIME_STEP: f64 = 0.1;
const LEO_ALTITUDE_KM: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
pub enum OrbitKind {
    #[serde(rename = "Low Earth Orbit")]
    #[strum(serialize = "Low Earth Orbit")]
    LowEarth,
    #[serde(rename = "Geostationary Transfer")]
    #[strum(serialize = "Geostationary Transfer")]
    GeostationaryTransfer,
    #[serde(rename = "Molniya Orbit")]
    #[strum(serialize = "Molniya Orbit")]
    Molniya,
    #[serde(rename = "Highly Elliptical")]
    #[strum(serialize = "Highly Elliptical")]
    HighlyElliptical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Archetype {
    kind: OrbitKind,
    semi_major_axis_km: f64,
    eccentricity: f64,
    inclination_deg: f64,
    argp_deg: f64,
    /// deg per unit of generator time
    raan_rate: f64,
    anomaly_rate: f64,
    velocity_km_s: f64,
}

/// Closed-form orbit source cycling through four archetypes every
/// `4 * STEPS_PER_ARCHETYPE` requests.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGenerator {
    mu: f64,
    radius_km: f64,
    mass_kg: f64,
    archetypes: [Archetype; 4],
}

impl OrbitGenerator {
    pub fn new(mu: f64, radius_km: f64, mass_kg: f64) -> Self {
        let archetypes = [
            Archetype {
                kind: OrbitKind::LowEarth,
                semi_major_axis_km: radius_km + LEO_ALTITUDE_KM,
                eccentricity: 0.0005,
                inclination_deg: 51.6,
                argp_deg: 0.0,
                raan_rate: 0.3,
                anomaly_rate: 4.0,
                velocity_km_s: 7.66,
            },
            Archetype {
                kind: OrbitKind::GeostationaryTransfer,
                semi_major_axis_km: 24500.0,
                eccentricity: 0.73,
                inclination_deg: 28.5,
                argp_deg: 180.0,
                raan_rate: 0.2,
                anomaly_rate: 1.5,
                velocity_km_s: 9.9,
            },
            Archetype {
                kind: OrbitKind::Molniya,
                semi_major_axis_km: 26500.0,
                eccentricity: 0.74,
                inclination_deg: 63.4,
                argp_deg: 270.0,
                raan_rate: 0.15,
                anomaly_rate: 0.8,
                velocity_km_s: 9.5,
            },
            Archetype {
                kind: OrbitKind::HighlyElliptical,
                semi_major_axis_km: 30000.0,
                eccentricity: 0.8,
                inclination_deg: 45.0,
                argp_deg: 90.0,
                raan_rate: 0.25,
                anomaly_rate: 0.6,
                velocity_km_s: 8.2,
            },
        ];

        Self {
            mu,
            radius_km,
            mass_kg,
            archetypes,
        }
    }

    /// Archetype index for a counter value. Counters `1..=100` map to the
    /// first archetype, `101..=200` to the second and so on, wrapping after 400.
    pub fn phase(counter: u64) -> usize {
        ((counter.saturating_sub(1) / STEPS_PER_ARCHETYPE) % 4) as usize
    }

    pub fn kind(&self, counter: u64) -> OrbitKind {
        self.archetypes[Self::phase(counter)].kind
    }

    pub fn snapshot(&self, counter: u64, timestamp: f64) -> OrbitSnapshot {
        let archetype = &self.archetypes[Self::phase(counter)];
        let t = counter as f64 * TIME_STEP;
        let a = archetype.semi_major_axis_km;

        OrbitSnapshot {
            elements: OrbitalElements {
                a,
                e: archetype.eccentricity,
                i: archetype.inclination_deg,
                raan: wrap_degrees(t * archetype.raan_rate),
                argp: archetype.argp_deg,
                m0: wrap_degrees(t * archetype.anomaly_rate),
                mass: self.mass_kg,
                velocity: archetype.velocity_km_s,
            },
            orbit_type: archetype.kind,
            altitude: a - self.radius_km,
            period_hours: orbital_period_hours(a, self.mu),
            counter,
            timestamp,
            simulation_active: true,
        }
    }
}

/// Kepler's third law
pub fn orbital_period_hours(semi_major_axis_km: f64, mu: f64) -> f64 {
    TAU * (semi_major_axis_km.powi(3) / mu).sqrt() / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::{DEFAULT_MASS_KG, EARTH_MU_KM3_S2, EARTH_RADIUS_KM};
    use approx::assert_relative_eq;

    fn generator() -> OrbitGenerator {
        OrbitGenerator::new(EARTH_MU_KM3_S2, EARTH_RADIUS_KM, DEFAULT_MASS_KG)
    }

    #[test]
    fn archetype_changes_every_hundred_requests() {
        let g = generator();
        let expected = [
            (1, OrbitKind::LowEarth),
            (100, OrbitKind::LowEarth),
            (101, OrbitKind::GeostationaryTransfer),
            (200, OrbitKind::GeostationaryTransfer),
            (201, OrbitKind::Molniya),
            (300, OrbitKind::Molniya),
            (301, OrbitKind::HighlyElliptical),
            (400, OrbitKind::HighlyElliptical),
            (401, OrbitKind::LowEarth),
            (801, OrbitKind::LowEarth),
        ];
        for (counter, kind) in expected {
            assert_eq!(g.kind(counter), kind, "counter {counter}");
        }
    }

    #[test]
    fn leo_snapshot() {
        let snapshot = generator().snapshot(10, 0.0);
        let el = snapshot.elements;
        assert_eq!(snapshot.orbit_type, OrbitKind::LowEarth);
        assert_relative_eq!(el.a, 6771.0);
        assert_relative_eq!(snapshot.altitude, 400.0);
        assert_relative_eq!(el.raan, 0.3, epsilon = 1e-12);
        assert_relative_eq!(el.m0, 4.0, epsilon = 1e-12);
        assert_relative_eq!(snapshot.period_hours, 1.5403, epsilon = 1e-3);
        assert_eq!(snapshot.counter, 10);
        assert!(snapshot.simulation_active);
    }

    #[test]
    fn angles_wrap() {
        let g = generator();
        for counter in [1, 99, 250, 399, 1234, 98765] {
            let el = g.snapshot(counter, 0.0).elements;
            assert!((0.0..360.0).contains(&el.raan));
            assert!((0.0..360.0).contains(&el.m0));
        }
        // t = 161 on the low orbit, 644 deg of anomaly
        assert_relative_eq!(g.snapshot(1610, 0.0).elements.m0, 284.0, epsilon = 1e-9);
    }

    #[test]
    fn is_deterministic() {
        let g = generator();
        assert_eq!(g.snapshot(157, 1.0), g.snapshot(157, 1.0));
    }

    #[test]
    fn kind_names() {
        assert_eq!(OrbitKind::Molniya.to_string(), "Molniya Orbit");
        assert_eq!(
            serde_json::to_value(OrbitKind::GeostationaryTransfer).unwrap(),
            "Geostationary Transfer"
        );
    }
}
