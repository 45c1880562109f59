//! Cartesian state vector to classical (Keplerian) orbital elements.
//!
//! The conversion follows the textbook two-body route: angular momentum,
//! eccentricity vector, specific energy, node vector, then the angles.
//! Degenerate geometry never fails; the undefined angle is reported as `0`:
//!
//! - zero angular momentum: inclination is `0`
//! - equatorial orbit (no node line): RAAN and argument of periapsis are `0`
//! - circular orbit (`e <= 1e-10`): argument of periapsis and anomaly are `0`
//!
//! Angles are in degrees, wrapped into `[0, 360)` (inclination lies in `[0, 180]`).
//! For unbound trajectories (`e >= 1`) the mean anomaly is approximated by the
//! true anomaly.

use serde::{Serialize, Serializer};
use std::f64::consts::TAU;
use utoipa::ToSchema;

use super::vector::{cross, dot, norm};
use super::{DEFAULT_MASS_KG, EARTH_MU_KM3_S2};

/// Below this eccentricity the orbit is treated as circular.
const CIRCULAR_TOLERANCE: f64 = 1e-10;

/// Position (km) and velocity (km/s) in an inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl StateVector {
    /// Builds a state from `[x, y, z, vx, vy, vz, ...]`, ignoring extra values.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() < 6 {
            return None;
        }
        Some(StateVector {
            position: [values[0], values[1], values[2]],
            velocity: [values[3], values[4], values[5]],
        })
    }

    pub fn to_array(&self) -> [f64; 6] {
        let [x, y, z] = self.position;
        let [vx, vy, vz] = self.velocity;
        [x, y, z, vx, vy, vz]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct OrbitalElements {
    /// Semi-major axis (km). Infinite for unbound trajectories, encoded as `null`.
    #[serde(serialize_with = "serialize_semi_major_axis")]
    #[schema(value_type = Option<f64>)]
    pub a: f64,
    pub e: f64,
    /// Inclination (deg)
    pub i: f64,
    /// Right ascension of the ascending node (deg)
    pub raan: f64,
    /// Argument of periapsis (deg)
    pub argp: f64,
    /// Mean anomaly (deg)
    #[serde(rename = "M0")]
    pub m0: f64,
    /// kg
    pub mass: f64,
    /// Velocity magnitude (km/s)
    pub velocity: f64,
}

fn serialize_semi_major_axis<S: Serializer>(a: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if a.is_finite() {
        serializer.serialize_f64(*a)
    } else {
        serializer.serialize_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementConverter {
    pub mu: f64,
    pub default_mass: f64,
}

impl Default for ElementConverter {
    fn default() -> Self {
        ElementConverter {
            mu: EARTH_MU_KM3_S2,
            default_mass: DEFAULT_MASS_KG,
        }
    }
}

impl ElementConverter {
    pub fn new(mu: f64, default_mass: f64) -> Self {
        ElementConverter { mu, default_mass }
    }

    /// Converts a raw `[x, y, z, vx, vy, vz]` record. Returns `None` when the
    /// record has fewer than six components.
    pub fn convert(&self, values: &[f64]) -> Option<OrbitalElements> {
        StateVector::from_slice(values).and_then(|state| self.convert_state(&state))
    }

    /// Returns `None` when the state carries a non-finite component or sits at
    /// the origin, since no orbit is defined there.
    pub fn convert_state(&self, state: &StateVector) -> Option<OrbitalElements> {
        let mu = self.mu;
        let r_vec = state.position;
        let v_vec = state.velocity;

        if !r_vec.iter().chain(&v_vec).all(|c| c.is_finite()) {
            return None;
        }

        let r = norm(&r_vec);
        let v = norm(&v_vec);
        if r == 0.0 {
            return None;
        }

        let h_vec = cross(r_vec, v_vec);
        let h = norm(&h_vec);

        let v_cross_h = cross(v_vec, h_vec);
        let e_vec = [
            v_cross_h[0] / mu - r_vec[0] / r,
            v_cross_h[1] / mu - r_vec[1] / r,
            v_cross_h[2] / mu - r_vec[2] / r,
        ];
        let e = norm(&e_vec);

        let energy = v * v / 2.0 - mu / r;
        let a = if energy < 0.0 {
            -mu / (2.0 * energy)
        } else {
            f64::INFINITY
        };

        let i = if h != 0.0 { acos_clamped(h_vec[2] / h) } else { 0.0 };

        let n_vec = cross([0.0, 0.0, 1.0], h_vec);
        let n = norm(&n_vec);

        let raan = if n != 0.0 {
            let raan = acos_clamped(n_vec[0] / n);
            if n_vec[1] < 0.0 {
                TAU - raan
            } else {
                raan
            }
        } else {
            0.0
        };

        let argp = if n != 0.0 && e > CIRCULAR_TOLERANCE {
            let argp = acos_clamped(dot(&n_vec, &e_vec) / (n * e));
            if e_vec[2] < 0.0 {
                TAU - argp
            } else {
                argp
            }
        } else {
            0.0
        };

        let nu = if e > CIRCULAR_TOLERANCE {
            let nu = acos_clamped(dot(&e_vec, &r_vec) / (e * r));
            if dot(&r_vec, &v_vec) < 0.0 {
                TAU - nu
            } else {
                nu
            }
        } else {
            0.0
        };

        let mean_anomaly = if e < 1.0 {
            let eccentric = 2.0 * (((1.0 - e) / (1.0 + e)).sqrt() * (nu / 2.0).tan()).atan();
            eccentric - e * eccentric.sin()
        } else {
            nu
        };

        Some(OrbitalElements {
            a,
            e,
            i: i.to_degrees().min(180.0),
            raan: wrap_degrees(raan.to_degrees()),
            argp: wrap_degrees(argp.to_degrees()),
            m0: wrap_degrees(mean_anomaly.to_degrees()),
            mass: self.default_mass,
            velocity: v,
        })
    }
}

/// `acos` that tolerates ratios pushed just outside `[-1, 1]` by rounding.
fn acos_clamped(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(-1.0, 1.0).acos()
}

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
