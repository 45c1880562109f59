mod elements;
pub mod vector;

pub use elements::{wrap_degrees, ElementConverter, OrbitalElements, StateVector};

/// Earth gravitational parameter (km^3/s^2)
pub const EARTH_MU_KM3_S2: f64 = 3.986004418e5;
/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Mass reported when the sample carries none (kg)
pub const DEFAULT_MASS_KG: f64 = 1e6;
