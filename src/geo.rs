//! Great-circle distance math.
//!
//! Implements the haversine formula on a spherical Earth model.
//! Accuracy is within ~0.5% of the ellipsoidal distance, which is more
//! than enough for route-length estimates between postal codes.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        assert!((-90.0..=90.0).contains(&lat), "Latitude must be between -90 and 90");
        assert!((-180.0..=180.0).contains(&lon), "Longitude must be between -180 and 180");
        Self { lat, lon }
    }
}

/// Haversine distance between two coordinates, in kilometers.
///
/// Symmetric in its arguments and zero for identical points.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Floating-point noise can push h a hair outside [0, 1] for
    // near-antipodal points, which would make sqrt/asin return NaN.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Round to two decimal places, half away from zero.
///
/// This is the crate's reference rounding for reported distances; tests
/// pin it bit-exactly.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
