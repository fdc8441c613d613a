//! Geographic primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe in decimal degrees.
///
/// Latitude runs north/south of the equator (north pole = +90, south pole
/// = -90). Longitude runs east/west of the prime meridian (west negative,
/// east positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}
