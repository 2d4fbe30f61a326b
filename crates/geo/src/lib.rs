//! Geospatial utilities for location-history matching.
//!
//! This crate provides:
//! - Haversine distance calculations on a spherical Earth
//! - Parsing of the textual `"lat°, lon°"` points found in timeline exports
//!
//! # Example
//!
//! ```
//! use office_days_geo::{haversine_distance_meters, parse_point, Coordinate};
//!
//! let office = Coordinate::new(48.1794935, 11.5858037);
//! let visit = parse_point("48.1794935°, 11.5858037°").unwrap();
//!
//! assert!(haversine_distance_meters(&office, &visit) < 0.001);
//! ```

mod error;
mod haversine;
mod point;

pub use error::{GeoError, Result};
pub use haversine::{EARTH_RADIUS_M, haversine_distance, haversine_distance_meters};
pub use point::{E7_SCALE, from_e7, parse_point, parse_point_or_origin};

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude within ±90 and longitude within ±180. NaN is never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°, {}°", self.latitude, self.longitude)
    }
}
