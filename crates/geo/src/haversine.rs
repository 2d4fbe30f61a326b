//! Great-circle distance on a spherical Earth.

use crate::Coordinate;

/// Mean Earth radius in meters (IUGG R1).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Distance between two coordinates in meters.
///
/// ```
/// use office_days_geo::{haversine_distance_meters, Coordinate};
///
/// let office = Coordinate::new(48.1794935, 11.5858037);
/// let station = Coordinate::new(48.1402, 11.5600);
///
/// let meters = haversine_distance_meters(&office, &station);
/// assert!((4_000.0..6_000.0).contains(&meters));
/// ```
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_M
}

/// Distance between two coordinates in kilometers.
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_meters(from, to) / 1000.0
}

/// Angle between the two points as seen from the Earth's center, in radians.
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (phi1, lambda1) = from.to_radians();
    let (phi2, lambda2) = to.to_radians();

    let half_dphi = ((phi2 - phi1) / 2.0).sin();
    let half_dlambda = ((lambda2 - lambda1) / 2.0).sin();
    let h = half_dphi * half_dphi + phi1.cos() * phi2.cos() * half_dlambda * half_dlambda;

    // h drifts slightly above 1.0 for antipodal points
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}
