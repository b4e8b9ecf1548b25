//! Geographic utilities for start-point filtering and track length.

use geo::{Distance, Haversine, Point};

use crate::GpsPoint;

/// Mean Earth radius used by the start-point filter, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres, on a sphere of
/// radius [`EARTH_RADIUS_KM`].
///
/// # Example
/// ```
/// use elevation_matcher::GpsPoint;
/// use elevation_matcher::geo_utils::haversine_km;
///
/// let sf = GpsPoint::new(37.7749, -122.4194);
/// assert_eq!(haversine_km(&sf, &sf), 0.0);
/// ```
pub fn haversine_km(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let d_lat = (p2.latitude - p1.latitude).to_radians();
    let d_lon = (p2.longitude - p1.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + p1.latitude.to_radians().cos()
            * p2.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Check whether `candidate` lies within `radius_km` of `origin` (inclusive).
pub fn within_radius(origin: &GpsPoint, candidate: &GpsPoint, radius_km: f64) -> bool {
    haversine_km(origin, candidate) <= radius_km
}

/// Haversine distance between two GPS points in meters.
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Total length of a coordinate track in meters.
///
/// Uses geo's `Haversine`, whose mean Earth radius is 6371.0088 km, not the
/// rounded [`EARTH_RADIUS_KM`] of the start-point filter. The two differ by
/// about 1.4 ppm (~1.4 m per 1000 km), well below GPS noise.
///
/// Returns 0.0 for fewer than two points.
pub fn track_length(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_symmetry() {
        let a = GpsPoint::new(37.7749, -122.4194);
        let b = GpsPoint::new(37.8, -122.5);
        assert_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
    }

    #[test]
    fn test_within_radius_same_point() {
        let p = GpsPoint::new(46.5197, 6.6323);
        assert!(within_radius(&p, &p, 0.001));
        assert!(within_radius(&p, &p, 0.0));
    }

    #[test]
    fn test_track_length_agrees_with_km_distance() {
        let track = vec![GpsPoint::new(51.5074, -0.1278), GpsPoint::new(51.5174, -0.1278)];
        let meters = track_length(&track);
        let km = haversine_km(&track[0], &track[1]);
        // Same formula, only the radius differs (6371.0088km vs 6371km)
        let ratio = meters / (km * 1000.0);
        assert!((ratio - 6371.0088 / EARTH_RADIUS_KM).abs() < 1e-9, "ratio {}", ratio);
        assert_eq!(track_length(&track[..1]), 0.0);
    }
}
