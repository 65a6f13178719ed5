use riverworld_common::{GeoPoint, PlanarPoint};

/// WGS84 equatorial radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Project a geographic sample onto a flat plane.
///
/// Equirectangular: degrees to radians, scaled by the Earth radius.
/// Not distance-accurate at scale; acceptable because the play area is
/// small relative to the Earth's radius. Elevation is unused, `y` is 0.
pub fn project(point: GeoPoint) -> PlanarPoint {
    PlanarPoint::new(
        EARTH_RADIUS * point.lon.to_radians(),
        EARTH_RADIUS * point.lat.to_radians(),
    )
}

/// Inverse of [`project`], recovering degrees from projection meters.
pub fn unproject(point: PlanarPoint) -> GeoPoint {
    GeoPoint::new(
        (point.x / EARTH_RADIUS).to_degrees(),
        (point.z / EARTH_RADIUS).to_degrees(),
    )
}
