use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A raw geographic sample in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A projected point in meters. `y` carries no elevation and stays 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }
}

/// A point in render space: rebased onto the path origin and scaled down.
///
/// An ordered `Vec<RenderPoint>` is the river path; insertion order is
/// travel order and is never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub x: f64,
    pub z: f64,
}

impl RenderPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.z)
    }

    /// Euclidean distance to another render point.
    pub fn distance(self, other: RenderPoint) -> f64 {
        self.to_dvec2().distance(other.to_dvec2())
    }
}

impl From<DVec2> for RenderPoint {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, z: v.y }
    }
}

/// Integer grid key of a tile (XZ plane, Y ignored).
///
/// The same key always maps to the same tile footprint and center, so keys
/// double as identity for materialization and eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileKey {
    pub x: i64,
    pub z: i64,
}

impl TileKey {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Key of the tile whose footprint contains the given render point.
    pub fn containing(point: RenderPoint, tile_size: f64) -> Self {
        Self {
            x: (point.x / tile_size).floor() as i64,
            z: (point.z / tile_size).floor() as i64,
        }
    }

    /// Minimum (south-west) corner of the tile footprint in render space.
    pub fn min_corner(self, tile_size: f64) -> RenderPoint {
        RenderPoint::new(self.x as f64 * tile_size, self.z as f64 * tile_size)
    }

    /// Center of the tile footprint in render space.
    pub fn center(self, tile_size: f64) -> RenderPoint {
        let min = self.min_corner(tile_size);
        RenderPoint::new(min.x + tile_size / 2.0, min.z + tile_size / 2.0)
    }
}

/// A known tile: grid key plus its derived center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub key: TileKey,
    pub center: RenderPoint,
}

impl Tile {
    pub fn new(key: TileKey, tile_size: f64) -> Self {
        Self {
            key,
            center: key.center(tile_size),
        }
    }
}
