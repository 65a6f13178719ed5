use std::collections::BTreeMap;

use riverworld_common::{RenderPoint, Tile, TileKey};

/// Bidirectional index between the river path and the tile grid.
///
/// For every path point, a square catchment box of side `2 × catchment
/// radius` is intersected with the grid; every overlapped cell becomes a
/// known tile. A point near a tile boundary lands in all adjacent tiles on
/// purpose: a tile's point list must include path points lying outside its
/// own footprint but inside its catchment, so terrain carving stays
/// continuous across tile seams.
///
/// Points are addressed by their index into the path, which preserves
/// travel order and keeps duplicate coordinates distinct.
pub struct TileIndex {
    tile_size: f64,
    catchment_radius: f64,
    path: Vec<RenderPoint>,
    /// Per path point, the keys of tiles whose catchment contains it,
    /// in enumeration order.
    point_tiles: Vec<Vec<TileKey>>,
    /// Per tile, indices into `path` of its catchment points, in path order.
    tiles: BTreeMap<TileKey, Vec<usize>>,
}

impl TileIndex {
    /// Build the index for a normalized path. The path is consumed; the
    /// index is the canonical owner of the render-space centerline.
    pub fn build(tile_size: f64, path: Vec<RenderPoint>, catchment_radius: f64) -> Self {
        assert!(tile_size > 0.0, "tile_size must be positive");
        assert!(catchment_radius >= 0.0, "catchment_radius must not be negative");

        let mut point_tiles = Vec::with_capacity(path.len());
        let mut tiles: BTreeMap<TileKey, Vec<usize>> = BTreeMap::new();

        for (i, &point) in path.iter().enumerate() {
            let lo = TileKey::containing(
                RenderPoint::new(point.x - catchment_radius, point.z - catchment_radius),
                tile_size,
            );
            let hi = TileKey::containing(
                RenderPoint::new(point.x + catchment_radius, point.z + catchment_radius),
                tile_size,
            );

            let mut keys = Vec::with_capacity(((hi.x - lo.x + 1) * (hi.z - lo.z + 1)) as usize);
            for tx in lo.x..=hi.x {
                for tz in lo.z..=hi.z {
                    let key = TileKey::new(tx, tz);
                    tiles.entry(key).or_default().push(i);
                    keys.push(key);
                }
            }
            point_tiles.push(keys);
        }

        tracing::info!(
            points = path.len(),
            tiles = tiles.len(),
            tile_size,
            catchment_radius,
            "built tile index"
        );

        Self {
            tile_size,
            catchment_radius,
            path,
            point_tiles,
            tiles,
        }
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn catchment_radius(&self) -> f64 {
        self.catchment_radius
    }

    /// The normalized path the index was built from, in travel order.
    pub fn path(&self) -> &[RenderPoint] {
        &self.path
    }

    /// Number of indexed tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, key: TileKey) -> bool {
        self.tiles.contains_key(&key)
    }

    /// The tile for a key, with its derived center.
    pub fn tile(&self, key: TileKey) -> Tile {
        Tile::new(key, self.tile_size)
    }

    /// All indexed tiles, in key order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.keys().map(|&key| self.tile(key))
    }

    /// Tiles whose catchment contains the path point at `index`.
    ///
    /// An out-of-range index is an index-miss, not an error: no tiles.
    pub fn tiles_for_point(&self, index: usize) -> &[TileKey] {
        self.point_tiles.get(index).map_or(&[], Vec::as_slice)
    }

    /// Indices of the path points inside the tile's catchment, in path
    /// order. Empty for an unknown tile.
    pub fn point_indices_in_tile(&self, key: TileKey) -> &[usize] {
        self.tiles.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Path points inside the tile's catchment, resolved and in path order.
    pub fn points_in_tile(&self, key: TileKey) -> Vec<RenderPoint> {
        self.point_indices_in_tile(key)
            .iter()
            .map(|&i| self.path[i])
            .collect()
    }
}
