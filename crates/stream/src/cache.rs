use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use riverworld_common::{RenderPoint, Tile, TileKey};
use riverworld_geo::EnvironmentFeature;
use riverworld_terrain::{
    CarveParams, ColliderHandle, ColliderRegistry, GeometryBuilder, GeometryHandle, TerrainPatch,
    carve, colliders_along,
};
use riverworld_tiling::TileIndex;

use crate::features::{FeatureInstance, attach_features};

/// Streaming configuration: lookahead window, capacity bound, tile shape.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// How far ahead of the agent (on the dominant travel axis) path points
    /// are considered upcoming.
    pub lookahead_distance: f64,
    /// Resident-tile count that triggers batch eviction.
    ///
    /// Eviction picks the lowest-sequence tiles regardless of where they
    /// are; an agent reversing past this mark can lose tiles it still sees.
    pub high_water_mark: usize,
    /// How many of the oldest tiles one eviction removes.
    pub evict_batch: usize,
    /// Grid cells per tile side.
    pub subdivisions: u32,
    /// Channel shape carved into each tile.
    pub carve: CarveParams,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            lookahead_distance: 150.0,
            high_water_mark: 80,
            evict_batch: 20,
            subdivisions: 50,
            carve: CarveParams::default(),
        }
    }
}

/// A resident tile and every sub-resource it owns.
///
/// Exclusively owned by the cache; eviction releases the grid geometry and
/// collider bodies and drops the feature instances.
#[derive(Debug, Clone)]
pub struct MaterializedTile {
    pub tile: Tile,
    /// Insertion order; smallest is evicted first.
    pub sequence: u64,
    pub geometry: GeometryHandle,
    pub colliders: Vec<ColliderHandle>,
    pub features: Vec<FeatureInstance>,
}

/// What one tick changed: tiles brought in and tiles torn down, in order.
#[derive(Debug, Clone, Default)]
pub struct StreamUpdate {
    pub materialized: Vec<Tile>,
    pub evicted: Vec<Tile>,
}

/// Per-tick streaming statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub materialized_this_tick: usize,
    pub evicted_this_tick: usize,
    pub resident_tiles: usize,
    pub tick_time: Duration,
}

/// The mutable window of materialized tiles around the agent.
///
/// Holds the session's engine seams and the surroundings data; consults the
/// read-only tile index every tick. Call [`advance`] once per simulation
/// tick with the agent's current position.
///
/// [`advance`]: Self::advance
pub struct StreamingCache<'a, G: GeometryBuilder, C: ColliderRegistry> {
    index: &'a TileIndex,
    surroundings: Vec<EnvironmentFeature>,
    config: StreamConfig,
    geometry: G,
    colliders: C,
    /// Resident tiles in insertion order, oldest at the front.
    resident: VecDeque<MaterializedTile>,
    resident_keys: HashSet<TileKey>,
    next_sequence: u64,
    stats: StreamStats,
}

impl<'a, G: GeometryBuilder, C: ColliderRegistry> StreamingCache<'a, G, C> {
    pub fn new(
        index: &'a TileIndex,
        surroundings: Vec<EnvironmentFeature>,
        config: StreamConfig,
        geometry: G,
        colliders: C,
    ) -> Self {
        Self {
            index,
            surroundings,
            config,
            geometry,
            colliders,
            resident: VecDeque::new(),
            resident_keys: HashSet::new(),
            next_sequence: 0,
            stats: StreamStats::default(),
        }
    }

    /// One streaming tick.
    ///
    /// Materializes every tile touched by a path point in the lookahead
    /// slice `[agent.x, agent.x + lookahead)`, then evicts whole batches of
    /// the oldest tiles while the resident count exceeds the high-water
    /// mark. A point with no indexed tiles is an index-miss, not an error;
    /// a tile with no points gets a flat patch.
    pub fn advance(&mut self, agent: RenderPoint) -> StreamUpdate {
        let _span = tracing::info_span!("stream_advance").entered();
        let tick_start = Instant::now();

        let mut update = StreamUpdate::default();

        for (i, point) in self.index.path().iter().enumerate() {
            if point.x < agent.x || point.x >= agent.x + self.config.lookahead_distance {
                continue;
            }
            for &key in self.index.tiles_for_point(i) {
                if self.resident_keys.contains(&key) {
                    continue;
                }
                update.materialized.push(self.materialize(key));
            }
        }

        while self.resident.len() > self.config.high_water_mark {
            for _ in 0..self.config.evict_batch {
                let Some(tile) = self.resident.pop_front() else {
                    break;
                };
                self.release(&tile);
                self.resident_keys.remove(&tile.tile.key);
                update.evicted.push(tile.tile);
            }
        }

        self.stats = StreamStats {
            materialized_this_tick: update.materialized.len(),
            evicted_this_tick: update.evicted.len(),
            resident_tiles: self.resident.len(),
            tick_time: tick_start.elapsed(),
        };

        tracing::trace!(
            materialized = update.materialized.len(),
            evicted = update.evicted.len(),
            resident = self.resident.len(),
            "stream advance complete"
        );

        update
    }

    fn materialize(&mut self, key: TileKey) -> Tile {
        let tile = self.index.tile(key);
        let tile_size = self.index.tile_size();
        let points = self.index.points_in_tile(key);

        let mut patch = TerrainPatch::flat(tile.center, tile_size, self.config.subdivisions);
        carve(&mut patch, &points, self.config.carve);

        let geometry = self
            .geometry
            .create_grid(key, tile_size, self.config.subdivisions);
        self.geometry
            .set_vertex_positions(geometry, patch.positions_raw());
        self.geometry.recompute_normals(geometry);

        let colliders = colliders_along(&points, self.config.carve.river_width)
            .into_iter()
            .map(|seg| {
                self.colliders
                    .add_static_box(seg.center, seg.yaw, seg.half_extents)
            })
            .collect();

        let features = attach_features(&self.surroundings, tile.center, tile_size);

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        tracing::debug!(?key, sequence, points = points.len(), "materializing tile");

        self.resident.push_back(MaterializedTile {
            tile,
            sequence,
            geometry,
            colliders,
            features,
        });
        self.resident_keys.insert(key);
        tile
    }

    fn release(&mut self, tile: &MaterializedTile) {
        tracing::debug!(key = ?tile.tile.key, sequence = tile.sequence, "evicting tile");
        self.geometry.dispose(tile.geometry);
        for &handle in &tile.colliders {
            self.colliders.remove(handle);
        }
    }

    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    pub fn is_materialized(&self, key: TileKey) -> bool {
        self.resident_keys.contains(&key)
    }

    /// Resident tiles, oldest first.
    pub fn resident(&self) -> impl Iterator<Item = &MaterializedTile> {
        self.resident.iter()
    }

    /// Statistics from the last tick.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn colliders(&self) -> &C {
        &self.colliders
    }
}
