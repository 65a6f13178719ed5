use std::collections::HashMap;

use glam::DVec3;
use riverworld_common::TileKey;

/// Handle to an engine-owned grid mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Handle to an engine-owned static collider body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub u64);

/// Engine-agnostic interface to grid geometry. The streaming core only ever
/// talks to this trait; concrete scene objects stay on the rendering side.
///
/// Handles stay valid until [`dispose`]; using a disposed handle is a caller
/// error.
///
/// [`dispose`]: Self::dispose
pub trait GeometryBuilder {
    /// Create a flat, subdivided square grid for a tile.
    fn create_grid(&mut self, key: TileKey, size: f64, subdivisions: u32) -> GeometryHandle;

    /// Replace the grid's vertex positions with a flat `xyz` triplet buffer.
    fn set_vertex_positions(&mut self, handle: GeometryHandle, positions: &[f32]);

    /// Recompute shading normals from the current vertex positions.
    fn recompute_normals(&mut self, handle: GeometryHandle);

    /// Release the grid and everything the engine allocated for it.
    fn dispose(&mut self, handle: GeometryHandle);
}

/// Engine-agnostic interface to static physics bodies along the banks.
pub trait ColliderRegistry {
    /// Register a static box: center, rotation around +y, half-extents.
    fn add_static_box(&mut self, center: DVec3, yaw: f64, half_extents: DVec3) -> ColliderHandle;

    /// Remove a previously registered body.
    fn remove(&mut self, handle: ColliderHandle);
}

/// Buffer-owning [`GeometryBuilder`] with no engine behind it.
///
/// Keeps every live grid's buffers in memory so the CLI and tests can
/// observe what the core handed to the rendering seam, and counts
/// creations/disposals so eviction is checkable.
#[derive(Debug, Default)]
pub struct MemoryGeometry {
    next_handle: u64,
    grids: HashMap<GeometryHandle, GridRecord>,
    created: usize,
    disposed: usize,
}

/// One live grid held by [`MemoryGeometry`].
#[derive(Debug, Clone)]
pub struct GridRecord {
    pub key: TileKey,
    pub size: f64,
    pub subdivisions: u32,
    /// Flat `xyz` triplets, empty until positions are set.
    pub positions: Vec<f32>,
    /// How many times normals were recomputed for this grid.
    pub normal_passes: u32,
}

impl MemoryGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.grids.len()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn disposed(&self) -> usize {
        self.disposed
    }

    pub fn grid(&self, handle: GeometryHandle) -> Option<&GridRecord> {
        self.grids.get(&handle)
    }
}

impl GeometryBuilder for MemoryGeometry {
    fn create_grid(&mut self, key: TileKey, size: f64, subdivisions: u32) -> GeometryHandle {
        let handle = GeometryHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.grids.insert(
            handle,
            GridRecord {
                key,
                size,
                subdivisions,
                positions: Vec::new(),
                normal_passes: 0,
            },
        );
        handle
    }

    fn set_vertex_positions(&mut self, handle: GeometryHandle, positions: &[f32]) {
        if let Some(grid) = self.grids.get_mut(&handle) {
            grid.positions.clear();
            grid.positions.extend_from_slice(positions);
        }
    }

    fn recompute_normals(&mut self, handle: GeometryHandle) {
        if let Some(grid) = self.grids.get_mut(&handle) {
            grid.normal_passes += 1;
        }
    }

    fn dispose(&mut self, handle: GeometryHandle) {
        if self.grids.remove(&handle).is_some() {
            self.disposed += 1;
        }
    }
}

/// Recording [`ColliderRegistry`] with no physics engine behind it.
#[derive(Debug, Default)]
pub struct MemoryColliders {
    next_handle: u64,
    boxes: HashMap<ColliderHandle, StaticBox>,
    added: usize,
    removed: usize,
}

/// One live static box held by [`MemoryColliders`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub center: DVec3,
    pub yaw: f64,
    pub half_extents: DVec3,
}

impl MemoryColliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn added(&self) -> usize {
        self.added
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    pub fn static_box(&self, handle: ColliderHandle) -> Option<&StaticBox> {
        self.boxes.get(&handle)
    }
}

impl ColliderRegistry for MemoryColliders {
    fn add_static_box(&mut self, center: DVec3, yaw: f64, half_extents: DVec3) -> ColliderHandle {
        let handle = ColliderHandle(self.next_handle);
        self.next_handle += 1;
        self.added += 1;
        self.boxes.insert(
            handle,
            StaticBox {
                center,
                yaw,
                half_extents,
            },
        );
        handle
    }

    fn remove(&mut self, handle: ColliderHandle) {
        if self.boxes.remove(&handle).is_some() {
            self.removed += 1;
        }
    }
}
