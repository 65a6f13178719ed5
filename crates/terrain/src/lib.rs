//! Terrain: per-tile grid patches, river-channel carving, bank colliders.
//!
//! Each tile owns its own position buffer, built fresh from a flat base
//! grid; carving folds height contributions into that buffer in place.
//! Engine-owned meshes and physics bodies stay behind the
//! [`GeometryBuilder`] and [`ColliderRegistry`] seams so the core never
//! touches concrete engine types.
//!
//! # Invariants
//! - Carving is deterministic over an isolated patch.
//! - Fewer than two tile points deform nothing and emit no colliders.
//! - Zero-length path segments are skipped, never divided by.

pub mod carve;
pub mod collider;
pub mod engine;
pub mod patch;

pub use carve::{CarveParams, carve};
pub use collider::{ColliderSegment, colliders_along};
pub use engine::{
    ColliderHandle, ColliderRegistry, GeometryBuilder, GeometryHandle, MemoryColliders,
    MemoryGeometry,
};
pub use patch::TerrainPatch;

pub fn crate_info() -> &'static str {
    "riverworld-terrain v0.1.0"
}
