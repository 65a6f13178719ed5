//! Spatial tiling: partitions the render-space plane into a fixed-size
//! square grid and indexes the river path against it, both ways.
//!
//! # Invariants
//! - `point → tiles` and `tile → points` are exact inverses.
//! - Built once per session, then read-only.
//! - Iteration order is reproducible: per-point tile enumeration is x-major
//!   ascending, and the tile map is ordered by key.

pub mod index;

pub use index::TileIndex;

pub fn crate_info() -> &'static str {
    "riverworld-tiling v0.1.0"
}
