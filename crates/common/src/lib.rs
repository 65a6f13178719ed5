//! Shared coordinate and tile types used across the riverworld crates.
//!
//! Coordinate systems, outermost first:
//! - geographic: WGS84 degrees (`GeoPoint`)
//! - planar: equirectangular projection meters (`PlanarPoint`)
//! - render space: origin-rebased, scaled world units (`RenderPoint`)
//!
//! Render space is the canonical system for everything downstream of the
//! normalizer: the tile index, the streaming cache, and terrain carving.

pub mod types;

pub use types::{GeoPoint, PlanarPoint, RenderPoint, Tile, TileKey};
