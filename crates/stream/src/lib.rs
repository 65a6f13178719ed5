//! Streaming: the materialized-tile window around the moving agent.
//!
//! Each simulation tick, the cache looks ahead of the agent along the river
//! path, materializes every tile an upcoming point touches (flat patch,
//! carve, feature attachment, bank colliders), and evicts the oldest batch
//! once the resident count crosses the high-water mark.
//!
//! # Invariants
//! - A tile is materialized at most once until evicted.
//! - The resident count never exceeds the high-water mark after a tick.
//! - Eviction releases every sub-resource a tile owns: grid geometry,
//!   collider bodies, feature instances.
//!
//! Eviction is by insertion order, not spatial distance. Under the normal
//! monotonic traversal "oldest" is "farthest behind the agent"; an agent
//! reversing past the high-water mark can evict tiles it still sees. Known
//! limitation.

pub mod cache;
pub mod cursor;
pub mod features;

pub use cache::{MaterializedTile, StreamConfig, StreamStats, StreamUpdate, StreamingCache};
pub use cursor::{PathCursor, flow_field};
pub use features::{FeatureInstance, attach_features};

pub fn crate_info() -> &'static str {
    "riverworld-stream v0.1.0"
}
