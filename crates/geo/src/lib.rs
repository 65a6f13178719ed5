//! Geodata pipeline: projection, normalization, and import.
//!
//! Raw WGS84 samples are projected onto a flat plane (equirectangular,
//! fixed Earth radius), then rebased onto a local origin and scaled down
//! into render space. Everything downstream of this crate works in render
//! space only.
//!
//! # Invariants
//! - Projection is pure and infallible; inputs are assumed finite degrees.
//! - `normalize(origin) == (0, 0)` for every normalizer.
//! - Malformed import records are skipped, never fatal.

pub mod import;
pub mod normalize;
pub mod project;

pub use import::{EnvironmentFeature, FeatureKind, ImportError};
pub use normalize::{PathBounds, PathNormalizer};
pub use project::{EARTH_RADIUS, project, unproject};

use riverworld_common::{GeoPoint, PlanarPoint, RenderPoint};

pub fn crate_info() -> &'static str {
    "riverworld-geo v0.1.0"
}

/// Project a raw geographic path and rebase it onto its first sample.
///
/// Returns the render-space path together with the normalizer, so auxiliary
/// geometry (settlements, forests) can be normalized against the same
/// origin and share the path's render space. `None` for an empty path.
pub fn render_path(samples: &[GeoPoint], scale: f64) -> Option<(Vec<RenderPoint>, PathNormalizer)> {
    let planar: Vec<PlanarPoint> = samples.iter().map(|&s| project(s)).collect();
    let normalizer = PathNormalizer::from_path(&planar, scale)?;
    Some((normalizer.path(&planar), normalizer))
}
