use glam::DVec2;
use riverworld_common::RenderPoint;

use crate::patch::TerrainPatch;

/// Channel shape parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarveParams {
    /// Lateral reach of the channel in world units (Manhattan metric).
    pub river_width: f64,
    /// Height removed at the channel centerline per sample.
    pub river_depth: f64,
}

impl Default for CarveParams {
    fn default() -> Self {
        Self {
            river_width: 10.0,
            river_depth: 2.0,
        }
    }
}

/// Carve the river channel into a tile's surface.
///
/// Walks unit steps along each consecutive pair of tile points. At every
/// sampled step, each vertex within `river_width` Manhattan distance of the
/// sample is lowered by `river_depth x (1 - distance / river_width)`:
/// linear falloff, deepest at the centerline. Contributions from different
/// samples and segments accumulate; repeated lowering is intentional and
/// not clamped. Flat normals are recomputed afterwards.
///
/// Fewer than two points deform nothing. Segments shorter than one unit
/// produce no samples and are skipped, which also keeps a zero-length
/// segment from yielding a NaN step vector.
pub fn carve(patch: &mut TerrainPatch, tile_points: &[RenderPoint], params: CarveParams) {
    if tile_points.len() < 2 {
        return;
    }

    for pair in tile_points.windows(2) {
        let from = pair[0].to_dvec2();
        let to = pair[1].to_dvec2();
        let delta = to - from;
        let steps = delta.length().floor() as u32;
        if steps == 0 {
            continue;
        }
        let step = delta / steps as f64;

        for s in 0..steps {
            let sample = from + step * s as f64;
            lower_around(patch, sample, params);
        }
    }

    patch.recompute_flat_normals();
    tracing::trace!(
        points = tile_points.len(),
        center = ?patch.center(),
        "carved tile patch"
    );
}

fn lower_around(patch: &mut TerrainPatch, sample: DVec2, params: CarveParams) {
    for i in 0..patch.vertex_count() {
        let (wx, wz) = patch.vertex_world(i);
        let distance = (sample.x - wx).abs() + (sample.y - wz).abs();
        if distance < params.river_width {
            let depth_factor = 1.0 - distance / params.river_width;
            patch.lower(i, (params.river_depth * depth_factor) as f32);
        }
    }
}
