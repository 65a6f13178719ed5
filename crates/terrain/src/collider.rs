use glam::{DVec2, DVec3};
use riverworld_common::RenderPoint;

/// Collider box thickness (half-extent across the bank).
const BANK_HALF_WIDTH: f64 = 0.5;
/// Collider half-height; the box is centered this high so it sits on the
/// terrain.
const BANK_HALF_HEIGHT: f64 = 5.0;
/// Extra clearance between the channel edge and the bank wall.
const BANK_MARGIN: f64 = 2.0;

/// A static, axis-oriented box collider along one channel bank, handed to
/// the physics collaborator for static-body registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderSegment {
    /// Box center in render space (y is the half-height).
    pub center: DVec3,
    /// Rotation around +y, `atan2(dx, dz)` of the segment tangent.
    pub yaw: f64,
    pub half_extents: DVec3,
}

/// Derive bank colliders for a tile's stretch of the river.
///
/// Only the first non-degenerate segment of the tile's point list emits
/// colliders (one per bank, offset perpendicular from the segment start at
/// `river_width / 2 + margin`, spanning the segment's length). Callers
/// needing full-bank coverage walk tiles sequentially. Fewer than two
/// points, or only zero-length segments, emit nothing.
pub fn colliders_along(tile_points: &[RenderPoint], river_width: f64) -> Vec<ColliderSegment> {
    for pair in tile_points.windows(2) {
        let from = pair[0].to_dvec2();
        let to = pair[1].to_dvec2();
        let direction = to - from;
        let length = direction.length();
        if length == 0.0 {
            continue;
        }

        let tangent = direction / length;
        let perpendicular = DVec2::new(-tangent.y, tangent.x);
        let offset = river_width / 2.0 + BANK_MARGIN;
        let yaw = direction.x.atan2(direction.y);

        return [offset, -offset]
            .iter()
            .map(|&side| {
                let bank_start = from + perpendicular * side;
                let midpoint = bank_start + direction / 2.0;
                ColliderSegment {
                    center: DVec3::new(midpoint.x, BANK_HALF_HEIGHT, midpoint.y),
                    yaw,
                    half_extents: DVec3::new(BANK_HALF_WIDTH, BANK_HALF_HEIGHT, length / 2.0),
                }
            })
            .collect();
    }
    Vec::new()
}
