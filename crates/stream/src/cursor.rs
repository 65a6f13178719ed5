use glam::DVec2;
use riverworld_common::RenderPoint;

/// Per-point flow vectors for the river: each segment's unit tangent scaled
/// by `flow_speed`, consumed by the boat-physics collaborator as the
/// current pushing the agent downstream.
///
/// The last segment's vector is repeated so every point index has a vector.
/// A zero-length segment contributes a zero vector rather than NaN. Paths
/// shorter than two points get zero vectors throughout.
pub fn flow_field(path: &[RenderPoint], flow_speed: f64) -> Vec<DVec2> {
    if path.len() < 2 {
        return vec![DVec2::ZERO; path.len()];
    }

    let mut vectors = Vec::with_capacity(path.len());
    for pair in path.windows(2) {
        let direction = pair[1].to_dvec2() - pair[0].to_dvec2();
        let length = direction.length();
        if length == 0.0 {
            vectors.push(DVec2::ZERO);
        } else {
            vectors.push(direction / length * flow_speed);
        }
    }
    vectors.push(vectors[vectors.len() - 1]);
    vectors
}

/// Tracks the agent's progression along the path.
///
/// The index advances when the agent is closer to the next path point than
/// to the current one, and never moves backwards. It addresses the agent's
/// current flow vector and anchors the lookahead slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathCursor {
    index: usize,
}

impl PathCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance past the current point if the agent has come closer to the
    /// next one. Returns the (possibly updated) index.
    pub fn advance(&mut self, agent: RenderPoint, path: &[RenderPoint]) -> usize {
        if self.index + 1 < path.len() {
            let to_current = agent.distance(path[self.index]);
            let to_next = agent.distance(path[self.index + 1]);
            if to_next < to_current {
                self.index += 1;
            }
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Vec<RenderPoint> {
        vec![
            RenderPoint::new(0.0, 0.0),
            RenderPoint::new(10.0, 0.0),
            RenderPoint::new(10.0, 10.0),
        ]
    }

    #[test]
    fn flow_vectors_are_unit_tangents_scaled() {
        let vectors = flow_field(&path(), 2.0);
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0], DVec2::new(2.0, 0.0));
        assert_eq!(vectors[1], DVec2::new(0.0, 2.0));
    }

    #[test]
    fn last_vector_is_repeated() {
        let vectors = flow_field(&path(), 1.0);
        assert_eq!(vectors[1], vectors[2]);
    }

    #[test]
    fn zero_length_segment_gives_zero_vector() {
        let path = vec![
            RenderPoint::new(0.0, 0.0),
            RenderPoint::new(0.0, 0.0),
            RenderPoint::new(5.0, 0.0),
        ];
        let vectors = flow_field(&path, 1.0);
        assert_eq!(vectors[0], DVec2::ZERO);
        assert_eq!(vectors[1], DVec2::new(1.0, 0.0));
        assert!(vectors.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn short_paths_get_zero_vectors() {
        assert!(flow_field(&[], 1.0).is_empty());
        assert_eq!(flow_field(&[RenderPoint::new(3.0, 4.0)], 1.0), vec![DVec2::ZERO]);
    }

    #[test]
    fn cursor_advances_when_next_point_is_closer() {
        let path = path();
        let mut cursor = PathCursor::new();

        assert_eq!(cursor.advance(RenderPoint::new(1.0, 0.0), &path), 0);
        assert_eq!(cursor.advance(RenderPoint::new(7.0, 0.0), &path), 1);
        assert_eq!(cursor.advance(RenderPoint::new(10.0, 8.0), &path), 2);
    }

    #[test]
    fn cursor_stops_at_the_last_point() {
        let path = path();
        let mut cursor = PathCursor::new();
        for _ in 0..10 {
            cursor.advance(RenderPoint::new(100.0, 100.0), &path);
        }
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn cursor_never_moves_backwards() {
        let path = path();
        let mut cursor = PathCursor::new();
        cursor.advance(RenderPoint::new(7.0, 0.0), &path);
        assert_eq!(cursor.index(), 1);
        // Agent drifting back toward the start leaves the index alone.
        cursor.advance(RenderPoint::new(2.0, 0.0), &path);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn cursor_on_empty_path() {
        let mut cursor = PathCursor::new();
        assert_eq!(cursor.advance(RenderPoint::new(0.0, 0.0), &[]), 0);
    }
}
