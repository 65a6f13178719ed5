use riverworld_common::{PlanarPoint, RenderPoint};
use serde::{Deserialize, Serialize};

/// Rebases projected coordinates onto a local origin and divides them by a
/// uniform scale, producing render-space coordinates.
///
/// A normalizer built from a path can also normalize unrelated auxiliary
/// points (feature locations, polygon shapes) against the *path's* origin,
/// so all geometry shares one render space. A zero scale is a caller error
/// and is not defended against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathNormalizer {
    origin: PlanarPoint,
    scale: f64,
}

impl PathNormalizer {
    /// Normalizer anchored at an explicit reference point.
    pub fn new(origin: PlanarPoint, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Normalizer anchored at the first point of the path.
    ///
    /// `None` for an empty path.
    pub fn from_path(path: &[PlanarPoint], scale: f64) -> Option<Self> {
        path.first().map(|&origin| Self::new(origin, scale))
    }

    pub fn origin(&self) -> PlanarPoint {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Normalize a single point against this normalizer's origin.
    pub fn point(&self, p: PlanarPoint) -> RenderPoint {
        RenderPoint::new(
            (p.x - self.origin.x) / self.scale,
            (p.z - self.origin.z) / self.scale,
        )
    }

    /// Normalize an entire path at once.
    pub fn path(&self, points: &[PlanarPoint]) -> Vec<RenderPoint> {
        points.iter().map(|&p| self.point(p)).collect()
    }
}

/// Axis-aligned extent of a render-space path.
///
/// Derived read-only statistic, used by the rendering collaborator for
/// scene-extent sizing (sky-box dimensioning). Not part of streaming state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathBounds {
    pub min: RenderPoint,
    pub max: RenderPoint,
}

impl PathBounds {
    /// Bounds of a path. `None` for an empty path.
    pub fn of(path: &[RenderPoint]) -> Option<Self> {
        let first = path.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in &path[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.z = bounds.min.z.min(p.z);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.z = bounds.max.z.max(p.z);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> RenderPoint {
        RenderPoint::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}
