use glam::Vec3;
use riverworld_common::RenderPoint;

/// An owned, per-tile terrain grid: a square, subdivided plane positioned
/// at the tile center, with vertex positions in patch-local space and
/// heights in `y`.
///
/// The grid starts flat; carving lowers vertex heights in place. Buffers
/// are plain `f32` triplets so they can be handed to the rendering
/// collaborator without conversion.
#[derive(Debug, Clone)]
pub struct TerrainPatch {
    size: f64,
    subdivisions: u32,
    center: RenderPoint,
    /// Local-space vertex positions, `(subdivisions + 1)^2` entries.
    positions: Vec<[f32; 3]>,
    /// Triangle list, two triangles per grid cell.
    indices: Vec<u32>,
    /// One normal per triangle (flat shading), empty until recomputed.
    face_normals: Vec<Vec3>,
}

impl TerrainPatch {
    /// Build a flat grid of `subdivisions x subdivisions` cells spanning
    /// `size x size` units, centered on `center`.
    pub fn flat(center: RenderPoint, size: f64, subdivisions: u32) -> Self {
        assert!(size > 0.0, "size must be positive");
        assert!(subdivisions > 0, "subdivisions must be positive");

        let verts_per_side = subdivisions as usize + 1;
        let step = size / subdivisions as f64;
        let half = size / 2.0;

        let mut positions = Vec::with_capacity(verts_per_side * verts_per_side);
        for iz in 0..verts_per_side {
            for ix in 0..verts_per_side {
                positions.push([
                    (ix as f64 * step - half) as f32,
                    0.0,
                    (iz as f64 * step - half) as f32,
                ]);
            }
        }

        let mut indices = Vec::with_capacity(subdivisions as usize * subdivisions as usize * 6);
        for iz in 0..subdivisions as usize {
            for ix in 0..subdivisions as usize {
                let i0 = (iz * verts_per_side + ix) as u32;
                let i1 = i0 + 1;
                let i2 = i0 + verts_per_side as u32;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        Self {
            size,
            subdivisions,
            center,
            positions,
            indices,
            face_normals: Vec::new(),
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// World-space position of the patch (the tile center).
    pub fn center(&self) -> RenderPoint {
        self.center
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// One normal per triangle; empty until [`recompute_flat_normals`]
    /// has run.
    ///
    /// [`recompute_flat_normals`]: Self::recompute_flat_normals
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Position buffer as a flat `f32` slice for the rendering seam.
    pub fn positions_raw(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// World-space `(x, z)` of a vertex: local position plus patch center.
    pub fn vertex_world(&self, index: usize) -> (f64, f64) {
        let p = self.positions[index];
        (p[0] as f64 + self.center.x, p[2] as f64 + self.center.z)
    }

    /// Height of a vertex.
    pub fn height(&self, index: usize) -> f32 {
        self.positions[index][1]
    }

    /// Lower a vertex by `amount`. Contributions accumulate.
    pub fn lower(&mut self, index: usize, amount: f32) {
        self.positions[index][1] -= amount;
    }

    /// Recompute one flat normal per triangle from current positions.
    pub fn recompute_flat_normals(&mut self) {
        self.face_normals.clear();
        self.face_normals.reserve(self.indices.len() / 3);
        for tri in self.indices.chunks_exact(3) {
            let a = Vec3::from(self.positions[tri[0] as usize]);
            let b = Vec3::from(self.positions[tri[1] as usize]);
            let c = Vec3::from(self.positions[tri[2] as usize]);
            self.face_normals
                .push((b - a).cross(c - a).normalize_or_zero());
        }
    }

    /// Vertex index nearest to a world-space position. Test helper for
    /// asserting carve depths at known spots.
    pub fn nearest_vertex(&self, x: f64, z: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for i in 0..self.positions.len() {
            let (wx, wz) = self.vertex_world(i);
            let d = (wx - x).powi(2) + (wz - z).powi(2);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }
}
