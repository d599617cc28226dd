//! Mesh buffers handed to renderers.

use beamviz_math::Point3;
use serde::Serialize;

/// Quad surface mesh: shared vertices plus four-index faces.
///
/// Faces may be degenerate (zero area) where sections share collapsed
/// corners; no vertex deduplication is performed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuadMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub vertices: Vec<f64>,
    /// Quad faces as vertex indices, in boundary order.
    pub faces: Vec<[u32; 4]>,
}

impl QuadMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of quad faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3],
            self.vertices[i * 3 + 1],
            self.vertices[i * 3 + 2],
        )
    }

    /// Append vertices from points.
    pub fn push_points(&mut self, points: &[Point3]) {
        self.vertices.reserve(points.len() * 3);
        for p in points {
            self.vertices.extend_from_slice(&[p.x, p.y, p.z]);
        }
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &QuadMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|&f| f.map(|i| i + offset)));
    }

    /// Axis-aligned bounds `(min, max)`, or `None` without vertices.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        if self.vertices.len() < 3 {
            return None;
        }
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for v in self.vertices.chunks_exact(3) {
            for k in 0..3 {
                min[k] = min[k].min(v[k]);
                max[k] = max[k].max(v[k]);
            }
        }
        Some((min, max))
    }

    /// Split every quad `(a, b, c, d)` into `(a, b, c)` and `(a, c, d)`.
    ///
    /// Normals are area-weighted averages of the adjacent triangles.
    pub fn triangulate(&self) -> TriangleMesh {
        let mut indices = Vec::with_capacity(self.faces.len() * 6);
        for &[a, b, c, d] in &self.faces {
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }

        let mut normals = vec![0.0f64; self.vertices.len()];
        for tri in indices.chunks_exact(3) {
            let (p0, p1, p2) = (
                self.vertex(tri[0] as usize),
                self.vertex(tri[1] as usize),
                self.vertex(tri[2] as usize),
            );
            let n = (p1 - p0).cross(&(p2 - p0));
            for &i in tri {
                let i = i as usize * 3;
                normals[i] += n.x;
                normals[i + 1] += n.y;
                normals[i + 2] += n.z;
            }
        }
        for n in normals.chunks_exact_mut(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if len > 1e-30 {
                n.iter_mut().for_each(|c| *c /= len);
            }
        }

        TriangleMesh {
            vertices: self.vertices.iter().map(|&v| v as f32).collect(),
            indices,
            normals: normals.iter().map(|&n| n as f32).collect(),
        }
    }
}

/// Triangle mesh for triangle-only consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> QuadMesh {
        let mut m = QuadMesh::new();
        m.push_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        m.faces.push([0, 1, 2, 3]);
        m
    }

    #[test]
    fn test_counts() {
        let m = unit_square();
        assert_eq!(m.num_vertices(), 4);
        assert_eq!(m.num_faces(), 1);
        assert_eq!(m.vertex(2), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = unit_square();
        a.merge(&unit_square());
        assert_eq!(a.num_vertices(), 8);
        assert_eq!(a.faces[1], [4, 5, 6, 7]);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(unit_square().bounds(), Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])));
        assert_eq!(QuadMesh::new().bounds(), None);
    }

    #[test]
    fn test_triangulate() {
        let tri = unit_square().triangulate();
        assert_eq!(tri.num_triangles(), 2);
        assert_eq!(tri.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(tri.num_vertices(), 4);
        for n in tri.normals.chunks_exact(3) {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_triangulate_degenerate_face() {
        let mut m = QuadMesh::new();
        m.push_points(&[Point3::origin(); 4]);
        m.faces.push([0, 1, 2, 3]);
        let tri = m.triangulate();
        assert!(tri.normals.iter().all(|n| n.is_finite()));
    }
}
