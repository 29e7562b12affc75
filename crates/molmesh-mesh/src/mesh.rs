//! Finished triangle mesh ready for upload or export.

use molmesh_math::Point3;

use crate::error::{MeshError, Result};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// One group tag per vertex, used for picking and highlighting.
    pub groups: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: usize) -> [f32; 3] {
        let o = i * 3;
        [self.vertices[o], self.vertices[o + 1], self.vertices[o + 2]]
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: usize) -> [f32; 3] {
        let o = i * 3;
        [self.normals[o], self.normals[o + 1], self.normals[o + 2]]
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Merge another mesh into this one.
    ///
    /// Indices of `other` are shifted by the current vertex count; group tags
    /// are copied unchanged.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.groups.extend_from_slice(&other.groups);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounds of the vertex positions, `None` when empty.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut chunks = self.vertices.chunks_exact(3);
        let first = chunks.next()?;
        let mut min = Point3::new(first[0] as f64, first[1] as f64, first[2] as f64);
        let mut max = min;
        for v in chunks {
            for k in 0..3 {
                let c = v[k] as f64;
                min[k] = min[k].min(c);
                max[k] = max[k].max(c);
            }
        }
        Some((min, max))
    }

    /// Check that buffer lengths agree and every index is in range.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(MeshError::BufferMismatch {
                buffer: "vertices",
                expected: self.vertices.len() - self.vertices.len() % 3,
                actual: self.vertices.len(),
            });
        }
        let n = self.num_vertices();
        if self.normals.len() != n * 3 {
            return Err(MeshError::BufferMismatch {
                buffer: "normals",
                expected: n * 3,
                actual: self.normals.len(),
            });
        }
        if self.groups.len() != n {
            return Err(MeshError::BufferMismatch {
                buffer: "groups",
                expected: n,
                actual: self.groups.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::BufferMismatch {
                buffer: "indices",
                expected: self.indices.len() - self.indices.len() % 3,
                actual: self.indices.len(),
            });
        }
        for (triangle, tri) in self.triangles().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= n) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: n,
                });
            }
        }
        Ok(())
    }
}
