//! Append-only mesh sink shared by every shape in a scene.
//!
//! A scene builds many shapes (tubes, caps, spheres, ...) into one set of
//! growable buffers before a single upload. Each shape reads
//! [`MeshSink::vertex_count`] before writing and uses it as the base for its
//! indices, so shapes must be appended one after another, never interleaved.

use crate::mesh::TriangleMesh;

/// The output contract consumed by geometry kernels.
pub trait MeshSink {
    /// Number of vertices appended so far. Read before writing to get the
    /// index base for the next shape.
    fn vertex_count(&self) -> usize;

    /// Group id the caller has selected for the next shape.
    fn current_group(&self) -> u32;

    /// Append one vertex position.
    fn append_vertex(&mut self, x: f64, y: f64, z: f64);

    /// Append one vertex normal.
    fn append_normal(&mut self, x: f64, y: f64, z: f64);

    /// Append one triangle of absolute vertex indices.
    fn append_triangle(&mut self, i0: u32, i1: u32, i2: u32);

    /// Append `count` copies of `group` to the per-vertex group tags.
    fn append_group_repeated(&mut self, group: u32, count: usize);
}

/// Growable flat buffers implementing [`MeshSink`].
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
    groups: Vec<u32>,
    current_group: u32,
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with room for `vertices` vertices and `triangles` triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(triangles * 3),
            groups: Vec::with_capacity(vertices),
            current_group: 0,
        }
    }

    /// Select the group id tagged onto subsequently built shapes.
    pub fn set_group(&mut self, group: u32) {
        self.current_group = group;
    }

    /// Advance to the next group id and return it.
    ///
    /// Returns `None`, leaving the current group unchanged, once the id
    /// space is exhausted at `u32::MAX`.
    pub fn next_group(&mut self) -> Option<u32> {
        self.current_group = self.current_group.checked_add(1)?;
        Some(self.current_group)
    }

    /// Number of triangles appended so far.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of group tags appended so far.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Copy the current buffers into a [`TriangleMesh`].
    pub fn mesh(&self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices.clone(),
            normals: self.normals.clone(),
            indices: self.indices.clone(),
            groups: self.groups.clone(),
        }
    }

    /// Consume the builder and hand its buffers over as a [`TriangleMesh`].
    pub fn finish(self) -> TriangleMesh {
        TriangleMesh {
            vertices: self.vertices,
            normals: self.normals,
            indices: self.indices,
            groups: self.groups,
        }
    }
}

impl MeshSink for MeshBuilder {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    fn current_group(&self) -> u32 {
        self.current_group
    }

    #[inline]
    fn append_vertex(&mut self, x: f64, y: f64, z: f64) {
        self.vertices
            .extend_from_slice(&[x as f32, y as f32, z as f32]);
    }

    #[inline]
    fn append_normal(&mut self, x: f64, y: f64, z: f64) {
        self.normals
            .extend_from_slice(&[x as f32, y as f32, z as f32]);
    }

    #[inline]
    fn append_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    fn append_group_repeated(&mut self, group: u32, count: usize) {
        self.groups.resize(self.groups.len() + count, group);
    }
}
