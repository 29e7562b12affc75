//! Error types for mesh buffers and writers.

use thiserror::Error;

/// Errors that can occur while validating or writing meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// Flat buffers disagree about the vertex count.
    #[error("buffer length mismatch: {buffer} has {actual} entries, expected {expected}")]
    BufferMismatch {
        /// Name of the offending buffer.
        buffer: &'static str,
        /// Expected entry count.
        expected: usize,
        /// Actual entry count.
        actual: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Triangle number.
        triangle: usize,
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Output format is not recognised.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// IO failure while writing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
