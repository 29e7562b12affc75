#![warn(missing_docs)]

//! Growable triangle-mesh buffers for the molmesh geometry kernels.
//!
//! Geometry kernels append into a [`MeshSink`]; [`MeshBuilder`] is the
//! standard implementation, a single append session that many shapes write
//! into before the finished [`TriangleMesh`] is handed to a renderer or
//! written to disk.
//!
//! # Example
//!
//! ```
//! use molmesh_mesh::{MeshBuilder, MeshSink};
//!
//! let mut builder = MeshBuilder::new();
//! builder.set_group(3);
//! let base = builder.vertex_count() as u32;
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
//!     builder.append_vertex(x, y, 0.0);
//!     builder.append_normal(0.0, 0.0, 1.0);
//! }
//! builder.append_triangle(base, base + 1, base + 2);
//! builder.append_group_repeated(builder.current_group(), 3);
//!
//! let mesh = builder.finish();
//! assert_eq!(mesh.num_triangles(), 1);
//! assert_eq!(mesh.groups, vec![3, 3, 3]);
//! ```

pub mod builder;
pub mod error;
pub mod export;
pub mod mesh;

pub use builder::{MeshBuilder, MeshSink};
pub use error::{MeshError, Result};
pub use export::{export, obj_string, stl_bytes, Format};
pub use mesh::TriangleMesh;
