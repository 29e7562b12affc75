#![warn(missing_docs)]

//! Tube meshes for molecular backbone ribbons, tubes and coils.
//!
//! A tube is swept along a sampled path: each sample carries a control
//! point, a `normal`/`binormal` frame pair and a cross-section width and
//! height. Cross-sections are elliptical or rounded ("stadium"), lateral
//! strips use an anti-twist triangulation, and both ends can be closed with
//! flat caps. Output goes to any [`molmesh_mesh::MeshSink`], so many tubes
//! can share one append session.
//!
//! # Example
//!
//! ```
//! use molmesh_mesh::MeshBuilder;
//! use molmesh_math::Point3;
//! use molmesh_tube::{
//!     line_points, rotation_minimizing_frames, CrossSection, OwnedTubeSamples, TubeBuilder,
//!     TubeParams,
//! };
//!
//! let points = line_points(Point3::origin(), Point3::new(0.0, 0.0, 10.0), 11);
//! let frames = rotation_minimizing_frames(&points).unwrap();
//! let samples = OwnedTubeSamples::uniform(&frames, 0.5, 1.5);
//!
//! let params = TubeParams::default()
//!     .with_linear_segments(samples.linear_segments())
//!     .with_radial_segments(12)
//!     .with_cross_section(CrossSection::Rounded);
//!
//! let builder = TubeBuilder::new();
//! let mut sink = MeshBuilder::new();
//! let stats = builder.add_tube(&mut sink, &samples.as_samples(), &params).unwrap();
//!
//! let mesh = sink.finish();
//! assert_eq!(mesh.num_vertices(), stats.vertices);
//! assert_eq!(stats.vertices, 11 * 12 + 2 * 13);
//! ```

mod cos_sin;
mod error;
mod frame;
mod profile;
mod samples;
mod tube;

pub use cos_sin::{CosSin, CosSinCache};
pub use error::{TubeError, TubeResult};
pub use frame::{helix_points, line_points, rotation_minimizing_frames, PathFrame};
pub use profile::{CrossSection, ProfileEvaluator, ProfilePoint};
pub use samples::{OwnedTubeSamples, PathSample, TubeSamples};
pub use tube::{add_tube, TubeBuilder, TubeParams, TubeStats};
