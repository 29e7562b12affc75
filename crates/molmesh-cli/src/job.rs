//! Tube jobs: a path, a cross-section and how to split it into groups.

use std::path::Path;

use anyhow::{bail, Context, Result};
use molmesh_math::Point3;
use molmesh_mesh::{MeshBuilder, TriangleMesh};
use molmesh_tube::{
    helix_points, line_points, rotation_minimizing_frames, CrossSection, OwnedTubeSamples,
    TubeBuilder, TubeParams,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Shape of the swept path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Straight segment along +Z.
    Straight,
    /// Helix around the Z axis.
    #[default]
    Helix,
}

/// Everything needed to build one demo mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeJob {
    /// Path shape.
    pub path: PathKind,
    /// Length of a straight path.
    pub length: f64,
    /// Helix radius.
    pub radius: f64,
    /// Helix rise per turn.
    pub pitch: f64,
    /// Helix turns.
    pub turns: f64,
    /// Linear segments along the whole path.
    pub linear_segments: usize,
    /// Vertices around each ring.
    pub radial_segments: usize,
    /// Cross-section width.
    pub width: f64,
    /// Cross-section height.
    pub height: f64,
    /// Cross-section shape.
    pub cross_section: CrossSection,
    /// Cap the start of every piece.
    pub start_cap: bool,
    /// Cap the end of every piece.
    pub end_cap: bool,
    /// Number of consecutive tubes (and group ids) the path is split into.
    pub pieces: usize,
}

impl Default for TubeJob {
    fn default() -> Self {
        Self {
            path: PathKind::Helix,
            length: 10.0,
            radius: 2.3,
            pitch: 5.4,
            turns: 3.0,
            linear_segments: 96,
            radial_segments: 16,
            width: 0.4,
            height: 1.2,
            cross_section: CrossSection::Elliptical,
            start_cap: true,
            end_cap: true,
            pieces: 1,
        }
    }
}

impl TubeJob {
    /// Load a job from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    /// Reject settings that cannot produce a mesh.
    pub fn validate(&self) -> Result<()> {
        if self.pieces == 0 {
            bail!("pieces must be at least 1");
        }
        if self.pieces > self.linear_segments {
            bail!(
                "cannot split {} linear segments into {} pieces",
                self.linear_segments,
                self.pieces
            );
        }
        if self.path == PathKind::Straight && self.length <= 0.0 {
            bail!("length must be positive");
        }
        let (vertices, _) = self.mesh_size()?;
        if vertices > u32::MAX as usize {
            bail!("job needs {vertices} vertices, more than u32 indices can address");
        }
        Ok(())
    }

    /// First and last sample index of `piece`.
    fn piece_range(&self, piece: usize) -> (usize, usize) {
        let split = |k: usize| (k as u128 * self.linear_segments as u128 / self.pieces as u128) as usize;
        (split(piece), split(piece + 1))
    }

    /// Total vertices and triangles of the built mesh. Every piece repeats
    /// its first ring and carries its own caps.
    pub fn mesh_size(&self) -> Result<(usize, usize)> {
        let mut vertices = 0usize;
        let mut triangles = 0usize;
        for piece in 0..self.pieces {
            let (start, end) = self.piece_range(piece);
            let params = self.piece_params(end - start);
            vertices = vertices
                .checked_add(params.added_vertex_count()?)
                .context("vertex count overflows usize")?;
            triangles = triangles
                .checked_add(params.added_triangle_count()?)
                .context("triangle count overflows usize")?;
        }
        Ok((vertices, triangles))
    }

    /// Tube parameters shared by every piece, for a piece spanning `linear_segments`.
    pub fn piece_params(&self, linear_segments: usize) -> TubeParams {
        TubeParams::default()
            .with_linear_segments(linear_segments)
            .with_radial_segments(self.radial_segments)
            .with_caps(self.start_cap, self.end_cap)
            .with_cross_section(self.cross_section)
    }

    /// Sample the path and attach frames and cross-section sizes.
    pub fn samples(&self) -> Result<OwnedTubeSamples> {
        let n = self.linear_segments + 1;
        let points = match self.path {
            PathKind::Straight => {
                line_points(Point3::origin(), Point3::new(0.0, 0.0, self.length), n)
            }
            PathKind::Helix => helix_points(self.radius, self.pitch, self.turns, n),
        };
        let frames = rotation_minimizing_frames(&points)?;
        Ok(OwnedTubeSamples::uniform(&frames, self.width, self.height))
    }

    /// Build the mesh: one tube per piece, each tagged with its piece index.
    pub fn build(&self, builder: &TubeBuilder) -> Result<TriangleMesh> {
        self.validate()?;
        let (vertices, triangles) = self.mesh_size()?;
        let samples = self.samples()?;
        let mut sink = MeshBuilder::with_capacity(vertices, triangles);

        for piece in 0..self.pieces {
            let (start, end) = self.piece_range(piece);
            let part = samples.slice(start, end);
            sink.set_group(piece as u32);
            let stats = builder
                .add_tube(&mut sink, &part.as_samples(), &self.piece_params(end - start))
                .with_context(|| format!("building piece {piece}"))?;
            info!(
                piece,
                start,
                end,
                vertices = stats.vertices,
                triangles = stats.triangles,
                "built tube piece"
            );
        }

        Ok(sink.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_job_builds() {
        let job = TubeJob {
            linear_segments: 24,
            ..TubeJob::default()
        };
        let mesh = job.build(&TubeBuilder::new()).unwrap();
        assert_eq!(
            mesh.num_vertices(),
            job.piece_params(24).added_vertex_count().unwrap()
        );
        assert_eq!(job.mesh_size().unwrap(), (mesh.num_vertices(), mesh.num_triangles()));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_pieces_get_their_own_groups() {
        let job = TubeJob {
            path: PathKind::Straight,
            linear_segments: 9,
            radial_segments: 6,
            pieces: 3,
            ..TubeJob::default()
        };
        let mesh = job.build(&TubeBuilder::new()).unwrap();
        let per_piece = job.piece_params(3).added_vertex_count().unwrap();
        assert_eq!(mesh.num_vertices(), 3 * per_piece);
        for piece in 0..3 {
            let tags = &mesh.groups[piece * per_piece..(piece + 1) * per_piece];
            assert!(tags.iter().all(|&g| g == piece as u32));
        }
    }

    #[test]
    fn test_validate() {
        let job = TubeJob {
            pieces: 0,
            ..TubeJob::default()
        };
        assert!(job.validate().is_err());
        let job = TubeJob {
            linear_segments: 2,
            pieces: 3,
            ..TubeJob::default()
        };
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_oversized_job_is_rejected_before_allocating() {
        let job = TubeJob {
            radial_segments: 1usize << 63,
            ..TubeJob::default()
        };
        assert!(job.mesh_size().is_err());
        assert!(job.validate().is_err());
        assert!(job.build(&TubeBuilder::new()).is_err());

        let job = TubeJob {
            radial_segments: 1usize << 32,
            ..TubeJob::default()
        };
        assert!(job.mesh_size().is_ok());
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_json_defaults() {
        let job: TubeJob =
            serde_json::from_str(r#"{ "path": "straight", "cross_section": "rounded" }"#).unwrap();
        assert_eq!(job.path, PathKind::Straight);
        assert_eq!(job.cross_section, CrossSection::Rounded);
        assert_eq!(job.radial_segments, TubeJob::default().radial_segments);
    }

    #[test]
    fn test_bad_dimensions_surface_as_errors() {
        let job = TubeJob {
            width: 0.0,
            linear_segments: 4,
            ..TubeJob::default()
        };
        assert!(job.build(&TubeBuilder::new()).is_err());
    }
}
