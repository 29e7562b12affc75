//! Tube mesh generation: sweep a cross-section along sampled frames.
//!
//! One call appends, in order:
//! 1. `(linear_segments + 1) * radial_segments` ring vertices, ring-major
//! 2. `2 * linear_segments * radial_segments` lateral triangles
//! 3. per enabled cap, a center vertex, a boundary ring and a triangle fan
//! 4. one group tag per appended vertex, all set to the sink's current group

use molmesh_math::{Tolerance, Vec3};
use molmesh_mesh::MeshSink;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cos_sin::CosSinCache;
use crate::error::{TubeError, TubeResult};
use crate::profile::{CrossSection, ProfileEvaluator};
use crate::samples::TubeSamples;

/// Parameters for one tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeParams {
    /// Number of segments along the path. Samples `0..=linear_segments` are used.
    pub linear_segments: usize,
    /// Number of vertices around each ring.
    pub radial_segments: usize,
    /// Close the start of the tube with a fan.
    pub start_cap: bool,
    /// Close the end of the tube with a fan.
    pub end_cap: bool,
    /// Cross-section shape.
    pub cross_section: CrossSection,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            linear_segments: 1,
            radial_segments: 16,
            start_cap: true,
            end_cap: true,
            cross_section: CrossSection::Elliptical,
        }
    }
}

impl TubeParams {
    /// Set the number of segments along the path.
    #[must_use]
    pub fn with_linear_segments(mut self, linear_segments: usize) -> Self {
        self.linear_segments = linear_segments;
        self
    }

    /// Set the number of vertices around each ring.
    #[must_use]
    pub fn with_radial_segments(mut self, radial_segments: usize) -> Self {
        self.radial_segments = radial_segments;
        self
    }

    /// Set both cap flags.
    #[must_use]
    pub fn with_caps(mut self, start_cap: bool, end_cap: bool) -> Self {
        self.start_cap = start_cap;
        self.end_cap = end_cap;
        self
    }

    /// Disable both caps.
    #[must_use]
    pub fn uncapped(self) -> Self {
        self.with_caps(false, false)
    }

    /// Set the cross-section shape.
    #[must_use]
    pub fn with_cross_section(mut self, cross_section: CrossSection) -> Self {
        self.cross_section = cross_section;
        self
    }

    /// Check segment counts.
    pub fn validate(&self) -> TubeResult<()> {
        if self.linear_segments < 1 {
            return Err(TubeError::TooFewLinearSegments {
                min: 1,
                actual: self.linear_segments,
            });
        }
        if self.radial_segments < 3 {
            return Err(TubeError::TooFewRadialSegments {
                min: 3,
                actual: self.radial_segments,
            });
        }
        Ok(())
    }

    fn cap_count(&self) -> usize {
        self.start_cap as usize + self.end_cap as usize
    }

    /// Vertices one tube appends: rings plus `radial_segments + 1` per cap.
    ///
    /// Fails with [`TubeError::IndexOverflow`] when the count does not fit
    /// in `usize`.
    pub fn added_vertex_count(&self) -> TubeResult<usize> {
        let r = self.radial_segments;
        self.linear_segments
            .checked_add(1)
            .and_then(|rings| rings.checked_mul(r))
            .zip(r.checked_add(1).and_then(|n| n.checked_mul(self.cap_count())))
            .and_then(|(lateral, caps)| lateral.checked_add(caps))
            .ok_or(TubeError::IndexOverflow {
                required: usize::MAX,
            })
    }

    /// Triangles one tube appends: two per lateral quad plus one fan per cap.
    pub fn added_triangle_count(&self) -> TubeResult<usize> {
        let r = self.radial_segments;
        self.linear_segments
            .checked_mul(r)
            .and_then(|quads| quads.checked_mul(2))
            .zip(r.checked_mul(self.cap_count()))
            .and_then(|(lateral, caps)| lateral.checked_add(caps))
            .ok_or(TubeError::IndexOverflow {
                required: usize::MAX,
            })
    }
}

/// What one [`add_tube`] call appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TubeStats {
    /// Sink vertex count before the call; index of the first new vertex.
    pub vertex_base: usize,
    /// Vertices appended.
    pub vertices: usize,
    /// Triangles appended.
    pub triangles: usize,
}

/// Builds tubes against an owned trig table cache.
///
/// Create one per scene (or per process) and reuse it: tables for each
/// distinct radial segment count are computed once.
#[derive(Debug, Default)]
pub struct TubeBuilder {
    cache: CosSinCache,
    tolerance: Tolerance,
}

impl TubeBuilder {
    /// Builder with an empty cache and default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder using `tolerance` for degeneracy checks.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            cache: CosSinCache::new(),
            tolerance,
        }
    }

    /// The trig table cache.
    pub fn cache(&self) -> &CosSinCache {
        &self.cache
    }

    /// Append a tube to `sink`. See [`add_tube`].
    pub fn add_tube<S: MeshSink + ?Sized>(
        &self,
        sink: &mut S,
        samples: &TubeSamples<'_>,
        params: &TubeParams,
    ) -> TubeResult<TubeStats> {
        add_tube_with_tolerance(sink, &self.cache, samples, params, &self.tolerance)
    }
}

/// Append a tube swept along `samples` to `sink`.
///
/// # Errors
///
/// Returns an error, without touching the sink, if:
/// - `linear_segments < 1` or `radial_segments < 3`
/// - any sample array holds fewer than `linear_segments + 1` samples
/// - a used sample has a non-finite control point, a degenerate frame, or a
///   width/height that is not positive and finite
/// - vertex indices would exceed `u32`
pub fn add_tube<S: MeshSink + ?Sized>(
    sink: &mut S,
    cache: &CosSinCache,
    samples: &TubeSamples<'_>,
    params: &TubeParams,
) -> TubeResult<TubeStats> {
    add_tube_with_tolerance(sink, cache, samples, params, &Tolerance::DEFAULT)
}

fn add_tube_with_tolerance<S: MeshSink + ?Sized>(
    sink: &mut S,
    cache: &CosSinCache,
    samples: &TubeSamples<'_>,
    params: &TubeParams,
    tol: &Tolerance,
) -> TubeResult<TubeStats> {
    params.validate()?;
    let vertex_base = sink.vertex_count();
    let added = params.added_vertex_count()?;
    let triangles = params.added_triangle_count()?;
    let required = vertex_base.saturating_add(added);
    if required > u32::MAX as usize {
        return Err(TubeError::IndexOverflow { required });
    }

    let linear_segments = params.linear_segments;
    samples.require(linear_segments + 1)?;
    for i in 0..=linear_segments {
        samples.check_sample(i, tol)?;
    }

    let table = cache.get(params.radial_segments);
    let profile = ProfileEvaluator::new(&table, params.cross_section);

    add_rings(sink, samples, &profile, linear_segments);
    add_lateral_triangles(sink, vertex_base as u32, linear_segments, params.radial_segments);
    if params.start_cap {
        add_cap(sink, samples, &profile, 0, CapEnd::Start);
    }
    if params.end_cap {
        add_cap(sink, samples, &profile, linear_segments, CapEnd::End);
    }

    let group = sink.current_group();
    sink.append_group_repeated(group, added);

    let stats = TubeStats {
        vertex_base,
        vertices: added,
        triangles,
    };
    debug!(
        linear_segments,
        radial_segments = params.radial_segments,
        cross_section = ?params.cross_section,
        group,
        vertices = stats.vertices,
        triangles = stats.triangles,
        "added tube"
    );
    Ok(stats)
}

/// One ring of vertices and normals per sample.
fn add_rings<S: MeshSink + ?Sized>(
    sink: &mut S,
    samples: &TubeSamples<'_>,
    profile: &ProfileEvaluator<'_>,
    linear_segments: usize,
) {
    for i in 0..=linear_segments {
        let s = samples.sample(i);
        for j in 0..profile.radial_segments() {
            let p = profile.surface(&s.normal, &s.binormal, &s.control_point, j, s.width, s.height);
            sink.append_vertex(p.position.x, p.position.y, p.position.z);
            sink.append_normal(p.normal.x, p.normal.y, p.normal.z);
        }
    }
}

/// Stitch adjacent rings into closed strips.
///
/// The first half of each strip uses one diagonal, the second half the
/// mirrored one, so opposing triangles of the strip line up. A single
/// diagonal direction all the way round makes the strip self-intersect on
/// tight curves.
fn add_lateral_triangles<S: MeshSink + ?Sized>(
    sink: &mut S,
    base: u32,
    linear_segments: usize,
    radial_segments: usize,
) {
    let r = radial_segments as u32;
    let half = (r + 1) / 2;
    for i in 0..linear_segments as u32 {
        let ring = base + i * r;
        let next_ring = ring + r;
        for j in 0..r {
            let jn = (j + 1) % r;
            let a = ring + jn;
            let b = ring + j;
            let c = next_ring + jn;
            let d = next_ring + j;
            if j < half {
                sink.append_triangle(a, c, b);
                sink.append_triangle(c, d, b);
            } else {
                sink.append_triangle(a, d, b);
                sink.append_triangle(c, d, a);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapEnd {
    Start,
    End,
}

/// Close one end with a flat-shaded fan around the sample's control point.
fn add_cap<S: MeshSink + ?Sized>(
    sink: &mut S,
    samples: &TubeSamples<'_>,
    profile: &ProfileEvaluator<'_>,
    index: usize,
    end: CapEnd,
) {
    let s = samples.sample(index);
    let (u, v, c) = (&s.normal, &s.binormal, &s.control_point);
    // outward axis: against the path direction at the start, along it at the end
    let axis: Vec3 = match end {
        CapEnd::Start => v.cross(u),
        CapEnd::End => u.cross(v),
    };
    let normal = axis.normalize();

    let center = sink.vertex_count() as u32;
    sink.append_vertex(c.x, c.y, c.z);
    sink.append_normal(normal.x, normal.y, normal.z);

    let ring = center + 1;
    let r = profile.radial_segments();
    for j in 0..r {
        let p = profile.cap_boundary(u, v, c, j, s.width, s.height);
        sink.append_vertex(p.x, p.y, p.z);
        sink.append_normal(normal.x, normal.y, normal.z);
    }

    let r = r as u32;
    for j in 0..r {
        let jn = (j + 1) % r;
        match end {
            CapEnd::Start => sink.append_triangle(ring + jn, ring + j, center),
            CapEnd::End => sink.append_triangle(ring + j, ring + jn, center),
        }
    }
}
