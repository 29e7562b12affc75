//! Moving frames along sampled paths.
//!
//! The tube kernel expects each path sample to carry a `normal`/`binormal`
//! pair spanning the plane perpendicular to the path. This module derives
//! those pairs from a polyline with rotation-minimizing frames, so the
//! cross-section does not spin around the path between samples.

use std::f64::consts::PI;

use molmesh_math::{Dir3, Point3, Tolerance, Vec3};
use tracing::debug;

use crate::error::{TubeError, TubeResult};
use crate::samples::PathSample;

/// An orthonormal frame at a point on a path.
///
/// `binormal = tangent × normal`, so `normal × binormal = tangent`: the
/// tube's start cap faces `binormal × normal` and its end cap
/// `normal × binormal`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFrame {
    /// Position on the path.
    pub position: Point3,
    /// Unit tangent (direction of travel).
    pub tangent: Dir3,
    /// Unit normal, perpendicular to the tangent.
    pub normal: Dir3,
    /// Unit binormal (tangent × normal).
    pub binormal: Dir3,
}

impl PathFrame {
    /// Frame at `position` with an arbitrary but consistent normal.
    pub fn with_arbitrary_normal(position: Point3, tangent: Dir3) -> Self {
        // Choose an arbitrary vector not parallel to tangent
        let arbitrary = if tangent.as_ref().x.abs() < 0.9 {
            Vec3::x()
        } else {
            Vec3::y()
        };

        let normal = Dir3::new_normalize(tangent.as_ref().cross(&arbitrary).cross(tangent.as_ref()));
        let binormal = Dir3::new_normalize(tangent.as_ref().cross(normal.as_ref()));

        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Path sample at this frame with the given cross-section size.
    pub fn sample(&self, width: f64, height: f64) -> PathSample {
        PathSample {
            control_point: self.position,
            normal: self.normal.into_inner(),
            binormal: self.binormal.into_inner(),
            width,
            height,
        }
    }
}

/// Compute rotation-minimizing frames along a polyline.
///
/// Tangents are central differences (one-sided at the ends). The first
/// normal is an arbitrary perpendicular; later normals are propagated with
/// the double reflection method.
///
/// # Errors
///
/// Returns an error if fewer than 2 points are given or two consecutive
/// points coincide.
pub fn rotation_minimizing_frames(points: &[Point3]) -> TubeResult<Vec<PathFrame>> {
    let n = points.len();
    if n < 2 {
        return Err(TubeError::TooFewPoints { min: 2, actual: n });
    }

    let tol = Tolerance::DEFAULT;
    for (index, pair) in points.windows(2).enumerate() {
        if tol.points_equal(&pair[0], &pair[1]) {
            return Err(TubeError::DegenerateSegment { index });
        }
    }

    let tangents: Vec<Dir3> = (0..n)
        .map(|i| {
            let d = match i {
                0 => points[1] - points[0],
                _ if i == n - 1 => points[n - 1] - points[n - 2],
                _ => {
                    let central = points[i + 1] - points[i - 1];
                    if central.norm() < tol.linear {
                        // path doubles back on itself
                        points[i + 1] - points[i]
                    } else {
                        central
                    }
                }
            };
            Dir3::new_normalize(d)
        })
        .collect();

    let mut frames = Vec::with_capacity(n);
    frames.push(PathFrame::with_arbitrary_normal(points[0], tangents[0]));

    for i in 1..n {
        let prev = &frames[i - 1];
        let ti = tangents[i];

        // Reflect previous tangent and normal across the bisector plane
        let v1 = points[i] - prev.position;
        let c1 = v1.dot(&v1);
        let ri_l = prev.normal.as_ref() - (2.0 / c1) * v1.dot(prev.normal.as_ref()) * v1;
        let ti_l = prev.tangent.as_ref() - (2.0 / c1) * v1.dot(prev.tangent.as_ref()) * v1;

        // Second reflection to align with the actual tangent
        let v2 = ti.as_ref() - ti_l;
        let c2 = v2.dot(&v2);
        let ri = if c2 < 1e-24 {
            ri_l
        } else {
            ri_l - (2.0 / c2) * v2.dot(&ri_l) * v2
        };

        // Re-orthogonalize against the tangent to stop drift
        let ri = ri - ri.dot(ti.as_ref()) * ti.as_ref();
        let frame = match tol.try_normalize(&ri) {
            Some(normal) => {
                let normal = Dir3::new_unchecked(normal);
                PathFrame {
                    position: points[i],
                    tangent: ti,
                    normal,
                    binormal: Dir3::new_normalize(ti.as_ref().cross(normal.as_ref())),
                }
            }
            None => PathFrame::with_arbitrary_normal(points[i], ti),
        };
        frames.push(frame);
    }

    debug!(samples = n, "computed rotation-minimizing frames");
    Ok(frames)
}

/// Sample `samples` points of a helix around the Z axis.
///
/// The helix starts at `(radius, 0, 0)` and rises `pitch` per turn.
pub fn helix_points(radius: f64, pitch: f64, turns: f64, samples: usize) -> Vec<Point3> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples)
        .map(|i| {
            let t = i as f64 / last;
            let angle = 2.0 * PI * turns * t;
            Point3::new(
                radius * angle.cos(),
                radius * angle.sin(),
                pitch * turns * t,
            )
        })
        .collect()
}

/// Sample `samples` evenly spaced points from `start` to `end`.
pub fn line_points(start: Point3, end: Point3, samples: usize) -> Vec<Point3> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples)
        .map(|i| start + (end - start) * (i as f64 / last))
        .collect()
}
