//! Path samples in struct-of-arrays layout.
//!
//! Positions and frame vectors are interleaved `x, y, z` triples (sample `i`
//! at offset `3 * i`); widths and heights are indexed by `i` directly. The
//! tube kernel reads these slices in its hot loop; [`PathSample`] offers a
//! structured view for everything else.

use molmesh_math::{point3_at, vec3_at, Point3, Tolerance, Vec3};

use crate::error::{TubeError, TubeResult};
use crate::frame::PathFrame;

/// One path sample: position, frame, and cross-section size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Point on the path.
    pub control_point: Point3,
    /// First frame axis (`u`), perpendicular to the tangent.
    pub normal: Vec3,
    /// Second frame axis (`v`). The tangent is `normal × binormal`.
    pub binormal: Vec3,
    /// Cross-section extent along the binormal.
    pub width: f64,
    /// Cross-section extent along the normal.
    pub height: f64,
}

/// Borrowed flat sample arrays.
#[derive(Debug, Clone, Copy)]
pub struct TubeSamples<'a> {
    /// Control points, `3 * n` values.
    pub control_points: &'a [f64],
    /// Normal vectors (`u`), `3 * n` values.
    pub normal_vectors: &'a [f64],
    /// Binormal vectors (`v`), `3 * n` values.
    pub binormal_vectors: &'a [f64],
    /// Widths, `n` values.
    pub widths: &'a [f64],
    /// Heights, `n` values.
    pub heights: &'a [f64],
}

impl<'a> TubeSamples<'a> {
    /// Bundle the five flat arrays.
    pub fn new(
        control_points: &'a [f64],
        normal_vectors: &'a [f64],
        binormal_vectors: &'a [f64],
        widths: &'a [f64],
        heights: &'a [f64],
    ) -> Self {
        Self {
            control_points,
            normal_vectors,
            binormal_vectors,
            widths,
            heights,
        }
    }

    /// Number of complete samples available in every array.
    pub fn len(&self) -> usize {
        (self.control_points.len() / 3)
            .min(self.normal_vectors.len() / 3)
            .min(self.binormal_vectors.len() / 3)
            .min(self.widths.len())
            .min(self.heights.len())
    }

    /// True when no complete sample is available.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structured view of sample `i`. Panics if `i` is out of range.
    pub fn sample(&self, i: usize) -> PathSample {
        let i3 = i * 3;
        PathSample {
            control_point: point3_at(self.control_points, i3),
            normal: vec3_at(self.normal_vectors, i3),
            binormal: vec3_at(self.binormal_vectors, i3),
            width: self.widths[i],
            height: self.heights[i],
        }
    }

    /// Check that every array holds at least `count` samples.
    pub fn require(&self, count: usize) -> TubeResult<()> {
        let checks = [
            ("control_points", self.control_points.len(), count * 3),
            ("normal_vectors", self.normal_vectors.len(), count * 3),
            ("binormal_vectors", self.binormal_vectors.len(), count * 3),
            ("widths", self.widths.len(), count),
            ("heights", self.heights.len(), count),
        ];
        for (array, actual, required) in checks {
            if actual < required {
                return Err(TubeError::SampleArrayTooShort {
                    array,
                    required,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Check sample `i` for values the kernel cannot turn into a finite mesh.
    pub fn check_sample(&self, i: usize, tol: &Tolerance) -> TubeResult<()> {
        let s = self.sample(i);
        if !s.control_point.iter().all(|c| c.is_finite()) {
            return Err(TubeError::NonFiniteControlPoint { sample: i });
        }
        if !tol.spans_plane(&s.normal, &s.binormal) {
            return Err(TubeError::DegenerateFrame { sample: i });
        }
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(s.width) || !positive(s.height) {
            return Err(TubeError::InvalidDimension {
                sample: i,
                width: s.width,
                height: s.height,
            });
        }
        Ok(())
    }
}

/// Owned flat sample arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedTubeSamples {
    /// Control points, `3 * n` values.
    pub control_points: Vec<f64>,
    /// Normal vectors (`u`), `3 * n` values.
    pub normal_vectors: Vec<f64>,
    /// Binormal vectors (`v`), `3 * n` values.
    pub binormal_vectors: Vec<f64>,
    /// Widths, `n` values.
    pub widths: Vec<f64>,
    /// Heights, `n` values.
    pub heights: Vec<f64>,
}

impl OwnedTubeSamples {
    /// Empty sample set with room for `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            control_points: Vec::with_capacity(n * 3),
            normal_vectors: Vec::with_capacity(n * 3),
            binormal_vectors: Vec::with_capacity(n * 3),
            widths: Vec::with_capacity(n),
            heights: Vec::with_capacity(n),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, sample: PathSample) {
        let p = sample.control_point;
        self.control_points.extend_from_slice(&[p.x, p.y, p.z]);
        let n = sample.normal;
        self.normal_vectors.extend_from_slice(&[n.x, n.y, n.z]);
        let b = sample.binormal;
        self.binormal_vectors.extend_from_slice(&[b.x, b.y, b.z]);
        self.widths.push(sample.width);
        self.heights.push(sample.height);
    }

    /// Pack frames with per-sample widths and heights.
    ///
    /// Extra frames or sizes beyond the shortest input are dropped.
    pub fn from_frames(frames: &[PathFrame], widths: &[f64], heights: &[f64]) -> Self {
        let n = frames.len().min(widths.len()).min(heights.len());
        let mut samples = Self::with_capacity(n);
        for i in 0..n {
            samples.push(frames[i].sample(widths[i], heights[i]));
        }
        samples
    }

    /// Pack frames with a constant width and height.
    pub fn uniform(frames: &[PathFrame], width: f64, height: f64) -> Self {
        let mut samples = Self::with_capacity(frames.len());
        for frame in frames {
            samples.push(frame.sample(width, height));
        }
        samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Linear segments spanned by these samples (`len - 1`, or 0 when empty).
    pub fn linear_segments(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Borrow as [`TubeSamples`].
    pub fn as_samples(&self) -> TubeSamples<'_> {
        TubeSamples::new(
            &self.control_points,
            &self.normal_vectors,
            &self.binormal_vectors,
            &self.widths,
            &self.heights,
        )
    }

    /// Samples `start..=end` as a new owned set.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let mut out = Self::with_capacity(end + 1 - start);
        let view = self.as_samples();
        for i in start..=end {
            out.push(view.sample(i));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(n: usize) -> OwnedTubeSamples {
        let mut s = OwnedTubeSamples::with_capacity(n);
        for i in 0..n {
            s.push(PathSample {
                control_point: Point3::new(0.0, 0.0, i as f64),
                normal: Vec3::x(),
                binormal: Vec3::y(),
                width: 1.0,
                height: 2.0,
            });
        }
        s
    }

    #[test]
    fn test_sample_round_trip() {
        let owned = straight(3);
        let view = owned.as_samples();
        assert_eq!(view.len(), 3);
        let s = view.sample(2);
        assert_eq!(s.control_point, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(s.normal, Vec3::x());
        assert_eq!(s.height, 2.0);
        assert_eq!(owned.linear_segments(), 2);
    }

    #[test]
    fn test_require_reports_short_array() {
        let mut owned = straight(3);
        owned.heights.pop();
        let err = owned.as_samples().require(3).unwrap_err();
        assert_eq!(
            err,
            TubeError::SampleArrayTooShort {
                array: "heights",
                required: 3,
                actual: 2
            }
        );
        assert!(owned.as_samples().require(2).is_ok());
    }

    #[test]
    fn test_check_sample() {
        let tol = Tolerance::DEFAULT;
        let mut owned = straight(2);
        assert!(owned.as_samples().check_sample(0, &tol).is_ok());

        owned.binormal_vectors[3..6].copy_from_slice(&[1.0, 0.0, 0.0]);
        assert_eq!(
            owned.as_samples().check_sample(1, &tol),
            Err(TubeError::DegenerateFrame { sample: 1 })
        );

        owned.widths[0] = 0.0;
        assert!(matches!(
            owned.as_samples().check_sample(0, &tol),
            Err(TubeError::InvalidDimension { sample: 0, .. })
        ));

        owned.control_points[1] = f64::NAN;
        assert_eq!(
            owned.as_samples().check_sample(0, &tol),
            Err(TubeError::NonFiniteControlPoint { sample: 0 })
        );
    }

    #[test]
    fn test_slice() {
        let owned = straight(5);
        let part = owned.slice(1, 3);
        assert_eq!(part.len(), 3);
        assert_eq!(part.as_samples().sample(0).control_point.z, 1.0);
        assert_eq!(part.as_samples().sample(2).control_point.z, 3.0);
    }
}
