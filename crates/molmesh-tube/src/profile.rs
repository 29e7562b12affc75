//! Cross-section profiles swept along the tube path.
//!
//! A profile maps an angular sample `j` of a ring to a surface point and an
//! outward normal in the plane spanned by the sample's frame vectors `u`
//! (normal) and `v` (binormal).

use molmesh_math::{add2_and_scale2, add3_and_scale2, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::cos_sin::CosSin;

/// Shape of the tube cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossSection {
    /// Ellipse with semi-axes `height` along `u` and `width` along `v`.
    #[default]
    Elliptical,
    /// Stadium: two half-circles of radius `width` joined by straight sides.
    /// Only differs from [`CrossSection::Elliptical`] where `height > width`.
    Rounded,
}

impl CrossSection {
    /// True when a sample with these dimensions is built as a stadium.
    #[inline]
    pub fn is_rounded(self, width: f64, height: f64) -> bool {
        self == CrossSection::Rounded && height > width
    }
}

impl std::str::FromStr for CrossSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elliptical" => Ok(CrossSection::Elliptical),
            "rounded" => Ok(CrossSection::Rounded),
            other => Err(format!("unknown cross-section: {other}")),
        }
    }
}

/// A surface point and its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Position on the tube surface.
    pub position: Point3,
    /// Outward unit normal.
    pub normal: Vec3,
}

/// Evaluates one cross-section kind against a cached trig table.
#[derive(Debug, Clone, Copy)]
pub struct ProfileEvaluator<'a> {
    table: &'a CosSin,
    kind: CrossSection,
    q1: f64,
    q3: f64,
}

impl<'a> ProfileEvaluator<'a> {
    /// Create an evaluator over `table` (one entry per radial segment).
    pub fn new(table: &'a CosSin, kind: CrossSection) -> Self {
        let q1 = table.len() as f64 / 4.0;
        Self {
            table,
            kind,
            q1,
            q3: q1 * 3.0,
        }
    }

    /// Number of angular samples per ring.
    #[inline]
    pub fn radial_segments(&self) -> usize {
        self.table.len()
    }

    /// Side of the stadium an angular sample belongs to: `+1` for the
    /// quadrants around `j = 0` (the `+u` end), `-1` for the opposite end.
    #[inline]
    pub fn stadium_side(&self, j: usize) -> f64 {
        let jf = j as f64;
        if jf < self.q1 || jf >= self.q3 {
            1.0
        } else {
            -1.0
        }
    }

    /// Surface point and normal for angular sample `j`.
    ///
    /// Elliptical profiles swap `width` and `height` between the position and
    /// the normal so the normal ellipse stays perpendicular to the surface.
    /// Stadium profiles shift the circle of radius `width` by
    /// `±(height - width)` along `u`, and reuse the circle normal on the
    /// straight sides.
    #[inline]
    pub fn surface(
        &self,
        u: &Vec3,
        v: &Vec3,
        center: &Point3,
        j: usize,
        width: f64,
        height: f64,
    ) -> ProfilePoint {
        let (c, s) = (self.table.cos[j], self.table.sin[j]);
        if self.kind.is_rounded(width, height) {
            let mut position = add3_and_scale2(u, v, center, width * c, width * s);
            position += u * (self.stadium_side(j) * (height - width));
            ProfilePoint {
                position,
                normal: add2_and_scale2(u, v, c, s).normalize(),
            }
        } else {
            ProfilePoint {
                position: add3_and_scale2(u, v, center, height * c, width * s),
                normal: add2_and_scale2(u, v, width * c, height * s).normalize(),
            }
        }
    }

    /// Boundary point of an end cap for angular sample `j`.
    ///
    /// Matches the outermost lateral ring: for stadium profiles the straight
    /// extension is `height - width`, applied to a circle of radius `width`.
    #[inline]
    pub fn cap_boundary(
        &self,
        u: &Vec3,
        v: &Vec3,
        center: &Point3,
        j: usize,
        width: f64,
        height: f64,
    ) -> Point3 {
        let (c, s) = (self.table.cos[j], self.table.sin[j]);
        if self.kind.is_rounded(width, height) {
            let extension = height - width;
            let mut position = add3_and_scale2(u, v, center, width * c, width * s);
            position += u * (self.stadium_side(j) * extension);
            position
        } else {
            add3_and_scale2(u, v, center, height * c, width * s)
        }
    }
}
