#![warn(missing_docs)]

//! Math types for the molmesh geometry kernels.
//!
//! Thin wrappers around nalgebra providing the vector types used by the
//! tube builder, helpers for reading vectors out of interleaved flat
//! arrays, and tolerance constants for degeneracy checks.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Read the vector stored at `array[offset..offset + 3]`.
///
/// Flat arrays interleave `x, y, z` triples; sample `i` lives at offset `3 * i`.
/// Panics if the slice is too short, callers check lengths up front.
#[inline]
pub fn vec3_at(array: &[f64], offset: usize) -> Vec3 {
    Vec3::new(array[offset], array[offset + 1], array[offset + 2])
}

/// Read the point stored at `array[offset..offset + 3]`.
#[inline]
pub fn point3_at(array: &[f64], offset: usize) -> Point3 {
    Point3::new(array[offset], array[offset + 1], array[offset + 2])
}

/// `a * sa + b * sb`.
#[inline]
pub fn add2_and_scale2(a: &Vec3, b: &Vec3, sa: f64, sb: f64) -> Vec3 {
    Vec3::new(
        a.x * sa + b.x * sb,
        a.y * sa + b.y * sb,
        a.z * sa + b.z * sb,
    )
}

/// `c + a * sa + b * sb`.
#[inline]
pub fn add3_and_scale2(a: &Vec3, b: &Vec3, c: &Point3, sa: f64, sb: f64) -> Point3 {
    Point3::new(
        a.x * sa + b.x * sb + c.x,
        a.y * sa + b.y * sb + c.y,
        a.z * sa + b.z * sb + c.z,
    )
}

/// True when every component is finite.
#[inline]
pub fn is_finite(v: &Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Smallest vector length accepted for normalization.
    pub normalize: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-12 normalization).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        normalize: 1e-12,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Normalize `v`, or `None` if it is too short (or non-finite) to have a direction.
    pub fn try_normalize(&self, v: &Vec3) -> Option<Vec3> {
        if !is_finite(v) {
            return None;
        }
        v.try_normalize(self.normalize)
    }

    /// True when `a` and `b` span a plane, i.e. neither is degenerate and
    /// they are not parallel.
    pub fn spans_plane(&self, a: &Vec3, b: &Vec3) -> bool {
        is_finite(a) && is_finite(b) && a.cross(b).norm() > self.normalize
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
