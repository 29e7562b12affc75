//! Error types for tube generation.

use thiserror::Error;

/// Result type for tube operations.
pub type TubeResult<T> = Result<T, TubeError>;

/// Errors that can occur while building a tube.
///
/// Every check runs before the first append, so a returned error leaves the
/// sink exactly as it was.
#[derive(Debug, Error, PartialEq)]
pub enum TubeError {
    /// Fewer linear segments than a tube needs.
    #[error("linear segments must be at least {min}, got {actual}")]
    TooFewLinearSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// Fewer radial segments than a closed ring needs.
    #[error("radial segments must be at least {min}, got {actual}")]
    TooFewRadialSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// A sample array holds fewer entries than the segment count requires.
    #[error("{array} needs at least {required} values, got {actual}")]
    SampleArrayTooShort {
        /// Name of the offending array.
        array: &'static str,
        /// Required number of values.
        required: usize,
        /// Actual number of values.
        actual: usize,
    },

    /// The frame vectors at a sample do not span a plane.
    #[error("degenerate frame at sample {sample}")]
    DegenerateFrame {
        /// Sample index.
        sample: usize,
    },

    /// Width or height is not a positive finite number.
    #[error("invalid cross-section at sample {sample}: width {width}, height {height}")]
    InvalidDimension {
        /// Sample index.
        sample: usize,
        /// Width at the sample.
        width: f64,
        /// Height at the sample.
        height: f64,
    },

    /// Control point has a non-finite coordinate.
    #[error("non-finite control point at sample {sample}")]
    NonFiniteControlPoint {
        /// Sample index.
        sample: usize,
    },

    /// Vertex indices would not fit in `u32`.
    #[error("tube needs vertex index {required}, which exceeds u32")]
    IndexOverflow {
        /// Vertex count the sink would reach, saturated at `usize::MAX`.
        required: usize,
    },

    /// Path has too few points to derive frames.
    #[error("path needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Two consecutive path points coincide.
    #[error("degenerate path segment at index {index}")]
    DegenerateSegment {
        /// Index of the segment's first point.
        index: usize,
    },
}
