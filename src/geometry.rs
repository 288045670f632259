//! Joint angle and movement geometry over 2D image coordinates.

use nalgebra::Point2;

use crate::constants::GEOMETRY_EPSILON;
use crate::{Error, Result};

/// A point position stamped with the frame time it was observed at
#[derive(Debug, Clone, Copy)]
pub struct TimedPosition {
    /// Position in pixels
    pub position: Point2<f32>,
    /// Host-provided frame timestamp in milliseconds
    pub timestamp_ms: u64,
}

/// Angle in degrees at vertex `b`, formed by the rays `b -> a` and `b -> c`.
///
/// Computed from the dot product of the two rays, with the cosine clamped to
/// [-1, 1] before `acos` so floating-point overshoot never produces NaN. The
/// result is always in [0, 180].
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] when either ray is shorter than the
/// geometry epsilon (coincident points), since the angle is undefined there.
pub fn angle_at(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> Result<f32> {
    let v1 = a - b;
    let v2 = c - b;

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 < GEOMETRY_EPSILON || mag2 < GEOMETRY_EPSILON {
        return Err(Error::InvalidGeometry(
            "zero-length ray at angle vertex".to_string(),
        ));
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Ok(cos_angle.acos().to_degrees())
}

/// Euclidean distance between two points, in pixels
#[must_use]
pub fn distance(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (a - b).norm()
}

/// Speed of a tracked point over its two most recent samples, in pixels per
/// second.
///
/// Returns `0.0` when fewer than two samples exist or when the elapsed time
/// is not positive. Out-of-order timestamps therefore read as zero velocity
/// rather than a negative or unbounded one.
#[must_use]
pub fn velocity(samples: &[TimedPosition]) -> f32 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }

    let prev = samples[n - 2];
    let last = samples[n - 1];
    let elapsed_ms = last.timestamp_ms.saturating_sub(prev.timestamp_ms);
    if elapsed_ms == 0 {
        return 0.0;
    }

    distance(prev.position, last.position) / (elapsed_ms as f32 / 1000.0)
}
