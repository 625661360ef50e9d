//! Interpolation, easing and small vector helpers.
//!
//! Everything here is a pure function. The easing curves map `[0, 1]` onto
//! `[0, 1]` with `f(0) == 0` and `f(1) == 1` exactly, which the merge/explosion
//! cycle relies on to land particles on their phase targets.

use glam::Vec3;
use std::f64::consts::TAU;

/// Angle swept at `rate` radians per millisecond after `t_ms`, wrapped to `[0, 2π)`.
///
/// The product is wrapped in `f64` before narrowing, so the angle keeps full
/// `f32` resolution however long the clock has been running.
#[inline]
pub fn phase_angle(rate: f32, t_ms: f64) -> f32 {
    (rate as f64 * t_ms).rem_euclid(TAU) as f32
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Clamp a progress fraction into `[0, 1]`.
///
/// NaN (e.g. `0.0 / 0.0` from a zero-length phase) maps to `1.0` so a
/// degenerate phase completes immediately instead of stalling.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        1.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// Works in `f64` milliseconds so long-running clocks keep their precision.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    clamp01((elapsed_ms / duration_ms) as f32)
}

/// Cubic ease-in-out: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = -2.0 * t + 2.0;
        1.0 - f * f * f / 2.0
    }
}

/// Cubic ease-out: fast start, decelerating into the target.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let f = 1.0 - t;
    1.0 - f * f * f
}

/// Normalize `v`, treating a zero length as one.
///
/// A zero vector therefore stays zero instead of becoming NaN.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    let len = if len > 0.0 { len } else { 1.0 };
    v / len
}

/// A unit vector perpendicular to `direction`.
///
/// Crosses `direction` with whichever world axis is not nearly parallel to it.
/// Returns zero when `direction` itself is zero.
pub fn perpendicular(direction: Vec3) -> Vec3 {
    let d = safe_normalize(direction);
    let reference = if d.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    safe_normalize(reference.cross(d))
}

/// Rotate `v` about the Y axis.
#[inline]
pub fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

/// Rotate `v` about the X axis.
#[inline]
pub fn rotate_x(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}
