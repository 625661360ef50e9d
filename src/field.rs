//! Continuous drift motion: the shared focal point and the kinematic field.
//!
//! Both are pure functions of time. The merge/explosion cycle calls
//! [`KinematicField::position`] for ordinary drifting and again during the
//! expansion phase to find where a particle *would* be if it had never
//! merged, so the function must not carry any state between calls.

use crate::math::{phase_angle, rotate_x, rotate_y};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Drift center, oscillating independently on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocalPoint {
    /// Resting center in world space.
    pub center: Vec3,
    /// Oscillation amplitude per axis, in world units.
    pub amplitude: Vec3,
    /// Angular frequency per axis, in radians per millisecond.
    pub frequency: Vec3,
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            amplitude: Vec3::new(60.0, 40.0, 30.0),
            frequency: Vec3::new(0.0005, 0.0007, 0.0003),
        }
    }
}

impl FocalPoint {
    /// A focal point that never moves.
    pub fn fixed(center: Vec3) -> Self {
        Self {
            center,
            amplitude: Vec3::ZERO,
            frequency: Vec3::ZERO,
        }
    }

    /// Position at `t_ms`.
    pub fn at(&self, t_ms: f64) -> Vec3 {
        self.center
            + Vec3::new(
                self.amplitude.x * phase_angle(self.frequency.x, t_ms).sin(),
                self.amplitude.y * phase_angle(self.frequency.y, t_ms).sin(),
                self.amplitude.z * phase_angle(self.frequency.z, t_ms).sin(),
            )
    }
}

/// Rotation plus per-particle flow wobble around the focal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicField {
    /// Spin rate about the Y axis, radians per millisecond.
    pub omega_a: f32,
    /// Spin rate about the X axis, radians per millisecond. Kept below `omega_a`.
    pub omega_b: f32,
    /// Wobble amplitude in world units. Typical range: 0 - 20.
    pub flow_amplitude: f32,
    /// Wobble angular frequency, radians per millisecond.
    pub flow_frequency: f32,
}

impl Default for KinematicField {
    fn default() -> Self {
        Self {
            omega_a: 0.0003,
            omega_b: 0.0002,
            flow_amplitude: 6.0,
            flow_frequency: 0.001,
        }
    }
}

impl KinematicField {
    /// Where a particle with this `base` and `flow_phase` drifts to at `t_ms`.
    pub fn position(&self, base: Vec3, flow_phase: Vec3, t_ms: f64, focal: Vec3) -> Vec3 {
        let angle_a = phase_angle(self.omega_a, t_ms);
        let angle_b = phase_angle(self.omega_b, t_ms);
        let rotated = rotate_x(rotate_y(base, angle_a), angle_b);

        let wave = phase_angle(self.flow_frequency, t_ms);
        let flow = Vec3::new(
            (wave + flow_phase.x).sin(),
            (wave + flow_phase.y).sin(),
            (wave + flow_phase.z).sin(),
        ) * self.flow_amplitude;

        rotated + flow + focal
    }
}
