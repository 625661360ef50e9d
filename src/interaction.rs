//! Pointer hover override.
//!
//! While the pointer hovers the surface the merge/explosion cycle is frozen
//! and every particle swirls on a small, breathing sphere around the
//! pointer. Particles approach their swirl target exponentially and never
//! quite arrive.

use crate::math::phase_angle;
use crate::particle::Particle;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Pointer input for one frame, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Vec2,
    pub hovering: bool,
}

impl PointerState {
    /// Pointer hovering at `(x, y)`.
    pub fn hover(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            hovering: true,
        }
    }

    /// No pointer over the surface.
    pub fn away() -> Self {
        Self::default()
    }
}

/// How cycle timers behave once hover ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverResume {
    /// Timers are shifted by the hovered duration, so the cycle picks up
    /// exactly where it was frozen.
    #[default]
    Shift,
    /// Timers keep wall-clock time. A trigger that came due during the hover
    /// fires on the first frame after it.
    WallClock,
}

/// What the host should anchor its overlay element to while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAnchor {
    #[default]
    Pointer,
    FocalPoint,
}

/// Tunables for the hover swirl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Whether pointer hover overrides the cycle at all.
    pub enabled: bool,
    /// Swirl sphere radius in world units. Typical range: 20 - 120.
    pub radius: f32,
    /// Fractional radius breathing, 0 for a rigid sphere.
    pub jitter: f32,
    /// Breathing angular frequency, radians per millisecond.
    pub jitter_frequency: f32,
    /// Orbit advance per tick, radians.
    pub angle_step: f32,
    /// Fraction of the remaining distance covered per tick, in (0, 1].
    pub approach_rate: f32,
    pub resume: HoverResume,
    pub overlay: OverlayAnchor,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 40.0,
            jitter: 0.3,
            jitter_frequency: 0.002,
            angle_step: 0.02,
            approach_rate: 0.05,
            resume: HoverResume::Shift,
            overlay: OverlayAnchor::Pointer,
        }
    }
}

/// Map a surface pixel onto the world plane at `z = 0`.
///
/// Projection scale is exactly 1 on that plane, so this is the inverse of
/// [`crate::projection::Projection::project`] there.
#[inline]
pub fn pointer_world(pointer: Vec2, width: u32, height: u32) -> Vec3 {
    Vec3::new(
        pointer.x - width as f32 / 2.0,
        pointer.y - height as f32 / 2.0,
        0.0,
    )
}

/// Swirl target for `p` around `center` at `t_ms`.
///
/// The azimuth is the particle's own orbit angle; the polar angle is fixed
/// per particle from its flow phase so orbits cover the whole sphere.
pub fn swirl_target(p: &Particle, center: Vec3, t_ms: f64, config: &InteractionConfig) -> Vec3 {
    let wave = phase_angle(config.jitter_frequency, t_ms) + p.interaction_angle;
    let radius = config.radius * (1.0 + config.jitter * wave.sin());
    let polar = p.flow_phase.y * 0.5;
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_az, cos_az) = p.interaction_angle.sin_cos();

    center + Vec3::new(sin_polar * cos_az, sin_polar * sin_az, cos_polar) * radius
}

/// Advance one particle's orbit and move it towards its swirl target.
pub fn steer(p: &mut Particle, center: Vec3, t_ms: f64, config: &InteractionConfig) {
    p.interaction_angle += config.angle_step;
    let target = swirl_target(p, center, t_ms, config);
    p.interaction_target = Some(target);
    p.position += (target - p.position) * config.approach_rate;
}

/// Forget every swirl target.
pub fn release(particles: &mut [Particle]) {
    for p in particles.iter_mut() {
        p.interaction_target = None;
    }
}

/// Tracks hover start/end across frames.
#[derive(Debug, Clone, Default)]
pub struct InteractionOverride {
    config: InteractionConfig,
    hover_started_ms: Option<f64>,
}

/// Result of feeding one frame's pointer into [`InteractionOverride::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverStatus {
    /// No hover this frame or last.
    Idle,
    /// Hovering; particles should be steered.
    Active { center_px: Vec2 },
    /// Hover just ended after `hovered_ms`; the cycle resumes this frame.
    Ended { hovered_ms: f64 },
}

impl InteractionOverride {
    /// A tracker that starts with the pointer away.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            hover_started_ms: None,
        }
    }

    /// Swirl tunables in use.
    #[inline]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Whether hover is currently suspending the cycle.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.hover_started_ms.is_some()
    }

    /// Record this frame's pointer state.
    pub fn update(&mut self, pointer: PointerState, t_ms: f64) -> HoverStatus {
        let hovering = pointer.hovering && self.config.enabled;
        match (hovering, self.hover_started_ms) {
            (true, None) => {
                log::debug!("hover started at {:.0}ms", t_ms);
                self.hover_started_ms = Some(t_ms);
                HoverStatus::Active {
                    center_px: pointer.position,
                }
            }
            (true, Some(_)) => HoverStatus::Active {
                center_px: pointer.position,
            },
            (false, Some(started)) => {
                self.hover_started_ms = None;
                let hovered_ms = (t_ms - started).max(0.0);
                log::debug!("hover ended after {:.0}ms", hovered_ms);
                HoverStatus::Ended { hovered_ms }
            }
            (false, None) => HoverStatus::Idle,
        }
    }
}
