//! Swirling flow-field cloud.
//!
//! A lighter scene than the morphing engine: particles fill a box the size
//! of the surface and are pushed around by a divergence-free swirl plus a
//! slow depth wave. Anything that drifts off screen or out of the depth band
//! respawns somewhere random inside the box.

use crate::canvas::Canvas;
use crate::error::ConfigError;
use crate::interaction::PointerState;
use crate::math::phase_angle;
use crate::particle::Particle;
use crate::projection::Projection;
use crate::render::paint;
use crate::scene::{FrameReport, Scene};
use crate::spawn::SpawnContext;
use crate::visuals::{DotStyle, VisualConfig};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Flow cloud tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Number of particles. Typical range: 500 - 5000.
    pub particle_count: u32,
    pub size_min: f32,
    pub size_max: f32,
    /// Near edge of the spawn band.
    pub spawn_near: f32,
    /// Far edge of the spawn band.
    pub spawn_far: f32,
    /// Particles closer than this respawn.
    pub near_limit: f32,
    /// Particles further than this respawn.
    pub far_limit: f32,
    /// How far past the surface edge a dot may go before respawning, in pixels.
    pub margin: f32,
    /// Tangential swirl speed per tick.
    pub swirl_speed: f32,
    /// Amplitude of the time-varying drift added to the swirl.
    pub drift: f32,
    /// Drift angular frequency, radians per millisecond.
    pub drift_frequency: f32,
    /// Amplitude of the depth wave per tick.
    pub depth_speed: f32,
    /// Depth wave spatial frequency.
    pub depth_frequency: f32,
    /// Depth wave angular frequency, radians per millisecond.
    pub depth_time_frequency: f32,
    pub projection: Projection,
    pub visuals: VisualConfig,
    pub seed: Option<u64>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        let mut visuals = VisualConfig::default();
        visuals
            .dot_style(DotStyle::Solid)
            .color(Vec3::ZERO)
            .background(Vec3::ONE);
        Self {
            particle_count: 3000,
            size_min: 1.0,
            size_max: 4.0,
            spawn_near: -200.0,
            spawn_far: 900.0,
            near_limit: -100.0,
            far_limit: 1000.0,
            margin: 50.0,
            swirl_speed: 1.5,
            drift: 0.5,
            drift_frequency: 0.0005,
            depth_speed: 1.5,
            depth_frequency: 0.01,
            depth_time_frequency: 0.0003,
            projection: Projection::new(200.0),
            visuals,
            seed: None,
        }
    }
}

impl FlowConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("loaded flow config from {}", path.display());
        Ok(config)
    }

    /// Reject values the cloud cannot animate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid {
                field: "particle_count",
                reason: "must be at least 1",
            });
        }
        if !(self.size_min > 0.0) || !(self.size_max >= self.size_min) {
            return Err(ConfigError::Invalid {
                field: "size_min",
                reason: "sizes must be positive with size_min <= size_max",
            });
        }
        if !(self.spawn_far > self.spawn_near) || !(self.far_limit > self.near_limit) {
            return Err(ConfigError::Invalid {
                field: "spawn_far",
                reason: "depth bands must not be empty",
            });
        }
        if !(self.projection.focal_length > 0.0) {
            return Err(ConfigError::Invalid {
                field: "projection.focal_length",
                reason: "must be positive",
            });
        }
        if !(self.projection.max_scale > 1.0) {
            return Err(ConfigError::Invalid {
                field: "projection.max_scale",
                reason: "must be greater than 1",
            });
        }
        Ok(())
    }

    /// Per-tick displacement of a particle at `p` at `t_ms`.
    pub fn velocity(&self, p: Vec3, t_ms: f64) -> Vec3 {
        let r = (p.x * p.x + p.y * p.y).sqrt() + 1e-4;
        let drift_phase = phase_angle(self.drift_frequency, t_ms);
        let depth_phase = phase_angle(self.depth_time_frequency, t_ms);
        Vec3::new(
            -p.y / r * self.swirl_speed + drift_phase.sin() * self.drift,
            p.x / r * self.swirl_speed + drift_phase.cos() * self.drift,
            (p.z * self.depth_frequency + depth_phase).sin() * self.depth_speed,
        )
    }
}

/// Flow-field particle cloud.
///
/// Particles are spawned on the first tick with a non-empty canvas, since the
/// spawn box depends on the surface size.
pub struct FlowCloud<R: Rng = SmallRng> {
    config: FlowConfig,
    particles: Vec<Particle>,
    spawn: SpawnContext<R>,
    respawned: u64,
}

impl FlowCloud<SmallRng> {
    /// Validate `config`; particles are spawned on the first sized frame.
    pub fn new(config: FlowConfig) -> Result<Self, ConfigError> {
        let spawn = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::from_clock(),
        };
        Self::with_spawn(config, spawn)
    }
}

impl<R: Rng> FlowCloud<R> {
    /// Build a cloud around an explicit random source.
    pub fn with_rng(config: FlowConfig, rng: R) -> Result<Self, ConfigError> {
        Self::with_spawn(config, SpawnContext::new(rng))
    }

    fn with_spawn(config: FlowConfig, spawn: SpawnContext<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            particles: Vec::new(),
            spawn,
            respawned: 0,
        })
    }

    /// Configuration the cloud was built from.
    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Current particles; empty until the first sized frame.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Total respawns since creation.
    #[inline]
    pub fn respawned(&self) -> u64 {
        self.respawned
    }

    fn random_position(&mut self, width: u32, height: u32) -> Vec3 {
        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;
        Vec3::new(
            self.spawn.random_range(-half_w, half_w),
            self.spawn.random_range(-half_h, half_h),
            self.spawn.random_range(self.config.spawn_near, self.config.spawn_far),
        )
    }

    fn populate(&mut self, width: u32, height: u32) {
        let count = self.config.particle_count;
        let mut particles = Vec::with_capacity(count as usize);
        for i in 0..count {
            self.spawn.at(i, count);
            let position = self.random_position(width, height);
            let size = self.spawn.random_range(self.config.size_min, self.config.size_max);
            particles.push(Particle::new(position, size, Vec3::ZERO, 0.0));
        }
        self.particles = particles;
        log::info!("flow cloud ready: {} particles in {}x{}", count, width, height);
    }

    /// Whether a particle at `p` has left the visible volume.
    fn out_of_bounds(&self, p: Vec3, width: u32, height: u32) -> bool {
        if p.z < self.config.near_limit || p.z > self.config.far_limit {
            return true;
        }
        let Some(scale) = self.config.projection.scale(p.z) else {
            return true;
        };
        let margin = self.config.margin;
        let x = p.x * scale + width as f32 / 2.0;
        let y = p.y * scale + height as f32 / 2.0;
        x < -margin || x > width as f32 + margin || y < -margin || y > height as f32 + margin
    }

    /// Move every particle one step and respawn the strays.
    pub fn step(&mut self, t_ms: f64, width: u32, height: u32) {
        for i in 0..self.particles.len() {
            let mut p = self.particles[i].position;
            p += self.config.velocity(p, t_ms);
            if self.out_of_bounds(p, width, height) {
                p = self.random_position(width, height);
                self.respawned += 1;
            }
            self.particles[i].position = p;
        }
    }
}

impl<R: Rng> Scene for FlowCloud<R> {
    fn name(&self) -> &'static str {
        "flow"
    }

    fn tick(&mut self, t_ms: f64, canvas: &mut dyn Canvas, _pointer: PointerState) -> FrameReport {
        if !canvas.is_ready() {
            return FrameReport::default();
        }
        let (width, height) = canvas.size();
        if self.particles.is_empty() {
            self.populate(width, height);
        }
        self.step(t_ms, width, height);
        let drawn = paint(&self.particles, &self.config.projection, &self.config.visuals, canvas);
        log::trace!("t={:.0}ms drawn={} respawned={}", t_ms, drawn, self.respawned);

        FrameReport {
            phase: None,
            drawn,
            overlay: None,
        }
    }

    fn background(&self) -> Vec3 {
        self.config.visuals.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FrameBuffer;

    fn cloud() -> FlowCloud {
        FlowCloud::new(FlowConfig {
            particle_count: 500,
            seed: Some(3),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_velocity_is_tangential() {
        let config = FlowConfig {
            drift: 0.0,
            ..Default::default()
        };
        let v = config.velocity(Vec3::new(100.0, 0.0, 0.0), 0.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.5).abs() < 1e-4);

        let v = config.velocity(Vec3::new(0.0, 100.0, 0.0), 0.0);
        assert!((v.x + 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_finite_at_axis() {
        let v = FlowConfig::default().velocity(Vec3::ZERO, 1234.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_waits_for_canvas() {
        let mut cloud = cloud();
        let mut canvas = FrameBuffer::new(0, 0);
        let report = cloud.tick(16.0, &mut canvas, PointerState::away());
        assert_eq!(report.drawn, 0);
        assert!(cloud.particles().is_empty());
    }

    #[test]
    fn test_spawns_inside_volume() {
        let mut cloud = cloud();
        let mut canvas = FrameBuffer::new(400, 300);
        cloud.tick(0.0, &mut canvas, PointerState::away());
        assert_eq!(cloud.particles().len(), 500);
        for p in cloud.particles() {
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.position.z >= -202.0 && p.position.z <= 1000.0);
        }
    }

    #[test]
    fn test_strays_respawn_inside_box() {
        let mut cloud = cloud();
        let mut canvas = FrameBuffer::new(400, 300);
        cloud.tick(0.0, &mut canvas, PointerState::away());

        cloud.particles[0].position = Vec3::new(5_000.0, 0.0, 0.0);
        cloud.particles[1].position = Vec3::new(0.0, 0.0, 2_000.0);
        cloud.particles[2].position = Vec3::new(0.0, 0.0, -150.0);
        let before = cloud.respawned();
        cloud.step(16.0, 400, 300);

        assert!(cloud.respawned() >= before + 3);
        for p in &cloud.particles()[..3] {
            assert!(p.position.x.abs() <= 200.0 && p.position.y.abs() <= 150.0);
            assert!(p.position.z >= -200.0 && p.position.z < 900.0);
        }
    }

    #[test]
    fn test_has_no_phase() {
        let mut cloud = cloud();
        let mut canvas = FrameBuffer::new(100, 100);
        let report = cloud.tick(16.0, &mut canvas, PointerState::hover(1.0, 1.0));
        assert_eq!(report.phase, None);
        assert_eq!(report.overlay, None);
    }
}
