//! The morphing-sphere engine.
//!
//! [`Engine`] owns everything that used to be loose per-frame state: the
//! configuration, the particle store, the cycle bookkeeping, the hover
//! tracker and the random source. Construct it once, call
//! [`Engine::tick`] from the frame callback, drop it to tear down.
//!
//! # Example
//!
//! ```ignore
//! use morph_sphere::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::default().with_seed(1))?;
//! let mut canvas = FrameBuffer::new(800, 600);
//! let report = engine.tick(16.0, &mut canvas, PointerState::away());
//! assert_eq!(report.phase, Some(Phase::Drifting));
//! ```

use crate::canvas::Canvas;
use crate::config::EngineConfig;
use crate::cycle::{self, CycleState, Phase, TickContext, Transition};
use crate::error::ConfigError;
use crate::interaction::{
    pointer_world, release, steer, HoverResume, HoverStatus, InteractionOverride, OverlayAnchor,
    PointerState,
};
use crate::particle::ParticleStore;
use crate::render::paint;
use crate::scene::{FrameReport, Scene};
use crate::shape::ShapeSlot;
use crate::spawn::SpawnContext;
use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;

/// Merge/explosion particle engine.
pub struct Engine<R: Rng = SmallRng> {
    config: EngineConfig,
    store: ParticleStore,
    cycle: CycleState,
    hover: InteractionOverride,
    spawn: SpawnContext<R>,
}

impl Engine<SmallRng> {
    /// Validate `config` and populate the particle store.
    ///
    /// Uses `config.seed` when set, otherwise seeds from the clock.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let spawn = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::from_clock(),
        };
        Self::with_spawn(config, spawn)
    }
}

impl<R: Rng> Engine<R> {
    /// Build an engine around an explicit random source.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        Self::with_spawn(config, SpawnContext::new(rng))
    }

    fn with_spawn(config: EngineConfig, mut spawn: SpawnContext<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        config.shapes.warn_fallbacks();

        let shape = config.shapes.resolve(ShapeSlot::Primary);
        let store = ParticleStore::create(
            config.particle_count,
            shape,
            config.radius,
            config.radius_jitter,
            config.size_min..config.size_max,
            &mut spawn,
        );
        log::info!(
            "engine ready: {} particles on a {} of radius {}",
            store.len(),
            shape.name(),
            config.radius
        );

        Ok(Self {
            cycle: CycleState::new(config.timings, 0.0),
            hover: InteractionOverride::new(config.interaction),
            config,
            store,
            spawn,
        })
    }

    /// Configuration the engine was built from.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The particles, as of the last tick.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Merge/explosion bookkeeping.
    #[inline]
    pub fn cycle(&self) -> &CycleState {
        &self.cycle
    }

    /// Whether pointer hover is currently suspending the cycle.
    #[inline]
    pub fn is_hovering(&self) -> bool {
        self.hover.is_active()
    }

    /// Advance the simulation to `t_ms` and paint the frame onto `canvas`.
    pub fn tick(&mut self, t_ms: f64, canvas: &mut dyn Canvas, pointer: PointerState) -> FrameReport {
        let (width, height) = canvas.size();
        let focal = self.config.focal.at(t_ms);

        let overlay = match self.hover.update(pointer, t_ms) {
            HoverStatus::Active { center_px } => {
                let center = pointer_world(center_px, width, height);
                let interaction = self.config.interaction;
                for p in self.store.particles_mut() {
                    steer(p, center, t_ms, &interaction);
                }
                Some(self.overlay_anchor(center_px, focal, width, height))
            }
            HoverStatus::Ended { hovered_ms } => {
                release(self.store.particles_mut());
                if self.config.interaction.resume == HoverResume::Shift {
                    self.cycle.shift(hovered_ms);
                }
                self.advance(t_ms, focal);
                None
            }
            HoverStatus::Idle => {
                self.advance(t_ms, focal);
                None
            }
        };

        let drawn = paint(
            self.store.particles(),
            &self.config.projection,
            &self.config.visuals,
            canvas,
        );
        log::trace!(
            "t={:.0}ms phase={:?} drawn={}/{}",
            t_ms,
            self.cycle.phase(),
            drawn,
            self.store.len()
        );

        FrameReport {
            phase: Some(self.cycle.phase()),
            drawn,
            overlay,
        }
    }

    fn advance(&mut self, t_ms: f64, focal: Vec3) {
        let ctx = TickContext {
            t_ms,
            focal,
            field: self.config.field,
        };
        if let Some(Transition::Complete { shape }) = self.cycle.advance(&ctx, self.store.particles_mut()) {
            let target = self.config.shapes.resolve(shape);
            log::debug!(
                "cycle {} complete, morphing to {}",
                self.cycle.completed_cycles(),
                target.name()
            );
            self.store.resample(
                target,
                self.config.radius,
                self.config.radius_jitter,
                &mut self.spawn,
            );
            cycle::drift(self.store.particles_mut(), &ctx);
        }
    }

    fn overlay_anchor(&self, pointer_px: Vec2, focal: Vec3, width: u32, height: u32) -> Vec2 {
        match self.config.interaction.overlay {
            OverlayAnchor::Pointer => pointer_px,
            OverlayAnchor::FocalPoint => self
                .config
                .projection
                .project(focal, 0.0, width, height)
                .map(|dot| dot.center)
                .unwrap_or(pointer_px),
        }
    }

    /// Current cycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }
}

impl<R: Rng> Scene for Engine<R> {
    fn name(&self) -> &'static str {
        "morph"
    }

    fn tick(&mut self, t_ms: f64, canvas: &mut dyn Canvas, pointer: PointerState) -> FrameReport {
        Engine::tick(self, t_ms, canvas, pointer)
    }

    fn background(&self) -> Vec3 {
        self.config.visuals.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FrameBuffer;
    use crate::field::FocalPoint;
    use crate::shape::Shape;

    fn config() -> EngineConfig {
        EngineConfig::default()
            .with_particle_count(200)
            .with_focal(FocalPoint::fixed(Vec3::ZERO))
            .with_seed(42)
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(Engine::new(config().with_particle_count(0)).is_err());
    }

    #[test]
    fn test_seeded_engines_match() {
        let a = Engine::new(config()).unwrap();
        let b = Engine::new(config()).unwrap();
        assert_eq!(a.store().particles(), b.store().particles());
    }

    #[test]
    fn test_draws_on_sized_canvas_only() {
        let mut engine = Engine::new(config()).unwrap();
        let mut empty = FrameBuffer::new(0, 0);
        let report = engine.tick(16.0, &mut empty, PointerState::away());
        assert_eq!(report.drawn, 0);
        assert_eq!(report.phase, Some(Phase::Drifting));

        let mut canvas = FrameBuffer::new(320, 240);
        let report = engine.tick(32.0, &mut canvas, PointerState::away());
        assert_eq!(report.drawn, 200);
        assert_eq!(report.overlay, None);
    }

    #[test]
    fn test_completed_cycle_resamples_base() {
        let mut engine = Engine::new(config()).unwrap();
        let mut canvas = FrameBuffer::new(64, 64);
        let before: Vec<_> = engine.store().iter().map(|p| (p.base, p.size, p.flow_phase)).collect();

        for t in [0.0, 10_001.0, 11_001.0, 12_501.0] {
            engine.tick(t, &mut canvas, PointerState::away());
        }
        assert_eq!(engine.phase(), Phase::Drifting);
        assert_eq!(engine.cycle().active_shape(), ShapeSlot::Alternate);

        let ctx = TickContext {
            t_ms: 12_501.0,
            focal: Vec3::ZERO,
            field: engine.config().field,
        };
        for (p, (base, size, phase)) in engine.store().iter().zip(before) {
            assert_ne!(p.base, base);
            assert_eq!(p.size, size);
            assert_eq!(p.flow_phase, phase);
            assert_eq!(p.position, ctx.drift_position(p));
        }
    }

    #[test]
    fn test_missing_alternate_falls_back_to_sphere() {
        let config = config().with_shapes(Shape::Sphere, None);
        let mut engine = Engine::new(config).unwrap();
        let mut canvas = FrameBuffer::new(64, 64);
        for t in [0.0, 10_001.0, 11_001.0, 12_501.0] {
            engine.tick(t, &mut canvas, PointerState::away());
        }
        assert!(engine.store().iter().all(|p| p.base.is_finite() && p.position.is_finite()));
    }

    #[test]
    fn test_shape_wider_than_focal_length_stays_bounded() {
        let config = config().with_radius(400.0);
        let projection = config.projection;
        let size_max = config.size_max;
        let mut engine = Engine::new(config).unwrap();
        let mut canvas = FrameBuffer::new(320, 240);

        let mut culled = false;
        let mut t = 0.0;
        for _ in 0..200 {
            let report = engine.tick(t, &mut canvas, PointerState::away());
            culled |= report.drawn < engine.store().len();
            for p in engine.store().iter() {
                if let Some(dot) = projection.project(p.position, p.size, 320, 240) {
                    assert!(dot.radius <= size_max * projection.max_scale, "radius {}", dot.radius);
                }
            }
            t += 16.0;
        }
        // Part of a radius-400 sphere always sits behind the near plane.
        assert!(culled);
    }

    #[test]
    fn test_overlay_follows_pointer() {
        let mut engine = Engine::new(config()).unwrap();
        let mut canvas = FrameBuffer::new(200, 100);
        let report = engine.tick(16.0, &mut canvas, PointerState::hover(30.0, 40.0));
        assert_eq!(report.overlay, Some(Vec2::new(30.0, 40.0)));
        assert!(engine.is_hovering());
    }

    #[test]
    fn test_overlay_at_focal_point() {
        let mut config = config();
        config.interaction.overlay = OverlayAnchor::FocalPoint;
        let mut engine = Engine::new(config).unwrap();
        let mut canvas = FrameBuffer::new(200, 100);
        let report = engine.tick(16.0, &mut canvas, PointerState::hover(30.0, 40.0));
        assert_eq!(report.overlay, Some(Vec2::new(100.0, 50.0)));
    }
}
