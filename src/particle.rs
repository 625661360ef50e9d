//! Particle records and the fixed-size store that owns them.
//!
//! A [`Particle`] is plain data. All motion rules are free functions in
//! [`crate::cycle`] and [`crate::interaction`] that sweep the store in bulk.

use crate::shape::Shape;
use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::Rng;
use std::ops::Range;

/// One simulated point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Canonical position on the current target shape.
    pub base: Vec3,
    /// Current rendered position.
    pub position: Vec3,
    /// Dot radius in pixels at scale 1.
    pub size: f32,
    /// Per-axis phase offsets for the flow perturbation.
    pub flow_phase: Vec3,
    /// Where the particle was when the current contraction began.
    pub merge_origin: Vec3,
    /// Unit vector the merge path bows along (zero if degenerate).
    pub curve_direction: Vec3,
    /// How far the merge path bows off the straight line.
    pub curve_amplitude: f32,
    /// Orbit azimuth around the pointer while hovering.
    pub interaction_angle: f32,
    /// Swirl target while hovering, cleared when hover ends.
    pub interaction_target: Option<Vec3>,
}

impl Particle {
    /// A particle resting at `base`.
    pub fn new(base: Vec3, size: f32, flow_phase: Vec3, interaction_angle: f32) -> Self {
        Self {
            base,
            position: base,
            size,
            flow_phase,
            merge_origin: base,
            curve_direction: Vec3::ZERO,
            curve_amplitude: 0.0,
            interaction_angle,
            interaction_target: None,
        }
    }
}

/// Fixed-size particle collection.
///
/// The count is set once by [`ParticleStore::create`]; afterwards particles
/// are only respawned in place.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Populate `count` particles sampled from `shape`.
    pub fn create<R: Rng>(
        count: u32,
        shape: &Shape,
        radius: f32,
        jitter: f32,
        size_range: Range<f32>,
        ctx: &mut SpawnContext<R>,
    ) -> Self {
        let particles = (0..count)
            .map(|i| {
                ctx.at(i, count);
                let base = shape.sample(ctx, radius, jitter);
                let size = ctx.random_range(size_range.start, size_range.end);
                let flow_phase = ctx.random_phases();
                let angle = ctx.random_angle();
                Particle::new(base, size, flow_phase, angle)
            })
            .collect();

        Self { particles }
    }

    /// Regenerate every base position from `shape`.
    ///
    /// Count, sizes and flow phases are left untouched.
    pub fn resample<R: Rng>(
        &mut self,
        shape: &Shape,
        radius: f32,
        jitter: f32,
        ctx: &mut SpawnContext<R>,
    ) {
        let count = self.particles.len() as u32;
        for (i, p) in self.particles.iter_mut().enumerate() {
            ctx.at(i as u32, count);
            p.base = shape.sample(ctx, radius, jitter);
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of all particles.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of all particles. The slice length cannot change.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Iterate the particles in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}
