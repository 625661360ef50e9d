//! Spawn context for particle initialization.
//!
//! Wraps an injectable random source with helpers for sampling points on the
//! target shapes. Tests pass a seeded RNG and get reproducible particles.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Context handed to shape samplers with helpers for common spawn patterns.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(7);
/// let p = ctx.random_on_sphere(200.0, 0.04);
/// ```
pub struct SpawnContext<R: Rng = SmallRng> {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
    rng: R,
}

impl SpawnContext<SmallRng> {
    /// Context with a fixed seed, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Context seeded from the system clock, different each execution.
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }
}

impl<R: Rng> SpawnContext<R> {
    /// Create a spawn context around an existing random source.
    pub fn new(rng: R) -> Self {
        Self {
            index: 0,
            count: 1,
            rng,
        }
    }

    /// Point the context at particle `index` of `count`.
    pub fn at(&mut self, index: u32, count: u32) -> &mut Self {
        self.index = index;
        self.count = count.max(1);
        self
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    // ========== Position helpers ==========

    /// Random point on a sphere of given radius, centered at origin.
    ///
    /// The polar angle comes from `acos` of a uniform value in `[-1, 1]`,
    /// which gives uniform surface density with no clustering at the poles.
    /// `jitter` perturbs the radius by up to that fraction either way.
    pub fn random_on_sphere(&mut self, radius: f32, jitter: f32) -> Vec3 {
        let theta = self.random_angle();
        let phi = self.rng.gen_range(-1.0f32..=1.0).acos();
        let r = if jitter > 0.0 {
            radius * (1.0 + self.rng.gen_range(-jitter..jitter))
        } else {
            radius
        };

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }

    /// Random point on a torus around the Y axis.
    ///
    /// * `major` - distance from the center to the tube center
    /// * `minor` - tube radius
    pub fn random_on_torus(&mut self, major: f32, minor: f32) -> Vec3 {
        let u = self.random_angle();
        let v = self.random_angle();
        let ring = major + minor * v.cos();

        Vec3::new(ring * u.cos(), minor * v.sin(), ring * u.sin())
    }

    /// Position on one strand of a double helix along the Y axis.
    ///
    /// Even indices go on the first strand, odd indices on the second one,
    /// half a turn around. Consecutive pairs share a height, like rungs.
    pub fn double_helix_position(&self, radius: f32, height: f32, turns: f32) -> Vec3 {
        let strand = (self.index % 2) as f32;
        let pairs = self.count.div_ceil(2).max(1);
        let t = (self.index / 2) as f32 / pairs as f32;
        let angle = t * TAU * turns + strand * PI;

        Vec3::new(
            radius * angle.cos(),
            (t - 0.5) * height,
            radius * angle.sin(),
        )
    }

    /// Three independent phases in `[0, 2π)`.
    pub fn random_phases(&mut self) -> Vec3 {
        Vec3::new(self.random_angle(), self.random_angle(), self.random_angle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_clamps_empty_count() {
        let mut ctx = SpawnContext::seeded(1);
        ctx.at(0, 0);
        assert_eq!((ctx.index, ctx.count), (0, 1));
    }

    #[test]
    fn test_random_on_sphere_radius() {
        let mut ctx = SpawnContext::seeded(3);
        for _ in 0..500 {
            let pos = ctx.random_on_sphere(100.0, 0.05);
            let r = pos.length();
            assert!((95.0 - 0.01..=105.0 + 0.01).contains(&r), "radius {r}");
        }
        for _ in 0..100 {
            assert!((ctx.random_on_sphere(2.0, 0.0).length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnContext::seeded(99);
        let mut b = SpawnContext::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.random_on_sphere(1.0, 0.1), b.random_on_sphere(1.0, 0.1));
        }
    }

    #[test]
    fn test_torus_bounds() {
        let mut ctx = SpawnContext::seeded(5);
        for _ in 0..200 {
            let p = ctx.random_on_torus(3.0, 1.0);
            let ring = (p.x * p.x + p.z * p.z).sqrt();
            assert!((2.0 - 1e-4..=4.0 + 1e-4).contains(&ring));
            assert!(p.y.abs() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_double_helix_strands_opposite() {
        let mut ctx = SpawnContext::seeded(0);
        let a = ctx.at(0, 2).double_helix_position(1.0, 2.0, 1.0);
        let b = ctx.at(1, 2).double_helix_position(1.0, 2.0, 1.0);
        assert!((a - Vec3::new(1.0, -1.0, 0.0)).length() < 1e-5);
        assert!((b - Vec3::new(-1.0, -1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_random_range_empty() {
        let mut ctx = SpawnContext::seeded(0);
        assert_eq!(ctx.random_range(2.0, 2.0), 2.0);
    }
}
