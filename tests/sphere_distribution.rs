//! Goodness-of-fit of the sphere sampler.

use morph_sphere::{ParticleStore, Shape, SpawnContext};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLES: u32 = 100_000;
const BINS: usize = 20;
/// Chi-square critical value for 19 degrees of freedom at p = 0.001.
const CHI_SQUARE_CRITICAL: f64 = 43.82;

fn chi_square(counts: &[u32], expected: f64) -> f64 {
    counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum()
}

fn bin(value: f32, min: f32, max: f32) -> usize {
    let t = (value - min) / (max - min);
    ((t * BINS as f32) as usize).min(BINS - 1)
}

fn sample_sphere(seed: u64) -> ParticleStore {
    let mut ctx = SpawnContext::new(StdRng::seed_from_u64(seed));
    ParticleStore::create(SAMPLES, &Shape::Sphere, 1.0, 0.0, 1.0..2.0, &mut ctx)
}

#[test]
fn test_polar_cosine_is_uniform() {
    let store = sample_sphere(2024);
    let mut counts = [0u32; BINS];
    for p in store.iter() {
        let cos_polar = p.base.z / p.base.length();
        counts[bin(cos_polar, -1.0, 1.0)] += 1;
    }

    let stat = chi_square(&counts, SAMPLES as f64 / BINS as f64);
    assert!(stat < CHI_SQUARE_CRITICAL, "chi-square {stat:.2}, counts {counts:?}");
}

#[test]
fn test_no_pole_clustering() {
    let store = sample_sphere(99);
    let expected = SAMPLES as f64 / BINS as f64;
    let mut counts = [0u32; BINS];
    for p in store.iter() {
        counts[bin(p.base.z / p.base.length(), -1.0, 1.0)] += 1;
    }
    // Naive uniform-polar-angle sampling piles roughly 3x the mean into the end bins.
    for edge in [counts[0], counts[BINS - 1]] {
        assert!((edge as f64) < expected * 1.1, "edge bin {edge}");
    }
}

#[test]
fn test_azimuth_is_uniform() {
    let store = sample_sphere(7);
    let mut counts = [0u32; BINS];
    for p in store.iter() {
        let azimuth = p.base.y.atan2(p.base.x);
        counts[bin(azimuth, -std::f32::consts::PI, std::f32::consts::PI)] += 1;
    }

    let stat = chi_square(&counts, SAMPLES as f64 / BINS as f64);
    assert!(stat < CHI_SQUARE_CRITICAL, "chi-square {stat:.2}, counts {counts:?}");
}

#[test]
fn test_jittered_radius_stays_in_band() {
    let mut ctx = SpawnContext::new(StdRng::seed_from_u64(3));
    let store = ParticleStore::create(10_000, &Shape::Sphere, 200.0, 0.04, 1.0..3.0, &mut ctx);
    for p in store.iter() {
        let r = p.base.length();
        assert!((192.0 - 1e-3..=208.0 + 1e-3).contains(&r), "radius {r}");
    }
}
