//! Benchmarks for per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use morph_sphere::prelude::*;
use morph_sphere::Projection;
use morph_sphere::render::paint;

fn bench_engine_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tick");

    for count in [500u32, 1500, 5000] {
        group.bench_with_input(BenchmarkId::new("drifting", count), &count, |b, &count| {
            let config = EngineConfig::default().with_particle_count(count).with_seed(1);
            let mut engine = Engine::new(config).unwrap();
            let mut canvas = FrameBuffer::new(800, 600);
            let mut t = 0.0;
            b.iter(|| {
                // Stay inside the first trigger interval.
                t = (t + 16.0) % 9_000.0;
                black_box(engine.tick(t, &mut canvas, PointerState::away()))
            })
        });

        group.bench_with_input(BenchmarkId::new("hovering", count), &count, |b, &count| {
            let config = EngineConfig::default().with_particle_count(count).with_seed(1);
            let mut engine = Engine::new(config).unwrap();
            let mut canvas = FrameBuffer::new(800, 600);
            let mut t = 0.0;
            b.iter(|| {
                t += 16.0;
                black_box(engine.tick(t, &mut canvas, PointerState::hover(400.0, 300.0)))
            })
        });
    }

    group.finish();
}

fn bench_flow_tick(c: &mut Criterion) {
    c.bench_function("flow_tick_3000", |b| {
        let config = FlowConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut cloud = FlowCloud::new(config).unwrap();
        let mut canvas = FrameBuffer::new(800, 600);
        let mut t = 0.0;
        b.iter(|| {
            t += 16.0;
            black_box(cloud.tick(t, &mut canvas, PointerState::away()))
        })
    });
}

fn bench_field(c: &mut Criterion) {
    let field = KinematicField::default();
    c.bench_function("kinematic_field_position", |b| {
        b.iter(|| {
            black_box(field.position(
                black_box(Vec3::new(120.0, -40.0, 80.0)),
                black_box(Vec3::new(0.4, 1.2, 2.9)),
                black_box(12_345.0),
                black_box(Vec3::new(10.0, 5.0, 0.0)),
            ))
        })
    });
}

fn bench_paint(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default().with_seed(1)).unwrap();
    let projection = Projection::default();
    let visuals = VisualConfig::default();
    let mut canvas = FrameBuffer::new(800, 600);
    c.bench_function("paint_1500_soft", |b| {
        b.iter(|| black_box(paint(engine.store().particles(), &projection, &visuals, &mut canvas)))
    });
}

criterion_group!(benches, bench_engine_tick, bench_flow_tick, bench_field, bench_paint);
criterion_main!(benches);
