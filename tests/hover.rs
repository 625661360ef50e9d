//! Pointer hover suspends the cycle and swirls particles around the pointer.

use morph_sphere::prelude::*;

fn engine(resume: HoverResume) -> Engine {
    let config = EngineConfig::default()
        .with_particle_count(120)
        .with_focal(FocalPoint::fixed(Vec3::ZERO))
        .with_interaction(InteractionConfig {
            resume,
            ..Default::default()
        })
        .with_seed(77);
    Engine::new(config).unwrap()
}

/// Drift until `t_end`, hover from `hover_start` to `hover_end`, then keep ticking.
fn run_with_hover(engine: &mut Engine, hover_start: f64, hover_end: f64, until: f64) -> Vec<(f64, Phase)> {
    let mut canvas = FrameBuffer::new(400, 300);
    let mut phases = Vec::new();
    let mut t = 0.0;
    while t <= until {
        let pointer = if t >= hover_start && t < hover_end {
            PointerState::hover(300.0, 100.0)
        } else {
            PointerState::away()
        };
        let report = engine.tick(t, &mut canvas, pointer);
        phases.push((t, report.phase.unwrap()));
        t += 100.0;
    }
    phases
}

fn first_contraction(phases: &[(f64, Phase)]) -> Option<f64> {
    phases
        .iter()
        .find(|(_, phase)| *phase == Phase::Contracting)
        .map(|(t, _)| *t)
}

#[test]
fn test_hover_freezes_cycle() {
    let mut engine = engine(HoverResume::Shift);
    let phases = run_with_hover(&mut engine, 5_000.0, 20_000.0, 19_900.0);
    assert!(engine.is_hovering());
    assert!(phases.iter().all(|(_, phase)| *phase == Phase::Drifting));
}

#[test]
fn test_particles_gather_around_pointer() {
    let mut engine = engine(HoverResume::Shift);
    let mut canvas = FrameBuffer::new(400, 300);
    let pointer_world = Vec3::new(100.0, -50.0, 0.0);

    let spread = |engine: &Engine| {
        engine
            .store()
            .iter()
            .map(|p| (p.position - pointer_world).length())
            .fold(0.0f32, f32::max)
    };

    engine.tick(0.0, &mut canvas, PointerState::away());
    let before = spread(&engine);

    let mut t = 16.0;
    for _ in 0..200 {
        let report = engine.tick(t, &mut canvas, PointerState::hover(300.0, 100.0));
        assert_eq!(report.overlay, Some(Vec2::new(300.0, 100.0)));
        t += 16.0;
    }
    let after = spread(&engine);
    assert!(after < before);
    // Swirl sphere radius 40 breathing by 30%, plus a small lag.
    assert!(after < 40.0 * 1.3 + 10.0, "spread {after}");
    assert!(engine.store().iter().all(|p| p.interaction_target.is_some()));

    let report = engine.tick(t, &mut canvas, PointerState::away());
    assert_eq!(report.overlay, None);
    assert!(engine.store().iter().all(|p| p.interaction_target.is_none()));
}

#[test]
fn test_shift_resumes_where_frozen() {
    // 6 s of drift, 15 s of hover: the trigger comes 10 s of *unhovered* time after start.
    let mut engine = engine(HoverResume::Shift);
    let phases = run_with_hover(&mut engine, 6_000.0, 21_000.0, 30_000.0);
    let t = first_contraction(&phases).unwrap();
    assert!(t > 21_000.0 + 3_900.0, "contracted at {t}");
    assert!(t <= 21_000.0 + 4_200.0, "contracted at {t}");
}

#[test]
fn test_wall_clock_fires_right_after_hover() {
    let mut engine = engine(HoverResume::WallClock);
    let phases = run_with_hover(&mut engine, 6_000.0, 21_000.0, 30_000.0);
    assert_eq!(first_contraction(&phases), Some(21_000.0));
}

#[test]
fn test_disabled_interaction_ignores_pointer() {
    let config = EngineConfig::default()
        .with_particle_count(50)
        .with_interaction(InteractionConfig {
            enabled: false,
            ..Default::default()
        })
        .with_seed(5);
    let mut engine = Engine::new(config).unwrap();
    let phases = run_with_hover(&mut engine, 0.0, 30_000.0, 10_500.0);
    assert!(!engine.is_hovering());
    assert_eq!(first_contraction(&phases), Some(10_100.0));
}
