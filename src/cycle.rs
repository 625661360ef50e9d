//! The merge/explosion cycle.
//!
//! ```text
//! Drifting --(trigger interval elapsed)--> Contracting
//! Contracting --(contraction done)--> Expanding
//! Expanding --(expansion done, toggle shape)--> Drifting
//! ```
//!
//! The cycle is driven purely by timestamp differences. Each particle update
//! is a free function of its own record and a read-only [`TickContext`], and
//! all writes to [`CycleState`] happen before or after the particle sweep.

use crate::field::KinematicField;
use crate::math::{ease_in_out_cubic, ease_out_cubic, lerp_vec3, perpendicular, progress};
use crate::particle::Particle;
use crate::shape::ShapeSlot;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Where the cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ordinary rotation around the focal point.
    #[default]
    Drifting,
    /// Particles converge on the focal point along bowed paths.
    Contracting,
    /// Particles fly back out to where drifting would have taken them.
    Expanding,
}

/// Fixed durations that govern the cycle, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleTimings {
    /// Drifting time between the end of one cycle and the next contraction.
    /// Typical range: 3000 - 30000.
    pub trigger_interval_ms: f64,
    /// Length of the contraction phase. Typical range: 500 - 3000.
    pub contraction_ms: f64,
    /// Length of the expansion phase. Typical range: 500 - 3000.
    pub expansion_ms: f64,
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self {
            trigger_interval_ms: 10_000.0,
            contraction_ms: 1_000.0,
            expansion_ms: 1_500.0,
        }
    }
}

/// A phase change produced by [`CycleState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Drifting ended; merge origins were snapshotted.
    Contract,
    /// Contraction finished; particles start flying out.
    Expand,
    /// A full cycle finished. The caller must resample base positions from
    /// `shape` and then run one drifting update.
    Complete { shape: ShapeSlot },
}

/// Read-only inputs shared by every particle during one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Frame timestamp in milliseconds.
    pub t_ms: f64,
    /// Focal point position at `t_ms`.
    pub focal: Vec3,
    /// Drift rule.
    pub field: KinematicField,
}

impl TickContext {
    /// Where `p` would be if it were simply drifting.
    #[inline]
    pub fn drift_position(&self, p: &Particle) -> Vec3 {
        self.field.position(p.base, p.flow_phase, self.t_ms, self.focal)
    }
}

/// Process-wide cycle bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleState {
    phase: Phase,
    phase_start_ms: f64,
    last_cycle_ms: f64,
    timings: CycleTimings,
    active_shape: ShapeSlot,
    completed_cycles: u64,
}

impl CycleState {
    /// A drifting cycle whose trigger interval counts from `start_ms`.
    pub fn new(timings: CycleTimings, start_ms: f64) -> Self {
        Self {
            phase: Phase::Drifting,
            phase_start_ms: start_ms,
            last_cycle_ms: start_ms,
            timings,
            active_shape: ShapeSlot::Primary,
            completed_cycles: 0,
        }
    }

    /// Current phase of the cycle.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Timestamp at which the current phase began.
    #[inline]
    pub fn phase_start_ms(&self) -> f64 {
        self.phase_start_ms
    }

    /// Timestamp at which the last full cycle completed.
    #[inline]
    pub fn last_cycle_ms(&self) -> f64 {
        self.last_cycle_ms
    }

    /// Phase durations in use.
    #[inline]
    pub fn timings(&self) -> &CycleTimings {
        &self.timings
    }

    /// Which shape the store is currently sampled from.
    #[inline]
    pub fn active_shape(&self) -> ShapeSlot {
        self.active_shape
    }

    /// Number of full cycles completed so far.
    #[inline]
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Progress through the current transition phase, clamped to `[0, 1]`.
    ///
    /// Always `0.0` while drifting.
    pub fn progress(&self, t_ms: f64) -> f32 {
        let elapsed = t_ms - self.phase_start_ms;
        match self.phase {
            Phase::Drifting => 0.0,
            Phase::Contracting => progress(elapsed, self.timings.contraction_ms),
            Phase::Expanding => progress(elapsed, self.timings.expansion_ms),
        }
    }

    /// Push every timer forward by `by_ms`, so a suspended interval does not
    /// count towards the trigger or the running phase.
    pub fn shift(&mut self, by_ms: f64) {
        self.phase_start_ms += by_ms;
        self.last_cycle_ms += by_ms;
    }

    /// Advance the cycle to `ctx.t_ms`, moving every particle.
    ///
    /// Returns the phase change this tick caused, if any. On
    /// [`Transition::Complete`] the particles are left at their final
    /// expansion positions; the caller resamples and calls [`drift`].
    pub fn advance(&mut self, ctx: &TickContext, particles: &mut [Particle]) -> Option<Transition> {
        let t = ctx.t_ms;
        match self.phase {
            Phase::Drifting => {
                drift(particles, ctx);
                if t - self.last_cycle_ms > self.timings.trigger_interval_ms {
                    for p in particles.iter_mut() {
                        begin_merge(p, ctx.focal);
                    }
                    self.enter(Phase::Contracting, t);
                    contract_all(particles, ctx, 0.0);
                    return Some(Transition::Contract);
                }
                None
            }
            Phase::Contracting => {
                let p = self.progress(t);
                contract_all(particles, ctx, ease_in_out_cubic(p));
                if p >= 1.0 {
                    self.enter(Phase::Expanding, t);
                    return Some(Transition::Expand);
                }
                None
            }
            Phase::Expanding => {
                let p = self.progress(t);
                let e = ease_out_cubic(p);
                for particle in particles.iter_mut() {
                    expand(particle, ctx, e);
                }
                if p >= 1.0 {
                    self.enter(Phase::Drifting, t);
                    self.last_cycle_ms = t;
                    self.active_shape = self.active_shape.toggled();
                    self.completed_cycles += 1;
                    return Some(Transition::Complete {
                        shape: self.active_shape,
                    });
                }
                None
            }
        }
    }

    fn enter(&mut self, phase: Phase, t_ms: f64) {
        log::debug!("cycle {:?} -> {:?} at {:.0}ms", self.phase, phase, t_ms);
        self.phase = phase;
        self.phase_start_ms = t_ms;
    }
}

/// Put every particle on its drift trajectory.
pub fn drift(particles: &mut [Particle], ctx: &TickContext) {
    for p in particles.iter_mut() {
        p.position = ctx.drift_position(p);
    }
}

/// Snapshot the merge origin and the bow of the path towards `focal`.
pub fn begin_merge(p: &mut Particle, focal: Vec3) {
    p.merge_origin = p.position;
    let travel = focal - p.merge_origin;
    p.curve_direction = perpendicular(travel);
    p.curve_amplitude = travel.length() / 3.0;
}

/// Lateral offset of the merge path at eased progress `e`.
///
/// Zero at both ends, largest halfway.
#[inline]
pub fn bow(p: &Particle, e: f32) -> Vec3 {
    p.curve_direction * p.curve_amplitude * (PI * e).sin()
}

/// Contraction position at eased progress `e`.
#[inline]
pub fn contract(p: &mut Particle, focal: Vec3, e: f32) {
    p.position = lerp_vec3(p.merge_origin, focal, e) + bow(p, e);
}

/// Expansion position at eased progress `e`.
#[inline]
pub fn expand(p: &mut Particle, ctx: &TickContext, e: f32) {
    let normal = ctx.drift_position(p);
    p.position = lerp_vec3(ctx.focal, normal, e) + bow(p, e);
}

fn contract_all(particles: &mut [Particle], ctx: &TickContext, e: f32) {
    for p in particles.iter_mut() {
        contract(p, ctx.focal, e);
    }
}
