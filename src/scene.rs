//! The per-frame interface hosts drive.

use crate::canvas::Canvas;
use crate::cycle::Phase;
use crate::interaction::PointerState;
use glam::{Vec2, Vec3};

/// What a scene did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Cycle phase after the tick, for scenes that have one.
    pub phase: Option<Phase>,
    /// Dots painted this frame.
    pub drawn: usize,
    /// Where the host should place its overlay element, in surface pixels.
    /// `Some` only while the pointer is hovering.
    pub overlay: Option<Vec2>,
}

/// An animation that advances and paints itself once per frame.
///
/// `t_ms` is a monotonic timestamp in milliseconds. The canvas size is read
/// on every call, so hosts may resize it freely between frames.
pub trait Scene {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Advance to `t_ms` and paint onto `canvas`.
    fn tick(&mut self, t_ms: f64, canvas: &mut dyn Canvas, pointer: PointerState) -> FrameReport;

    /// Color presenters should clear to before the first frame.
    fn background(&self) -> Vec3;
}
