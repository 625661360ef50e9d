//! Target shapes particles are sampled from.
//!
//! The engine alternates between a primary and an alternate shape on every
//! completed merge/explosion cycle. Any shape that cannot produce points
//! (an empty point cloud, or no alternate configured at all) falls back to
//! the sphere so particles never end up at NaN.

use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A silhouette the particle cloud can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Uniform-density sphere surface with a slight radius jitter.
    #[default]
    Sphere,
    /// Torus around the Y axis (tube radius a third of the ring radius).
    Torus,
    /// Two interleaved helical strands along the Y axis.
    DoubleHelix {
        /// Number of full turns over the helix height.
        turns: f32,
    },
    /// Explicit point cloud in unit space, scaled by the shape radius.
    ///
    /// Particle `i` takes point `i % len`.
    Points { points: Vec<Vec3> },
}

impl Shape {
    /// Whether this shape can actually produce points.
    pub fn is_available(&self) -> bool {
        match self {
            Shape::Points { points } => !points.is_empty(),
            _ => true,
        }
    }

    /// Short name for logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Torus => "torus",
            Shape::DoubleHelix { .. } => "double_helix",
            Shape::Points { .. } => "points",
        }
    }

    /// Sample the base point for the particle the context currently points at.
    pub fn sample<R: Rng>(&self, ctx: &mut SpawnContext<R>, radius: f32, jitter: f32) -> Vec3 {
        match self {
            Shape::Sphere => ctx.random_on_sphere(radius, jitter),
            Shape::Torus => ctx.random_on_torus(radius * 0.75, radius * 0.25),
            Shape::DoubleHelix { turns } => {
                ctx.double_helix_position(radius * 0.5, radius * 2.0, *turns)
            }
            Shape::Points { points } if !points.is_empty() => {
                points[ctx.index as usize % points.len()] * radius
            }
            Shape::Points { .. } => ctx.random_on_sphere(radius, jitter),
        }
    }
}

/// Which of the two configured shapes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeSlot {
    #[default]
    Primary,
    Alternate,
}

impl ShapeSlot {
    /// The other slot.
    pub fn toggled(self) -> Self {
        match self {
            ShapeSlot::Primary => ShapeSlot::Alternate,
            ShapeSlot::Alternate => ShapeSlot::Primary,
        }
    }
}

/// The primary/alternate shape pair the engine morphs between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePair {
    pub primary: Shape,
    pub alternate: Option<Shape>,
}

impl Default for ShapePair {
    fn default() -> Self {
        Self {
            primary: Shape::Sphere,
            alternate: Some(Shape::Torus),
        }
    }
}

impl ShapePair {
    fn configured(&self, slot: ShapeSlot) -> Option<&Shape> {
        match slot {
            ShapeSlot::Primary => Some(&self.primary),
            ShapeSlot::Alternate => self.alternate.as_ref(),
        }
    }

    /// Whether `slot` will be sampled from the sphere instead of its own shape.
    pub fn falls_back(&self, slot: ShapeSlot) -> bool {
        !self.configured(slot).is_some_and(Shape::is_available)
    }

    /// Warn about every slot that falls back to the sphere.
    pub fn warn_fallbacks(&self) {
        for slot in [ShapeSlot::Primary, ShapeSlot::Alternate] {
            if !self.falls_back(slot) {
                continue;
            }
            match self.configured(slot) {
                Some(shape) => log::warn!("{} shape has no points; using sphere", shape.name()),
                None => log::warn!("no alternate shape configured; using sphere"),
            }
        }
    }

    /// The shape to sample for `slot`, falling back to the sphere when the
    /// configured one is missing or empty.
    pub fn resolve(&self, slot: ShapeSlot) -> &Shape {
        static FALLBACK: Shape = Shape::Sphere;
        match self.configured(slot) {
            Some(shape) if shape.is_available() => shape,
            _ => {
                log::debug!("{:?} slot resolved to the fallback sphere", slot);
                &FALLBACK
            }
        }
    }
}
