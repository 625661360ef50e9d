//! # morph-sphere
//!
//! Frame-driven particle animations for decorative backgrounds.
//!
//! The main scene is a morphing sphere: particles drift on a slowly rotating
//! shape around an oscillating focal point, periodically collapse into that
//! point along curved paths, burst back out, and settle on the *other*
//! configured shape. Hovering the pointer suspends the cycle and swirls every
//! particle around the pointer instead.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morph_sphere::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default()
//!         .with_particle_count(1500)
//!         .with_shapes(Shape::Sphere, Some(Shape::DoubleHelix { turns: 3.0 }));
//!
//!     let mut engine = Engine::new(config)?;
//!     let mut canvas = FrameBuffer::new(800, 600);
//!     let mut clock = FrameClock::fixed(16.0);
//!
//!     for _ in 0..600 {
//!         engine.tick(clock.tick(), &mut canvas, PointerState::away());
//!     }
//!     canvas.save_png("frame.png")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is plain data: a `base` point on the target shape, the
//! rendered `position`, and per-particle animation state. The
//! [`ParticleStore`] owns a fixed number of them; cycles only respawn them in
//! place.
//!
//! ### The cycle
//!
//! | Phase | Motion |
//! |-------|--------|
//! | [`Phase::Drifting`] | [`KinematicField`] rotation and flow around the [`FocalPoint`] |
//! | [`Phase::Contracting`] | bowed, eased path from the drift position into the focal point |
//! | [`Phase::Expanding`] | bowed, eased path back out to where drifting would be now |
//!
//! Each completed cycle toggles the [`ShapeSlot`] and resamples every base
//! point from the newly active [`Shape`].
//!
//! ### Hosts
//!
//! Anything implementing [`Canvas`] can be drawn on. The crate ships a CPU
//! [`FrameBuffer`] that is presented in a window by [`run_windowed`] or
//! written to PNG files. Both [`Engine`] and the simpler [`FlowCloud`]
//! implement [`Scene`], so hosts can drive either.

pub mod canvas;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod field;
pub mod flow;
mod gpu;
pub mod interaction;
pub mod math;
pub mod particle;
pub mod projection;
pub mod render;
pub mod scene;
mod shader;
pub mod shape;
pub mod spawn;
pub mod time;
pub mod visuals;
mod window;

pub use canvas::{Canvas, Dot, FrameBuffer};
pub use config::EngineConfig;
pub use cycle::{CycleState, CycleTimings, Phase, TickContext, Transition};
pub use engine::Engine;
pub use error::{ConfigError, DisplayError, ExportError};
pub use field::{FocalPoint, KinematicField};
pub use flow::{FlowCloud, FlowConfig};
pub use glam::{Vec2, Vec3};
pub use interaction::{HoverResume, InteractionConfig, OverlayAnchor, PointerState};
pub use particle::{Particle, ParticleStore};
pub use projection::{ProjectedDot, Projection};
pub use scene::{FrameReport, Scene};
pub use shape::{Shape, ShapePair, ShapeSlot};
pub use spawn::SpawnContext;
pub use time::FrameClock;
pub use visuals::{BlendMode, ColorMapping, DotStyle, Palette, VisualConfig};
pub use window::run as run_windowed;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use morph_sphere::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, FrameBuffer};
    pub use crate::config::EngineConfig;
    pub use crate::cycle::{CycleTimings, Phase};
    pub use crate::engine::Engine;
    pub use crate::field::{FocalPoint, KinematicField};
    pub use crate::flow::{FlowCloud, FlowConfig};
    pub use crate::interaction::{HoverResume, InteractionConfig, OverlayAnchor, PointerState};
    pub use crate::scene::{FrameReport, Scene};
    pub use crate::shape::{Shape, ShapeSlot};
    pub use crate::time::FrameClock;
    pub use crate::visuals::{BlendMode, ColorMapping, DotStyle, Palette, VisualConfig};
    pub use crate::{Vec2, Vec3};
}
