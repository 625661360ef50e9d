//! Engine configuration.
//!
//! Every tunable lives in [`EngineConfig`]. It can be built in code with the
//! `with_*` setters or loaded from JSON; missing keys take their defaults.
//!
//! ```ignore
//! let config = EngineConfig::from_json_file("morph.json")?
//!     .with_particle_count(2000)
//!     .with_seed(7);
//! let engine = Engine::new(config)?;
//! ```

use crate::cycle::CycleTimings;
use crate::error::ConfigError;
use crate::field::{FocalPoint, KinematicField};
use crate::interaction::InteractionConfig;
use crate::projection::Projection;
use crate::shape::{Shape, ShapePair};
use crate::visuals::VisualConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the morphing-sphere engine can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of particles. Typical range: 100 - 5000.
    pub particle_count: u32,
    /// Target shape radius in world units. Typical range: 100 - 400.
    pub radius: f32,
    /// Fractional radius jitter applied when sampling the sphere.
    pub radius_jitter: f32,
    /// Smallest dot radius in pixels at scale 1.
    pub size_min: f32,
    /// Largest dot radius in pixels at scale 1.
    pub size_max: f32,
    pub timings: CycleTimings,
    pub field: KinematicField,
    pub focal: FocalPoint,
    pub interaction: InteractionConfig,
    pub projection: Projection,
    pub visuals: VisualConfig,
    pub shapes: ShapePair,
    /// Fixed random seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 1500,
            radius: 200.0,
            radius_jitter: 0.04,
            size_min: 1.0,
            size_max: 3.0,
            timings: CycleTimings::default(),
            field: KinematicField::default(),
            focal: FocalPoint::default(),
            interaction: InteractionConfig::default(),
            projection: Projection::default(),
            visuals: VisualConfig::default(),
            shapes: ShapePair::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Same as [`EngineConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot animate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.particle_count == 0 {
            return invalid("particle_count", "must be at least 1");
        }
        if !(self.radius > 0.0) {
            return invalid("radius", "must be positive");
        }
        if !(self.radius_jitter >= 0.0) {
            return invalid("radius_jitter", "must not be negative");
        }
        if !(self.size_min > 0.0) || !(self.size_max >= self.size_min) {
            return invalid("size_min", "sizes must be positive with size_min <= size_max");
        }
        if !(self.timings.trigger_interval_ms > 0.0) {
            return invalid("timings.trigger_interval_ms", "must be positive");
        }
        if !(self.timings.contraction_ms > 0.0) {
            return invalid("timings.contraction_ms", "must be positive");
        }
        if !(self.timings.expansion_ms > 0.0) {
            return invalid("timings.expansion_ms", "must be positive");
        }
        if !(self.projection.focal_length > 0.0) {
            return invalid("projection.focal_length", "must be positive");
        }
        if !(self.projection.max_scale > 1.0) {
            return invalid("projection.max_scale", "must be greater than 1");
        }
        let rate = self.interaction.approach_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return invalid("interaction.approach_rate", "must be in (0, 1]");
        }
        if !(self.interaction.radius > 0.0) {
            return invalid("interaction.radius", "must be positive");
        }
        Ok(())
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the target shape radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the dot size range in pixels.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.size_min = min;
        self.size_max = max;
        self
    }

    /// Set the cycle durations.
    pub fn with_timings(mut self, timings: CycleTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the drift rule.
    pub fn with_field(mut self, field: KinematicField) -> Self {
        self.field = field;
        self
    }

    /// Set the focal point oscillation.
    pub fn with_focal(mut self, focal: FocalPoint) -> Self {
        self.focal = focal;
        self
    }

    /// Set the hover swirl tunables.
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    /// Set the projection focal length.
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.projection = Projection::new(focal_length);
        self
    }

    /// Set the rendering options.
    pub fn with_visuals<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut VisualConfig),
    {
        configure(&mut self.visuals);
        self
    }

    /// Set the primary and alternate morph targets.
    pub fn with_shapes(mut self, primary: Shape, alternate: Option<Shape>) -> Self {
        self.shapes = ShapePair { primary, alternate };
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
