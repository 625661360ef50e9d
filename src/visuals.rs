//! Visual configuration for particle rendering.
//!
//! These options control how particles appear, separate from the cycle that
//! controls how they move.
//!
//! # Usage
//!
//! ```ignore
//! let mut visuals = VisualConfig::new();
//! visuals
//!     .blend_mode(BlendMode::Additive)
//!     .palette(Palette::Ocean, ColorMapping::Depth { near: -200.0, far: 200.0 })
//!     .background(Vec3::new(0.0, 0.0, 0.02));
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Pre-defined color palettes for particle rendering.
///
/// Sampled according to a [`ColorMapping`]; with [`Palette::None`] every
/// particle uses [`VisualConfig::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// No palette - use the flat particle color (default).
    #[default]
    None,

    /// Viridis - perceptually uniform, colorblind-friendly (purple to yellow).
    Viridis,

    /// Magma - perceptually uniform (black to yellow through red).
    Magma,

    /// Ocean - cool blues and teals.
    Ocean,

    /// Ice - white through light blue to deep blue.
    Ice,

    /// Neon - vibrant cyberpunk colors (pink, cyan, purple).
    Neon,

    /// Grayscale - black to white.
    Grayscale,
}

impl Palette {
    /// Get the color stops for this palette (5 colors).
    pub fn colors(&self) -> [Vec3; 5] {
        match self {
            Palette::None => [Vec3::ONE; 5],
            Palette::Viridis => [
                Vec3::new(0.267, 0.004, 0.329), // Dark purple
                Vec3::new(0.282, 0.140, 0.458), // Purple
                Vec3::new(0.127, 0.566, 0.551), // Teal
                Vec3::new(0.369, 0.789, 0.383), // Green
                Vec3::new(0.993, 0.906, 0.144), // Yellow
            ],
            Palette::Magma => [
                Vec3::new(0.001, 0.0, 0.014),   // Black
                Vec3::new(0.329, 0.071, 0.435), // Purple
                Vec3::new(0.716, 0.215, 0.475), // Pink
                Vec3::new(0.994, 0.541, 0.380), // Orange
                Vec3::new(0.987, 0.991, 0.749), // Light yellow
            ],
            Palette::Ocean => [
                Vec3::new(0.0, 0.05, 0.15), // Deep blue
                Vec3::new(0.0, 0.2, 0.4),   // Dark blue
                Vec3::new(0.0, 0.4, 0.6),   // Blue
                Vec3::new(0.2, 0.6, 0.8),   // Light blue
                Vec3::new(0.6, 0.9, 1.0),   // Cyan
            ],
            Palette::Ice => [
                Vec3::new(1.0, 1.0, 1.0), // White
                Vec3::new(0.8, 0.9, 1.0), // Light blue
                Vec3::new(0.4, 0.7, 1.0), // Blue
                Vec3::new(0.1, 0.4, 0.8), // Medium blue
                Vec3::new(0.0, 0.1, 0.4), // Dark blue
            ],
            Palette::Neon => [
                Vec3::new(1.0, 0.0, 0.5), // Pink
                Vec3::new(0.5, 0.0, 1.0), // Purple
                Vec3::new(0.0, 0.5, 1.0), // Blue
                Vec3::new(0.0, 1.0, 1.0), // Cyan
                Vec3::new(0.5, 1.0, 0.5), // Green
            ],
            Palette::Grayscale => [
                Vec3::new(0.0, 0.0, 0.0), // Black
                Vec3::new(0.25, 0.25, 0.25),
                Vec3::new(0.5, 0.5, 0.5),
                Vec3::new(0.75, 0.75, 0.75),
                Vec3::new(1.0, 1.0, 1.0), // White
            ],
        }
    }

    /// Interpolate the palette at `t` in `[0, 1]`.
    pub fn sample(&self, t: f32) -> Vec3 {
        let stops = self.colors();
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(stops[i + 1], scaled - i as f32)
    }
}

/// How to map particle properties to palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum ColorMapping {
    /// Flat color for every particle (default).
    #[default]
    None,

    /// Map depth to color (near = palette start, far = palette end).
    Depth {
        /// Z mapped to the palette start.
        near: f32,
        /// Z mapped to the palette end.
        far: f32,
    },

    /// Map particle index to color (creates bands through the cloud).
    Index,
}

/// How dots combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Standard source-over alpha blending (default).
    #[default]
    Alpha,

    /// Additive blending. Overlapping dots glow brighter.
    Additive,
}

/// Dot appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotStyle {
    /// Radial gradient from full opacity at the center to zero at the edge (default).
    #[default]
    Soft,

    /// Hard-edged disc.
    Solid,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub blend_mode: BlendMode,
    pub dot_style: DotStyle,
    pub palette: Palette,
    pub color_mapping: ColorMapping,
    /// Flat dot color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Background clear color (RGB, 0.0-1.0).
    pub background_color: Vec3,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            blend_mode: BlendMode::Alpha,
            dot_style: DotStyle::Soft,
            palette: Palette::None,
            color_mapping: ColorMapping::None,
            color: Vec3::new(0.75, 0.85, 1.0),
            background_color: Vec3::new(0.02, 0.02, 0.05), // Dark blue-black
        }
    }
}

impl VisualConfig {
    /// Create a new visual config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blend mode.
    pub fn blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.blend_mode = mode;
        self
    }

    /// Set the dot style.
    pub fn dot_style(&mut self, style: DotStyle) -> &mut Self {
        self.dot_style = style;
        self
    }

    /// Set a color palette and how particles map onto it.
    pub fn palette(&mut self, palette: Palette, mapping: ColorMapping) -> &mut Self {
        self.palette = palette;
        self.color_mapping = mapping;
        self
    }

    /// Set the flat dot color.
    pub fn color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    /// Set the background clear color.
    pub fn background(&mut self, color: Vec3) -> &mut Self {
        self.background_color = color;
        self
    }

    /// Color for particle `index` of `count` sitting at depth `z`.
    pub fn color_for(&self, index: usize, count: usize, z: f32) -> Vec3 {
        if self.palette == Palette::None {
            return self.color;
        }
        match self.color_mapping {
            ColorMapping::None => self.color,
            ColorMapping::Depth { near, far } => {
                let span = far - near;
                let t = if span.abs() > f32::EPSILON { (z - near) / span } else { 0.0 };
                self.palette.sample(t)
            }
            ColorMapping::Index => self.palette.sample(index as f32 / count.max(1) as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sample_endpoints() {
        let stops = Palette::Viridis.colors();
        assert_eq!(Palette::Viridis.sample(0.0), stops[0]);
        assert!((Palette::Viridis.sample(1.0) - stops[4]).length() < 1e-6);
        assert!((Palette::Viridis.sample(0.5) - stops[2]).length() < 1e-6);
        assert_eq!(Palette::Viridis.sample(-3.0), stops[0]);
    }

    #[test]
    fn test_flat_color_without_palette() {
        let v = VisualConfig::default();
        assert_eq!(v.color_for(3, 10, 500.0), v.color);
    }

    #[test]
    fn test_depth_mapping() {
        let mut v = VisualConfig::new();
        v.palette(Palette::Grayscale, ColorMapping::Depth { near: -100.0, far: 100.0 });
        assert!((v.color_for(0, 1, -100.0) - Vec3::ZERO).length() < 1e-6);
        assert!((v.color_for(0, 1, 100.0) - Vec3::ONE).length() < 1e-6);
        assert!((v.color_for(0, 1, 0.0) - Vec3::splat(0.5)).length() < 1e-6);
    }
}
