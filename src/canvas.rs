//! Drawing surfaces.
//!
//! [`Canvas`] is the only thing the engine needs from its host: a size that
//! may change between frames, a way to clear, and a way to paint one dot.
//! [`FrameBuffer`] is the built-in CPU raster used by both the window
//! presenter and headless PNG export.

use crate::error::ExportError;
use crate::visuals::{BlendMode, DotStyle};
use glam::{Vec2, Vec3};
use std::path::Path;

/// A 2D drawing surface.
pub trait Canvas {
    /// Current size in pixels. Read every frame; `(0, 0)` means "not ready".
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`, discarding the previous frame.
    fn clear(&mut self, color: Vec3);

    /// Paint one dot of `radius` pixels at `center`.
    fn fill_dot(&mut self, dot: Dot);

    /// Whether there is anything to draw on.
    fn is_ready(&self) -> bool {
        let (w, h) = self.size();
        w > 0 && h > 0
    }
}

/// One dot to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Vec3,
    pub opacity: f32,
    pub style: DotStyle,
    pub blend: BlendMode,
}

/// RGBA8 raster, row-major, top-left origin.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl FrameBuffer {
    /// A black, fully opaque buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = vec![[0, 0, 0, 255]; width as usize * height as usize];
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Change dimensions. Contents are discarded when the size changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// RGBA at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Write the buffer to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        image::save_buffer_with_format(
            path,
            self.pixels(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }

    fn blend(&mut self, x: u32, y: u32, color: Vec3, alpha: f32, mode: BlendMode) {
        let i = self.index(x, y);
        let px = &mut self.pixels[i];
        for c in 0..3 {
            let dst = px[c] as f32 / 255.0;
            let out = match mode {
                BlendMode::Alpha => dst * (1.0 - alpha) + color[c] * alpha,
                BlendMode::Additive => dst + color[c] * alpha,
            };
            px[c] = to_byte(out);
        }
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Vec3) {
        let rgba = [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255];
        self.pixels.fill(rgba);
    }

    fn fill_dot(&mut self, dot: Dot) {
        if dot.radius <= 0.0 || dot.opacity <= 0.0 || !self.is_ready() {
            return;
        }
        let min_x = (dot.center.x - dot.radius).floor().max(0.0);
        let min_y = (dot.center.y - dot.radius).floor().max(0.0);
        let max_x = (dot.center.x + dot.radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (dot.center.y + dot.radius).ceil().min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(dot.center);
                if d > dot.radius {
                    continue;
                }
                let alpha = match dot.style {
                    DotStyle::Soft => dot.opacity * (1.0 - d / dot.radius),
                    DotStyle::Solid => dot.opacity,
                };
                self.blend(x, y, dot.color, alpha, dot.blend);
            }
        }
    }
}
