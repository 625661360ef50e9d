//! Perspective projection onto the drawing surface.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Simple pinhole projection with the camera looking down +Z.
///
/// A point on the `z = 0` plane projects at scale 1; points further away
/// (`z > 0`) shrink and fade, points closer grow up to full opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Projection strength. Smaller values exaggerate depth. Typical range: 100 - 1000.
    pub focal_length: f32,
    /// Largest perspective scale drawn. Points closer to the camera plane than
    /// `focal_length / max_scale` are culled. Typical range: 4 - 20.
    pub max_scale: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(300.0)
    }
}

/// A particle mapped to surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedDot {
    /// Center in surface pixels.
    pub center: Vec2,
    /// Radius in surface pixels.
    pub radius: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Perspective scale factor.
    pub scale: f32,
}

impl Projection {
    /// Projection with the given focal length and the default near plane.
    pub fn new(focal_length: f32) -> Self {
        Self {
            focal_length,
            max_scale: 10.0,
        }
    }

    /// Perspective scale at depth `z`, or `None` behind the near plane.
    #[inline]
    pub fn scale(&self, z: f32) -> Option<f32> {
        let f = self.focal_length;
        let depth = f + z;
        if !(depth * self.max_scale > f) {
            return None;
        }
        Some(f / depth)
    }

    /// Project a world point onto a `width` x `height` surface.
    pub fn project(&self, position: Vec3, size: f32, width: u32, height: u32) -> Option<ProjectedDot> {
        let scale = self.scale(position.z)?;
        let center = Vec2::new(
            position.x * scale + width as f32 / 2.0,
            position.y * scale + height as f32 / 2.0,
        );

        Some(ProjectedDot {
            center,
            radius: size * scale,
            opacity: scale.min(1.0),
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_plane_has_unit_scale() {
        let proj = Projection::new(200.0);
        let dot = proj.project(Vec3::new(10.0, -20.0, 0.0), 3.0, 800, 600).unwrap();
        assert_eq!(dot.scale, 1.0);
        assert_eq!(dot.center, Vec2::new(410.0, 280.0));
        assert_eq!(dot.radius, 3.0);
        assert_eq!(dot.opacity, 1.0);
    }

    #[test]
    fn test_behind_camera_skipped() {
        let proj = Projection::new(200.0);
        assert!(proj.project(Vec3::new(0.0, 0.0, -200.0), 1.0, 10, 10).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -500.0), 1.0, 10, 10).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -199.9), 1.0, 10, 10).is_none());
    }

    #[test]
    fn test_near_plane_caps_scale() {
        let proj = Projection::new(300.0);
        assert!(proj.project(Vec3::new(0.0, 0.0, -299.99), 2.0, 64, 64).is_none());
        assert!(proj.scale(-270.0).is_none());

        let close = proj.project(Vec3::new(0.0, 0.0, -260.0), 2.0, 64, 64).unwrap();
        assert!(close.scale <= proj.max_scale);
        assert!((close.radius - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_depth_falloff() {
        let proj = Projection::new(200.0);
        let far = proj.project(Vec3::new(0.0, 0.0, 200.0), 4.0, 10, 10).unwrap();
        assert!((far.scale - 0.5).abs() < 1e-6);
        assert!((far.radius - 2.0).abs() < 1e-6);
        assert!((far.opacity - 0.5).abs() < 1e-6);

        let near = proj.project(Vec3::new(0.0, 0.0, -100.0), 4.0, 10, 10).unwrap();
        assert!((near.scale - 2.0).abs() < 1e-6);
        assert_eq!(near.opacity, 1.0);
    }
}
