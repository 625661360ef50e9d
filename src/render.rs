//! Painting particles onto a [`Canvas`].

use crate::canvas::{Canvas, Dot};
use crate::particle::Particle;
use crate::projection::Projection;
use crate::visuals::VisualConfig;

/// Clear `canvas` and draw every particle in front of the camera.
///
/// Returns how many dots were painted. A zero-sized canvas paints nothing.
pub fn paint(
    particles: &[Particle],
    projection: &Projection,
    visuals: &VisualConfig,
    canvas: &mut dyn Canvas,
) -> usize {
    if !canvas.is_ready() {
        return 0;
    }
    let (width, height) = canvas.size();
    canvas.clear(visuals.background_color);

    let count = particles.len();
    let mut drawn = 0;
    for (i, p) in particles.iter().enumerate() {
        let Some(projected) = projection.project(p.position, p.size, width, height) else {
            continue;
        };
        canvas.fill_dot(Dot {
            center: projected.center,
            radius: projected.radius,
            color: visuals.color_for(i, count, p.position.z),
            opacity: projected.opacity,
            style: visuals.dot_style,
            blend: visuals.blend_mode,
        });
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FrameBuffer;
    use glam::Vec3;

    fn at(position: Vec3) -> Particle {
        Particle::new(position, 2.0, Vec3::ZERO, 0.0)
    }

    #[test]
    fn test_skips_particles_behind_camera() {
        let particles = [at(Vec3::ZERO), at(Vec3::new(0.0, 0.0, -400.0)), at(Vec3::new(5.0, 5.0, 100.0))];
        let mut fb = FrameBuffer::new(64, 64);
        let drawn = paint(&particles, &Projection::new(300.0), &VisualConfig::default(), &mut fb);
        assert_eq!(drawn, 2);
    }

    #[test]
    fn test_particle_at_camera_plane_is_not_drawn() {
        let visuals = VisualConfig::default();
        let mut fb = FrameBuffer::new(64, 64);
        let drawn = paint(&[at(Vec3::new(0.0, 0.0, -299.99))], &Projection::new(300.0), &visuals, &mut fb);
        assert_eq!(drawn, 0);
        assert_eq!(fb.pixel(0, 0), fb.pixel(32, 32));
    }

    #[test]
    fn test_zero_sized_canvas_draws_nothing() {
        let particles = [at(Vec3::ZERO)];
        let mut fb = FrameBuffer::new(0, 0);
        assert_eq!(paint(&particles, &Projection::default(), &VisualConfig::default(), &mut fb), 0);
    }

    #[test]
    fn test_clears_previous_frame() {
        let visuals = VisualConfig::default();
        let mut fb = FrameBuffer::new(32, 32);
        paint(&[at(Vec3::ZERO)], &Projection::default(), &visuals, &mut fb);
        assert_ne!(fb.pixel(16, 16), fb.pixel(0, 0));

        paint(&[], &Projection::default(), &visuals, &mut fb);
        assert_eq!(fb.pixel(16, 16), fb.pixel(0, 0));
    }
}
