//! Frame clock.
//!
//! Scenes are driven by a monotonic timestamp in milliseconds. [`FrameClock`]
//! produces one per frame, either from the wall clock (windowed runs) or by
//! stepping a fixed interval (headless export), and keeps frame/FPS counters.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // In your redraw handler:
//! let t_ms = clock.tick();
//! scene.tick(t_ms, &mut canvas, pointer);
//! log::trace!("frame {} at {:.1} fps", clock.frame(), clock.fps());
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
enum Source {
    Wall(Instant),
    Fixed { step_ms: f64 },
}

/// Monotonic millisecond clock with frame counting.
#[derive(Debug)]
pub struct FrameClock {
    source: Source,
    /// Timestamp returned by the last tick.
    now_ms: f64,
    /// Difference between the last two ticks.
    delta_ms: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Timestamp of last FPS calculation.
    fps_update_ms: f64,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// A wall-clock timer starting from now.
    pub fn new() -> Self {
        Self::with_source(Source::Wall(Instant::now()))
    }

    /// A simulated clock that advances exactly `step_ms` per tick.
    ///
    /// The first tick returns `step_ms`.
    pub fn fixed(step_ms: f64) -> Self {
        Self::with_source(Source::Fixed {
            step_ms: step_ms.max(0.0),
        })
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            now_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_ms: 0.0,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance to the next frame and return its timestamp in milliseconds.
    ///
    /// Timestamps never decrease.
    pub fn tick(&mut self) -> f64 {
        let next = match self.source {
            Source::Wall(start) => start.elapsed().as_secs_f64() * 1000.0,
            Source::Fixed { step_ms } => self.now_ms + step_ms,
        };
        let next = next.max(self.now_ms);
        self.delta_ms = next - self.now_ms;
        self.now_ms = next;
        self.frame_count += 1;

        let since = self.now_ms - self.fps_update_ms;
        if since >= self.fps_update_interval.as_secs_f64() * 1000.0 {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = (frames as f64 / (since / 1000.0)) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_ms = self.now_ms;
        }

        self.now_ms
    }

    /// Timestamp of the last tick, in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Time between the last two ticks, in milliseconds.
    #[inline]
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.now_ms(), 0.0);
    }

    #[test]
    fn test_wall_clock_advances() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let t = clock.tick();

        assert!(t >= 10.0);
        assert_eq!(clock.delta_ms(), t);
        assert_eq!(clock.frame(), 1);
        assert!(clock.tick() >= t);
    }

    #[test]
    fn test_fixed_step() {
        let mut clock = FrameClock::fixed(16.0);
        assert_eq!(clock.tick(), 16.0);
        assert_eq!(clock.tick(), 32.0);
        assert_eq!(clock.delta_ms(), 16.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_fps_from_fixed_step() {
        let mut clock = FrameClock::fixed(20.0);
        for _ in 0..50 {
            clock.tick();
        }
        assert!((clock.fps() - 50.0).abs() < 0.5, "fps {}", clock.fps());
    }
}
