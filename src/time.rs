//! Monotonic frame clock.
//!
//! Read once at the top of every frame. The raw delta is handed to
//! [`Population::tick`](crate::Population::tick), which clamps it, so a long
//! stall never turns into one giant integration step.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // In the frame callback:
//! let dt = clock.tick();
//! population.tick(dt, &params);
//! ```

use std::time::{Duration, Instant};

/// Frame timing: delta, frame count, FPS and pause state.
#[derive(Debug)]
pub struct FrameClock {
    /// Instant of the previous tick.
    last_frame: Instant,
    /// Ticks since creation, paused ticks excluded.
    frame_count: u64,
    /// Frames per second, refreshed every `fps_interval`.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_interval: Duration,
    paused: bool,
}

impl FrameClock {
    /// Start a clock at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_interval: Duration::from_millis(500),
            paused: false,
        }
    }

    /// Advance to now and return the elapsed seconds since the last tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`. Instants earlier than the last tick count as zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if self.paused {
            self.last_frame = now;
            return 0.0;
        }

        let delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume time. Paused ticks report a zero delta, and the
    /// first tick after resuming measures from the last paused tick.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
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

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_tick_at() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        let dt = clock.tick_at(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_backwards_instant_is_zero() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        clock.tick_at(start + Duration::from_secs(1));
        assert_eq!(clock.tick_at(start), 0.0);
    }

    #[test]
    fn test_pause() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        clock.toggle_pause();
        assert!(clock.is_paused());
        assert_eq!(clock.tick_at(start + Duration::from_secs(3)), 0.0);
        assert_eq!(clock.frame(), 0);

        clock.toggle_pause();
        let dt = clock.tick_at(start + Duration::from_millis(3100));
        assert!((dt - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_fps() {
        let mut clock = FrameClock::new();
        let start = clock.last_frame;
        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        assert!((clock.fps() - 50.0).abs() < 1.0);
    }
}
