//! One emitter session: knobs, particles and trail buffer, advanced frame by frame.
//!
//! [`Simulation`] is the headless core the window drives. Each
//! [`Simulation::frame`] reads the current knobs, ticks the population and
//! composites the result into the trail buffer. Nothing here touches the GPU
//! or the window, so it can run in tests and benchmarks.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = Simulation::new(AppConfig::default());
//! for _ in 0..60 {
//!     sim.frame(1.0 / 60.0);
//! }
//! sim.buffer().save_png("trails.png")?;
//! ```

use std::path::PathBuf;

use crate::canvas::FrameBuffer;
use crate::compositor::Compositor;
use crate::config::{AppConfig, Params, Style};
use crate::error::SnapshotError;
use crate::population::{Population, TickReport};

/// Knobs, particles and trail buffer of one session.
pub struct Simulation {
    params: Params,
    population: Population,
    compositor: Compositor,
    frames: u64,
}

impl Simulation {
    /// Start a session at the config's window size with the emitter centered.
    pub fn new(config: AppConfig) -> Self {
        let AppConfig { params, style, width, height, seed } = config;

        let mut params = params.clamped();
        params.recenter(width, height);

        let population = match seed {
            Some(seed) => Population::with_seed(seed),
            None => Population::new(),
        };

        Self {
            params,
            population,
            compositor: Compositor::new(width, height, style),
            frames: 0,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Knobs and style together, for the control panel.
    pub fn controls_mut(&mut self) -> (&mut Params, &mut Style) {
        (&mut self.params, self.compositor.style_mut())
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Overwrite the pending births; the whole part spawns next frame.
    pub fn set_birth_accumulator(&mut self, value: f32) {
        self.population.set_birth_accumulator(value);
    }

    /// The trail buffer as last presented.
    pub fn buffer(&self) -> &FrameBuffer {
        self.compositor.buffer()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame: tick the population by `real_dt`, then fade and draw.
    pub fn frame(&mut self, real_dt: f32) -> TickReport {
        let report = self.population.tick(real_dt, &self.params);
        self.compositor.present(&self.population, &self.params);
        self.frames += 1;
        report
    }

    /// Wipe the trail buffer. Particles keep flying.
    pub fn clear_screen(&mut self) {
        self.compositor.clear();
    }

    /// Remove every particle and wipe the trail buffer.
    pub fn reset(&mut self) {
        self.population.clear();
        self.compositor.clear();
        tracing::info!("simulation reset");
    }

    /// Follow a viewport resize: recenter the emitter and reallocate the buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.params.recenter(width, height);
        self.compositor.resize(width, height);
        tracing::debug!(width, height, "viewport resized");
    }

    /// Save the trail buffer as `swirlfx-<frame>.png` in the working directory.
    pub fn snapshot(&self) -> Result<PathBuf, SnapshotError> {
        let path = PathBuf::from(format!("swirlfx-{:06}.png", self.frames));
        self.buffer().save_png(&path)?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Rgba;
    use glam::Vec2;

    fn small_config() -> AppConfig {
        AppConfig {
            params: Params {
                emitter_radius: 20.0,
                velocity_radius: 10.0,
                lifetime: 1.0,
                birth_rate: 30.0,
                ..Params::default()
            },
            style: Style { particle_scale: 2.0, ..Style::default() },
            width: 64,
            height: 48,
            seed: Some(11),
        }
    }

    #[test]
    fn test_new_centers_emitter() {
        let sim = Simulation::new(small_config());
        assert_eq!(sim.params().emitter_center, Vec2::new(32.0, 24.0));
        assert_eq!(sim.buffer().width(), 64);
        assert!(sim.population().is_empty());
    }

    #[test]
    fn test_new_clamps_params() {
        let mut config = small_config();
        config.params.friction = 2.0;
        let sim = Simulation::new(config);
        assert_eq!(sim.params().friction, 0.3);
    }

    #[test]
    fn test_frames_spawn_and_draw() {
        let mut sim = Simulation::new(small_config());
        let mut spawned = 0;
        for _ in 0..30 {
            spawned += sim.frame(1.0 / 30.0).spawned;
        }
        assert!(spawned >= 29 && spawned <= 30, "spawned {spawned}");
        assert_eq!(sim.frames(), 30);
        assert!(sim.buffer().pixels().iter().any(|p| *p != Rgba::BLACK));
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulation::new(small_config());
        for _ in 0..10 {
            sim.frame(0.05);
        }
        sim.reset();
        assert!(sim.population().is_empty());
        assert!(sim.buffer().pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn test_pending_births_spawn_next_frame() {
        let mut config = small_config();
        config.params.birth_rate = 0.0;
        let mut sim = Simulation::new(config);

        sim.set_birth_accumulator(40.0);
        let report = sim.frame(0.05);
        assert_eq!(report.spawned, 40);
        assert_eq!(report.live, sim.population().live());
    }

    #[test]
    fn test_resize_recenters() {
        let mut sim = Simulation::new(small_config());
        sim.resize(200, 100);
        assert_eq!(sim.params().emitter_center, Vec2::new(100.0, 50.0));
        assert_eq!(sim.buffer().width(), 200);
        assert_eq!(sim.buffer().height(), 100);
    }
}
