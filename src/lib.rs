//! # swirlfx - interactive 2D particle emitter
//!
//! Particles are born inside a disk around the emitter center, pushed by a
//! radial and tangential force field, slowed by friction and drawn as
//! color-by-age disks into a persistent trail buffer that fades a little
//! every frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swirlfx::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = AppConfig {
//!         params: Params { spin: 90.0, history: 0.95, ..Params::default() },
//!         ..AppConfig::default()
//!     };
//!     swirlfx::run(config)
//! }
//! ```
//!
//! ## Headless use
//!
//! Everything except [`run`] works without a window. [`Simulation`] owns the
//! knobs, the particles and the trail buffer:
//!
//! ```ignore
//! let mut sim = Simulation::new(AppConfig { seed: Some(7), ..AppConfig::default() });
//! for _ in 0..120 {
//!     sim.frame(1.0 / 60.0);
//! }
//! sim.buffer().save_png("swirl.png")?;
//! ```
//!
//! ## Knobs
//!
//! | Name       | Default | Range          |
//! |------------|---------|----------------|
//! | `eRad`     | 1000    | 0 .. 5000      |
//! | `velRad`   | 1000    | 0 .. 5000      |
//! | `lifeTime` | 10      | 0 .. 100       |
//! | `rotate`   | 10      | -360 .. 360    |
//! | `force`    | 10      | -1000 .. 1000  |
//! | `spin`     | 10      | -360 .. 360    |
//! | `friction` | 0.05    | -0.3 .. 0.3    |
//! | `history`  | 0.9     | -10 .. 10      |
//! | `bornRate` | 5       | 0 .. 30        |
//!
//! See [`Params`] for what each one does.

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod error;
mod gpu;
pub mod input;
#[cfg(feature = "egui")]
pub mod panel;
pub mod particle;
pub mod population;
pub mod simulation;
pub mod time;
mod window;

pub use canvas::{Canvas, FrameBuffer, Rect, Rgba};
pub use compositor::{fade_alpha, Compositor};
pub use config::{AppConfig, ParamRange, Params, Style};
pub use error::{AppError, ConfigError, GpuError, SnapshotError};
pub use glam::Vec2;
pub use particle::Particle;
pub use population::{Population, TickReport, MAX_BIRTH_ACCUMULATOR, MAX_FRAME_DT};
pub use simulation::Simulation;
pub use time::FrameClock;
pub use window::run;

/// Convenience re-exports.
///
/// ```ignore
/// use swirlfx::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, FrameBuffer, Rgba};
    pub use crate::compositor::Compositor;
    pub use crate::config::{AppConfig, Params, Style};
    pub use crate::error::AppError;
    pub use crate::input::Command;
    pub use crate::particle::Particle;
    pub use crate::population::{Population, TickReport};
    pub use crate::simulation::Simulation;
    pub use crate::time::FrameClock;
    pub use crate::Vec2;
    #[cfg(feature = "egui")]
    pub use egui;
}
