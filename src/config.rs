//! Emitter knobs and application config.
//!
//! [`Params`] is the flat block of range-bounded knobs the simulation reads
//! every frame. The control panel and the JSON loader keep every knob inside
//! its declared range; the simulation itself never re-validates.
//!
//! # Example
//!
//! ```ignore
//! let mut params = Params::default();
//! params.friction = 0.7;              // out of range
//! let params = params.clamped();      // friction is now 0.3
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::canvas::Rgba;
use crate::error::ConfigError;

/// Declared range of one numeric knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    /// Knob name, as shown on the control panel.
    pub name: &'static str,
    /// Value used when the knob is missing from a config file.
    pub default: f32,
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
}

impl ParamRange {
    const fn new(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self { name, default, min, max }
    }

    /// Clamp `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Emitter and field parameters, read by the simulation every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Emitter center in surface pixels. Recomputed on resize.
    pub emitter_center: Vec2,
    /// Emitter radius: spawn region and extent of the field forces.
    pub emitter_radius: f32,
    /// Maximum initial speed.
    pub velocity_radius: f32,
    /// Lifetime in seconds, snapshotted by each particle at spawn.
    pub lifetime: f32,
    /// Velocity rotation rate in degrees per second.
    pub rotate: f32,
    /// Attraction (negative) or repulsion (positive) inside the emitter.
    pub force: f32,
    /// Tangential swirl force inside the emitter.
    pub spin: f32,
    /// Per-step velocity decay.
    pub friction: f32,
    /// Trail persistence; fade alpha is `(1 - history) * 255`.
    pub history: f32,
    /// Particles born per second.
    pub birth_rate: f32,
}

impl Params {
    pub const EMITTER_RADIUS: ParamRange = ParamRange::new("eRad", 1000.0, 0.0, 5000.0);
    pub const VELOCITY_RADIUS: ParamRange = ParamRange::new("velRad", 1000.0, 0.0, 5000.0);
    pub const LIFETIME: ParamRange = ParamRange::new("lifeTime", 10.0, 0.0, 100.0);
    pub const ROTATE: ParamRange = ParamRange::new("rotate", 10.0, -360.0, 360.0);
    pub const FORCE: ParamRange = ParamRange::new("force", 10.0, -1000.0, 1000.0);
    pub const SPIN: ParamRange = ParamRange::new("spin", 10.0, -360.0, 360.0);
    pub const FRICTION: ParamRange = ParamRange::new("friction", 0.05, -0.3, 0.3);
    pub const HISTORY: ParamRange = ParamRange::new("history", 0.9, -10.0, 10.0);
    pub const BIRTH_RATE: ParamRange = ParamRange::new("bornRate", 5.0, 0.0, 30.0);

    /// Every numeric knob in panel order.
    pub const RANGES: [ParamRange; 9] = [
        Self::EMITTER_RADIUS,
        Self::VELOCITY_RADIUS,
        Self::LIFETIME,
        Self::ROTATE,
        Self::FORCE,
        Self::SPIN,
        Self::FRICTION,
        Self::HISTORY,
        Self::BIRTH_RATE,
    ];

    /// Default knobs with the emitter at the center of a `width` x `height` surface.
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            emitter_center: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            ..Self::default()
        }
    }

    /// Move the emitter to the center of a `width` x `height` surface.
    pub fn recenter(&mut self, width: u32, height: u32) {
        self.emitter_center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    }

    /// Mutable access to the knobs, paired with their ranges, in panel order.
    pub fn knobs_mut(&mut self) -> [(&ParamRange, &mut f32); 9] {
        [
            (&Self::EMITTER_RADIUS, &mut self.emitter_radius),
            (&Self::VELOCITY_RADIUS, &mut self.velocity_radius),
            (&Self::LIFETIME, &mut self.lifetime),
            (&Self::ROTATE, &mut self.rotate),
            (&Self::FORCE, &mut self.force),
            (&Self::SPIN, &mut self.spin),
            (&Self::FRICTION, &mut self.friction),
            (&Self::HISTORY, &mut self.history),
            (&Self::BIRTH_RATE, &mut self.birth_rate),
        ]
    }

    /// Return a copy with every knob clamped into its declared range.
    pub fn clamped(mut self) -> Self {
        for (range, value) in self.knobs_mut() {
            *value = range.clamp(*value);
        }
        self
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            emitter_center: Vec2::ZERO,
            emitter_radius: Self::EMITTER_RADIUS.default,
            velocity_radius: Self::VELOCITY_RADIUS.default,
            lifetime: Self::LIFETIME.default,
            rotate: Self::ROTATE.default,
            force: Self::FORCE.default,
            spin: Self::SPIN.default,
            friction: Self::FRICTION.default,
            history: Self::HISTORY.default,
            birth_rate: Self::BIRTH_RATE.default,
        }
    }
}

/// How particles and trails are drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Disk radius in pixels at peak size (mid-life).
    pub particle_scale: f32,
    /// Color painted over the buffer every frame to fade old trails.
    pub fade_color: Rgba,
    /// Color the buffer is reset to on clear.
    pub background: Rgba,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            particle_scale: 1.0,
            fade_color: Rgba::WHITE,
            background: Rgba::BLACK,
        }
    }
}

/// Runner config file: knobs, style, window size and optional RNG seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub params: Params,
    pub style: Style,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Fixed seed for reproducible spawning. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params: Params::default(),
            style: Style::default(),
            width: 1024,
            height: 768,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load a config from a JSON file. Knobs are clamped into range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&json)?;
        config.params = config.params.clamped();
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
