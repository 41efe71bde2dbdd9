//! The live particle collection and its per-frame tick.
//!
//! Births are driven by a fractional accumulator: each tick adds
//! `dt * birth_rate` and spawns the whole part, carrying the remainder into
//! the next frame. The long-run spawn rate therefore matches `birth_rate`
//! whatever the frame rate.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::config::{Params, Style};
use crate::particle::Particle;

/// Upper bound on the simulation step, in seconds.
///
/// A stall (window drag, debugger pause) otherwise produces one huge Euler
/// step that flings every particle out of the emitter.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Largest value the birth accumulator can be set to from outside.
pub const MAX_BIRTH_ACCUMULATOR: f32 = 3000.0;

/// What one [`Population::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Clamped step actually applied.
    pub dt: f32,
    /// Dead particles removed.
    pub reaped: usize,
    /// Particles born this tick.
    pub spawned: usize,
    /// Particles alive after the update.
    pub live: usize,
}

/// Emitter state: the particles plus the carried birth remainder.
pub struct Population {
    particles: Vec<Particle>,
    birth_accumulator: f32,
    rng: SmallRng,
}

impl Population {
    /// Empty population seeded from the clock.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Empty population with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            birth_accumulator: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of particles held, including ones that died this frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Number of particles still alive.
    pub fn live(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Pending births carried into the next tick. Below 1 after every tick.
    #[inline]
    pub fn birth_accumulator(&self) -> f32 {
        self.birth_accumulator
    }

    /// Overwrite the pending births, clamped to `0..=MAX_BIRTH_ACCUMULATOR`.
    ///
    /// The whole part is spawned on the next tick.
    pub fn set_birth_accumulator(&mut self, value: f32) {
        self.birth_accumulator = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, MAX_BIRTH_ACCUMULATOR)
        };
    }

    /// Add an already built particle.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every particle and the birth remainder.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.birth_accumulator = 0.0;
    }

    /// Remove every dead particle. Returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| p.alive);
        before - self.particles.len()
    }

    /// Accumulate `dt * birth_rate` births and spawn the whole part.
    ///
    /// Returns the number of particles spawned.
    pub fn spawn_for(&mut self, dt: f32, params: &Params) -> usize {
        self.birth_accumulator += dt * params.birth_rate;
        if self.birth_accumulator < 1.0 {
            return 0;
        }

        let count = self.birth_accumulator.floor();
        self.birth_accumulator -= count;
        let count = count as usize;

        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(params, &mut self.rng);
            self.particles.push(particle);
        }
        count
    }

    /// Step every particle by `dt`.
    pub fn update(&mut self, dt: f32, params: &Params) {
        for particle in &mut self.particles {
            particle.update(dt, params);
        }
    }

    /// Run one frame: clamp, reap, spawn, update.
    ///
    /// Particles born in this tick receive this tick's update too.
    pub fn tick(&mut self, real_dt: f32, params: &Params) -> TickReport {
        let dt = if real_dt.is_nan() { 0.0 } else { real_dt.clamp(0.0, MAX_FRAME_DT) };

        let reaped = self.reap();
        let spawned = self.spawn_for(dt, params);
        self.update(dt, params);

        let report = TickReport {
            dt,
            reaped,
            spawned,
            live: self.live(),
        };
        tracing::trace!(?report, "tick");
        report
    }

    /// Draw every live particle.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &Style) {
        for particle in &self.particles {
            particle.render(canvas, style);
        }
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}
