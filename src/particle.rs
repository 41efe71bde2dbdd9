//! A single emitted particle: spawn, integration step and draw rule.
//!
//! Physics and visuals read the same clock (`age` against `lifetime`) but
//! stay independent: [`Particle::update`] never looks at size or hue, and
//! [`Particle::render`] never touches position or velocity.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::canvas::{Canvas, Rgba};
use crate::config::{Params, Style};

/// Hue at birth, on a `0..=255` hue circle.
const HUE_BIRTH: f32 = 10.0;
/// Hue at death, on a `0..=255` hue circle.
const HUE_DEATH: f32 = 255.0;

/// One simulated point mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub alive: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds since spawn.
    pub age: f32,
    /// Lifetime snapshotted from [`Params::lifetime`] at spawn.
    pub lifetime: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            alive: false,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            age: 0.0,
            lifetime: 0.0,
        }
    }
}

/// Random point in a disk of `max_radius` around the origin.
///
/// Radius and angle are drawn independently and uniformly, so points
/// cluster towards the center relative to an area-uniform sample.
pub fn random_point_in_disk<R: Rng + ?Sized>(rng: &mut R, max_radius: f32) -> Vec2 {
    let radius = max_radius * rng.gen::<f32>();
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos() * radius, angle.sin() * radius)
}

/// Rotate `v` counter-clockwise by `degrees`. Length is preserved.
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

impl Particle {
    /// Start a new particle inside the emitter.
    pub fn spawn<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        Self {
            alive: true,
            position: params.emitter_center + random_point_in_disk(rng, params.emitter_radius),
            velocity: random_point_in_disk(rng, params.velocity_radius),
            age: 0.0,
            lifetime: params.lifetime,
        }
    }

    /// Field acceleration at `position`: radial force plus swirl.
    ///
    /// Zero outside the emitter disk and at its exact center.
    pub fn field_acceleration(position: Vec2, params: &Params) -> Vec2 {
        let delta = position - params.emitter_center;
        let len = delta.length();
        if len <= 0.0 || len > params.emitter_radius {
            return Vec2::ZERO;
        }

        let dir = delta / len;
        dir * params.force + dir.perp() * params.spin
    }

    /// Advance one explicit Euler step of `dt` seconds.
    pub fn update(&mut self, dt: f32, params: &Params) {
        if !self.alive {
            return;
        }

        self.velocity = rotate_degrees(self.velocity, params.rotate * dt);

        let acc = Self::field_acceleration(self.position, params);
        self.velocity += acc * dt;
        self.velocity *= 1.0 - params.friction;

        self.position += self.velocity * dt;

        self.age += dt;
        if self.age >= self.lifetime {
            self.alive = false;
        }
    }

    /// Size envelope in `0.0..=1.0`: 0 at birth, 1 at mid-life, 0 at death.
    pub fn size(&self) -> f32 {
        let half = self.lifetime / 2.0;
        if half <= 0.0 {
            return 0.0;
        }
        (1.0 - (self.age - half).abs() / half).max(0.0)
    }

    /// Hue in `0.0..=1.0`, sweeping linearly from birth to death.
    pub fn hue(&self) -> f32 {
        let t = if self.lifetime > 0.0 { self.age / self.lifetime } else { 1.0 };
        (HUE_BIRTH + (HUE_DEATH - HUE_BIRTH) * t) / 255.0
    }

    /// Current draw color: the hue at full saturation and brightness.
    pub fn color(&self) -> Rgba {
        Rgba::from_hsv(self.hue(), 1.0, 1.0)
    }

    /// Draw the particle as a filled disk.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &Style) {
        if !self.alive {
            return;
        }

        let radius = self.size() * style.particle_scale;
        if radius > 0.0 {
            canvas.fill_disk(self.position, radius, self.color());
        }
    }
}
