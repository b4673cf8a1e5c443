//! Cosmetic particles: engine exhaust and explosions
//!
//! Particles never affect gameplay. They drift, slow down and disappear
//! once their age reaches their lifetime.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Drawable, Sprite};
use crate::consts::*;
use crate::polar_to_cartesian;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// ms lived so far
    pub age: f32,
    /// ms until removal
    pub lifetime: f32,
}

impl Particle {
    /// Particle at `pos` heading along `angle` at `speed` (units per nominal frame)
    pub fn new(pos: Vec2, angle: f32, speed: f32, color: u32, lifetime: f32, size: f32) -> Self {
        Self {
            pos,
            vel: polar_to_cartesian(speed, angle),
            color,
            size,
            age: 0.0,
            lifetime,
        }
    }

    /// Advance by `dt_ms`. Damping is applied once per call regardless of `dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) {
        self.pos += self.vel * (dt_ms / NOMINAL_FRAME_MS);
        self.age += dt_ms;
        self.vel *= PARTICLE_DAMPING;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Linear fade from 1 at birth to 0 at end of life
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

impl Drawable for Particle {
    fn sprite(&self, _now_ms: f64) -> Sprite {
        Sprite::Particle {
            pos: self.pos,
            size: self.size,
            color: self.color,
            alpha: self.alpha(),
        }
    }
}

/// Advance every particle and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>, dt_ms: f32) {
    for particle in particles.iter_mut() {
        particle.advance(dt_ms);
    }
    particles.retain(|p| !p.is_dead());
}

/// Burst of debris where the ship blew up
pub fn explosion(pos: Vec2, rng: &mut impl Rng) -> Vec<Particle> {
    (0..EXPLOSION_PARTICLES)
        .map(|_| {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let color = if rng.random_bool(0.5) { SHIP_COLOR } else { THRUST_COLOR };
            let speed = rng.random_range(2.0..7.0);
            let lifetime = rng.random_range(500.0..1000.0);
            Particle::new(pos, angle, speed, color, lifetime, PARTICLE_DEFAULT_SIZE)
        })
        .collect()
}
