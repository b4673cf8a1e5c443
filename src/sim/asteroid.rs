//! Drifting asteroids
//!
//! Asteroids are never destroyed: once spawned they wrap around the world
//! for the rest of the run, so the population only grows. Spawning slows
//! down to a floor but never stops, which makes long runs progressively
//! more crowded. This may well be an oversight in the game design; it is
//! kept as-is.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Drawable, Sprite, UpdateContext, Updatable, WorldBounds};
use crate::consts::*;
use crate::polar_to_cartesian;

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Units per nominal frame
    pub vel: Vec2,
    /// Nominal radius
    pub size: f32,
    /// Rotation (radians)
    pub angle: f32,
    /// Radians per ms
    pub spin: f32,
    /// Outline polygon relative to `pos`, generated once
    pub outline: Vec<Vec2>,
    pub color: u32,
}

impl Asteroid {
    /// Build an asteroid of the given radius.
    ///
    /// Without an explicit `pos` the asteroid is placed uniformly at random,
    /// rerolling while it lands within `ASTEROID_SPAWN_CLEARANCE` of `ship`.
    /// Without `vel` it gets a slow random drift. Radii below
    /// `ASTEROID_MIN_RADIUS` (including negative or NaN) are raised to it.
    pub fn new(
        radius: f32,
        pos: Option<Vec2>,
        vel: Option<Vec2>,
        ship: Option<Vec2>,
        bounds: WorldBounds,
        rng: &mut impl Rng,
    ) -> Self {
        let size = if radius >= ASTEROID_MIN_RADIUS { radius } else { ASTEROID_MIN_RADIUS };
        let pos = pos.unwrap_or_else(|| random_clear_position(bounds, ship, rng));
        let vel = vel.unwrap_or_else(|| {
            Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 0.5
        });

        Self {
            pos,
            vel,
            size,
            angle: rng.random::<f32>() * std::f32::consts::TAU,
            spin: (rng.random::<f32>() - 0.5) * 0.005,
            outline: generate_outline(size, rng),
            color: ASTEROID_COLOR,
        }
    }

    /// Wrap each axis independently with the asteroid's radius as margin,
    /// so it slides fully off one edge before reappearing at the other
    pub fn wrap(&mut self, bounds: WorldBounds) {
        let r = self.size;
        if self.pos.x < -r {
            self.pos.x = bounds.width + r;
        }
        if self.pos.x > bounds.width + r {
            self.pos.x = -r;
        }
        if self.pos.y < -r {
            self.pos.y = bounds.height + r;
        }
        if self.pos.y > bounds.height + r {
            self.pos.y = -r;
        }
    }

    /// Radius used for collision tests
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.size * ASTEROID_HIT_SCALE
    }
}

impl Updatable for Asteroid {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let frame = ctx.frame;
        self.pos += self.vel * frame.frames();
        self.angle += self.spin * frame.dt_ms;
        self.wrap(frame.bounds);
    }
}

impl Drawable for Asteroid {
    fn sprite(&self, _now_ms: f64) -> Sprite {
        Sprite::Asteroid {
            pos: self.pos,
            angle: self.angle,
            color: self.color,
            outline: self.outline.clone(),
        }
    }
}

/// Irregular polygon: 4-7 evenly spaced vertices, each at 0.8-1.2x the radius
fn generate_outline(size: f32, rng: &mut impl Rng) -> Vec<Vec2> {
    let count = rng.random_range(ASTEROID_MIN_VERTICES..=ASTEROID_MAX_VERTICES);
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| {
            let r = size * (0.8 + rng.random::<f32>() * 0.4);
            polar_to_cartesian(r, step * i as f32)
        })
        .collect()
}

fn random_position(bounds: WorldBounds, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * bounds.width,
        rng.random::<f32>() * bounds.height,
    )
}

fn random_clear_position(bounds: WorldBounds, ship: Option<Vec2>, rng: &mut impl Rng) -> Vec2 {
    let mut pos = random_position(bounds, rng);
    let Some(ship) = ship else {
        return pos;
    };
    let mut attempts = 1;
    while pos.distance(ship) < ASTEROID_SPAWN_CLEARANCE {
        if attempts >= ASTEROID_PLACEMENT_ATTEMPTS {
            log::debug!("No clear asteroid spot after {} attempts, placing anyway", attempts);
            break;
        }
        pos = random_position(bounds, rng);
        attempts += 1;
    }
    pos
}

/// Spawn just outside a random edge, drifting roughly toward the center.
///
/// A coin flip picks the axis (left/right vs top/bottom), a second one the
/// side. Speed is the center distance over `ASTEROID_AIM_FRAMES`, scaled by
/// 0.5-1.0 per axis, plus a little jitter.
pub fn spawn_at_edge(radius: f32, bounds: WorldBounds, rng: &mut impl Rng) -> Asteroid {
    let pos = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) { -radius } else { bounds.width + radius };
        Vec2::new(x, rng.random::<f32>() * bounds.height)
    } else {
        let y = if rng.random_bool(0.5) { -radius } else { bounds.height + radius };
        Vec2::new(rng.random::<f32>() * bounds.width, y)
    };

    let to_center = bounds.center() - pos;
    let scale = Vec2::new(
        0.5 + rng.random::<f32>() * 0.5,
        0.5 + rng.random::<f32>() * 0.5,
    );
    let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 0.3;
    let vel = to_center / ASTEROID_AIM_FRAMES * scale + jitter;

    Asteroid::new(radius, Some(pos), Some(vel), None, bounds, rng)
}
