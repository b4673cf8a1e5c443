//! The player's ship

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Drawable, Frame, Sprite, UpdateContext, Updatable, WorldBounds};
use super::particle::Particle;
use super::vector::Vector2Ext;
use crate::consts::*;
use crate::{polar_to_cartesian, shortest_angle_delta};

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians)
    pub angle: f32,
    pub size: f32,
    pub hit_radius: f32,
    /// Boost flame lit on the last update
    pub boosting: bool,
    /// ms accumulated toward the next idle exhaust puff
    idle_emit_accumulator: f32,
}

impl Ship {
    /// Fresh ship at the world center, nose up
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            pos: bounds.center(),
            vel: Vec2::ZERO,
            angle: -std::f32::consts::FRAC_PI_2,
            size: SHIP_SIZE,
            hit_radius: SHIP_HIT_RADIUS,
            boosting: false,
            idle_emit_accumulator: IDLE_EMIT_START_MS,
        }
    }

    /// Unit vector along the nose
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Ease the nose toward `target`: covers `STEERING_RATE` of the shortest
    /// remaining turn per nominal frame
    pub fn steer_toward(&mut self, target: f32, frames: f32) {
        let delta = shortest_angle_delta(self.angle, target);
        self.angle += delta * STEERING_RATE * frames;
    }

    /// Hard toroidal wrap, no margin
    pub fn wrap(&mut self, bounds: WorldBounds) {
        if self.pos.x < 0.0 {
            self.pos.x = bounds.width;
        }
        if self.pos.x > bounds.width {
            self.pos.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = bounds.height;
        }
        if self.pos.y > bounds.height {
            self.pos.y = 0.0;
        }
    }

    fn emit_thrust(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) {
        let tail = self.pos - self.heading() * self.size;
        for _ in 0..THRUST_PARTICLES_PER_TICK {
            let angle = self.angle + std::f32::consts::PI + (rng.random::<f32>() - 0.5) * 0.5;
            let speed = 1.0 + rng.random::<f32>() * 2.0;
            let lifetime = 10.0 + rng.random::<f32>() * 5.0;
            let size = 1.0 + rng.random::<f32>() * 1.5;
            out.push(Particle::new(tail, angle, speed, THRUST_COLOR, lifetime, size));
        }
    }

    fn emit_idle(&self, rng: &mut impl Rng, out: &mut Vec<Particle>) {
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 4.0;
        let origin = self.pos - self.heading() * (self.size * 0.9) + jitter;
        let angle = self.angle + std::f32::consts::PI + (rng.random::<f32>() - 0.5) * 0.6;
        let speed = 0.4 + rng.random::<f32>() * 0.8;
        let lifetime = 140.0 + rng.random::<f32>() * 120.0;
        let size = 1.0 + rng.random::<f32>() * 1.2;
        out.push(Particle::new(origin, angle, speed, IDLE_COLOR, lifetime, size));
    }

    fn speed_cap(frame: &Frame) -> f32 {
        if frame.slow_motion {
            MAX_VELOCITY * frame.slow_motion_factor
        } else {
            MAX_VELOCITY
        }
    }
}

impl Updatable for Ship {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let frame = ctx.frame;
        let frames = frame.frames();

        self.vel *= FRICTION.powf(frames);

        if ctx.input.joystick_active() {
            self.steer_toward(ctx.input.joystick_angle, frames);
        }

        self.boosting = ctx.input.boosting;
        if self.boosting {
            self.vel += self.heading() * THRUST * frame.dt_ms;
            self.emit_thrust(ctx.rng, ctx.emitted);
        }

        self.idle_emit_accumulator += frame.dt_ms;
        let interval = if frame.slow_motion {
            IDLE_EMIT_INTERVAL_SLOW_MS
        } else {
            IDLE_EMIT_INTERVAL_MS
        };
        while self.idle_emit_accumulator >= interval {
            self.idle_emit_accumulator -= interval;
            self.emit_idle(ctx.rng, ctx.emitted);
        }

        self.vel = self.vel.clamp_magnitude(Self::speed_cap(&frame));
        self.pos += self.vel * frames;
        self.wrap(frame.bounds);
    }
}

impl Drawable for Ship {
    fn sprite(&self, _now_ms: f64) -> Sprite {
        Sprite::Ship {
            pos: self.pos,
            angle: self.angle,
            size: self.size,
            color: SHIP_COLOR,
            boosting: self.boosting,
            outline: hull(self.size).to_vec(),
        }
    }
}

/// Nose, wing and notch points of the ship outline relative to its center, unrotated
pub fn hull(size: f32) -> [Vec2; 4] {
    [
        polar_to_cartesian(size, 0.0),
        Vec2::new(-size, -size * 0.6),
        Vec2::new(-size * 0.5, 0.0),
        Vec2::new(-size, size * 0.6),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{InputState, JoystickGrip};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    const BOUNDS: WorldBounds = WorldBounds {
        width: 800.0,
        height: 600.0,
    };

    fn frame(dt_ms: f32) -> Frame {
        Frame {
            dt_ms,
            bounds: BOUNDS,
            slow_motion: false,
            slow_motion_factor: 0.3,
        }
    }

    fn run(ship: &mut Ship, frame: Frame, input: &InputState) -> Vec<Particle> {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut emitted = Vec::new();
        let mut ctx = UpdateContext {
            frame,
            input,
            rng: &mut rng,
            emitted: &mut emitted,
        };
        ship.update(&mut ctx);
        emitted
    }

    #[test]
    fn test_new_ship_centered_facing_up() {
        let ship = Ship::new(BOUNDS);
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert!((ship.angle + PI / 2.0).abs() < 1e-6);
        assert!((ship.hit_radius - 13.5).abs() < 1e-5);
    }

    #[test]
    fn test_joystick_steering_one_nominal_frame() {
        let mut ship = Ship::new(BOUNDS);
        ship.angle = 0.0;
        let mut input = InputState::default();
        input.joystick_begin(JoystickGrip::Touch(1));
        input.joystick_angle = PI;

        run(&mut ship, frame(16.0), &input);
        assert!((ship.angle - PI * 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_no_steering_without_joystick() {
        let mut ship = Ship::new(BOUNDS);
        let input = InputState {
            joystick_angle: 1.0,
            ..Default::default()
        };
        run(&mut ship, frame(16.0), &input);
        assert!((ship.angle + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_friction_is_frame_rate_independent() {
        let mut a = Ship::new(BOUNDS);
        a.vel = Vec2::new(2.0, 0.0);
        let mut b = a.clone();
        let input = InputState::default();

        run(&mut a, frame(32.0), &input);
        run(&mut b, frame(16.0), &input);
        run(&mut b, frame(16.0), &input);
        assert!((a.vel.x - b.vel.x).abs() < 1e-5);
        assert!((a.vel.x - 2.0 * FRICTION * FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_boost_accelerates_and_emits() {
        let mut ship = Ship::new(BOUNDS);
        ship.idle_emit_accumulator = -1000.0;
        let input = InputState {
            boosting: true,
            ..Default::default()
        };
        let emitted = run(&mut ship, frame(16.0), &input);
        assert_eq!(emitted.len(), THRUST_PARTICLES_PER_TICK);
        assert!(emitted.iter().all(|p| p.color == THRUST_COLOR));
        // Nose up: thrust pushes toward -y
        assert!((ship.vel.y + THRUST * 16.0).abs() < 1e-5);
        assert!(ship.boosting);
    }

    #[test]
    fn test_idle_emission_does_not_double_fire() {
        let mut ship = Ship::new(BOUNDS);
        let input = InputState::default();
        // -40 + 100 = 60: below the 80 ms interval
        assert!(run(&mut ship, frame(100.0), &input).is_empty());
        // 60 + 30 = 90: exactly one puff, 10 ms carried over
        assert_eq!(run(&mut ship, frame(30.0), &input).len(), 1);
        assert!((ship.idle_emit_accumulator - 10.0).abs() < 1e-4);
        // 10 + 250 = 260: three intervals elapsed, three puffs, 20 ms left
        assert_eq!(run(&mut ship, frame(250.0), &input).len(), 3);
        assert!((ship.idle_emit_accumulator - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_idle_interval_slower_in_slow_motion() {
        let mut ship = Ship::new(BOUNDS);
        ship.idle_emit_accumulator = 0.0;
        let input = InputState::default();
        let mut f = frame(100.0);
        f.slow_motion = true;
        assert!(run(&mut ship, f, &input).is_empty());
        assert_eq!(run(&mut ship, f, &input).len(), 1);
    }

    #[test]
    fn test_speed_clamped() {
        let mut ship = Ship::new(BOUNDS);
        ship.vel = Vec2::new(100.0, 0.0);
        run(&mut ship, frame(16.0), &InputState::default());
        assert!((ship.vel.length() - MAX_VELOCITY).abs() < 1e-4);

        let mut f = frame(16.0);
        f.slow_motion = true;
        run(&mut ship, f, &InputState::default());
        assert!((ship.vel.length() - MAX_VELOCITY * 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_is_hard_edge() {
        let mut ship = Ship::new(BOUNDS);
        ship.pos = Vec2::new(799.0, 1.0);
        ship.vel = Vec2::new(3.0, -3.0);
        run(&mut ship, frame(16.0), &InputState::default());
        assert_eq!(ship.pos.x, 0.0);
        assert_eq!(ship.pos.y, BOUNDS.height);
    }

    proptest! {
        #[test]
        fn prop_ship_stays_in_bounds(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
            dt in 0.0f32..250.0,
        ) {
            let mut ship = Ship::new(BOUNDS);
            ship.pos = Vec2::new(x, y);
            ship.vel = Vec2::new(vx, vy);
            run(&mut ship, frame(dt), &InputState::default());
            prop_assert!((0.0..=BOUNDS.width).contains(&ship.pos.x));
            prop_assert!((0.0..=BOUNDS.height).contains(&ship.pos.y));
        }
    }
}
