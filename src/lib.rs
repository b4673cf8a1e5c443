//! Rocket Spin - a wrap-around asteroid dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state, tick)
//! - `snapshot`: Read-only frame view handed to whatever draws the game
//! - `highscores`: Player name and top-10 leaderboard
//! - `persistence`: Key-value storage backends
//! - `settings`: World size, layout preset and gameplay tuning
//! - `game`: Simulation plus leaderboard bookkeeping
//! - `platform`: Browser bindings (wasm32 only)

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use highscores::{HighScoreEntry, HighScores, HighscoreStore};
pub use settings::{LayoutPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Velocities are in world units per nominal 16 ms frame, times in ms.
pub mod consts {
    /// One nominal frame at 60 Hz. Frame-rate independent laws scale by `dt / NOMINAL_FRAME_MS`.
    pub const NOMINAL_FRAME_MS: f32 = 16.0;

    /// Ship acceleration per ms of boost
    pub const THRUST: f32 = 0.05;
    /// Per-nominal-frame velocity retention
    pub const FRICTION: f32 = 0.995;
    /// Speed cap (per nominal frame)
    pub const MAX_VELOCITY: f32 = 5.0;
    /// Fraction of the remaining angle covered per nominal frame when steering
    pub const STEERING_RATE: f32 = 0.1;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 15.0;
    pub const SHIP_HIT_RADIUS: f32 = SHIP_SIZE * 0.9;
    /// Initial accumulator value so the first idle puff is slightly delayed
    pub const IDLE_EMIT_START_MS: f32 = -40.0;
    pub const IDLE_EMIT_INTERVAL_MS: f32 = 80.0;
    pub const IDLE_EMIT_INTERVAL_SLOW_MS: f32 = 120.0;
    pub const THRUST_PARTICLES_PER_TICK: usize = 2;

    /// Asteroid hit circle is slightly smaller than its outline
    pub const ASTEROID_HIT_SCALE: f32 = 0.9;
    /// Randomly placed asteroids keep at least this distance from the ship
    pub const ASTEROID_SPAWN_CLEARANCE: f32 = 200.0;
    /// Upper bound on placement rerolls (tiny worlds may have no clear spot)
    pub const ASTEROID_PLACEMENT_ATTEMPTS: u32 = 64;
    pub const ASTEROID_MIN_RADIUS: f32 = 1.0;
    pub const ASTEROID_MIN_VERTICES: usize = 4;
    pub const ASTEROID_MAX_VERTICES: usize = 7;
    /// Edge spawner aims at the center, covering the distance in ~500 frames
    pub const ASTEROID_AIM_FRAMES: f32 = 500.0;

    /// Particle velocity retention per tick (not scaled by elapsed time)
    pub const PARTICLE_DAMPING: f32 = 0.98;
    pub const PARTICLE_DEFAULT_SIZE: f32 = 2.0;
    pub const EXPLOSION_PARTICLES: usize = 50;

    /// Score gained per ms survived
    pub const SCORE_PER_MS: f64 = 1.0 / 100.0;

    /// Joystick pad travel radius (presentation hint)
    pub const JOYSTICK_RADIUS: f32 = 30.0;

    /// Colors (0xRRGGBB)
    pub const SHIP_COLOR: u32 = 0xFF5722;
    pub const THRUST_COLOR: u32 = 0xFFA500;
    pub const IDLE_COLOR: u32 = 0x00FFC0;
    pub const ASTEROID_COLOR: u32 = 0x999999;
}

/// Shortest signed rotation taking `from` onto `to`, in (-π, π]
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
