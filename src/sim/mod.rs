//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `tick`/`step` deltas
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod input;
pub mod particle;
pub mod ship;
pub mod star;
pub mod state;
pub mod tick;
pub mod vector;

pub use asteroid::{Asteroid, spawn_at_edge};
pub use collision::{circles_overlap, first_hit, ship_hits_asteroid};
pub use entity::{Drawable, Frame, Sprite, UpdateContext, Updatable, WorldBounds};
pub use input::{InputState, JoystickGrip, TouchId};
pub use particle::{Particle, explosion, update_particles};
pub use ship::Ship;
pub use star::Star;
pub use state::{GameEvent, GamePhase, GameState, SessionState};
pub use tick::{
    press_boost, release_boost, report_collision, spawn_asteroid, spawn_random_asteroid,
    start_game, step, tick,
};
pub use vector::{Vector2, Vector2Ext};
