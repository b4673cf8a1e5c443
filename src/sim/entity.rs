//! Capabilities shared by the four entity kinds
//!
//! Entities read everything they need for a frame from an explicit
//! [`UpdateContext`] instead of ambient globals, and describe themselves to
//! the presentation layer as a [`Sprite`].

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::input::InputState;
use super::particle::Particle;

/// Toroidal play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Per-frame facts every entity update sees
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Elapsed simulation time in ms (already dilated by slow motion)
    pub dt_ms: f32,
    pub bounds: WorldBounds,
    pub slow_motion: bool,
    pub slow_motion_factor: f32,
}

impl Frame {
    /// `dt` as a multiple of one nominal 60 Hz frame
    #[inline]
    pub fn frames(&self) -> f32 {
        self.dt_ms / crate::consts::NOMINAL_FRAME_MS
    }
}

/// Everything an entity may read or produce during an update
pub struct UpdateContext<'a> {
    pub frame: Frame,
    pub input: &'a InputState,
    pub rng: &'a mut Pcg32,
    /// Particles created this update; merged into the live set by the tick
    pub emitted: &'a mut Vec<Particle>,
}

/// An entity that advances with simulation time. Called only while a run
/// is active; idle frames never reach entity updates.
pub trait Updatable {
    fn update(&mut self, ctx: &mut UpdateContext<'_>);
}

/// An entity that can be handed to a renderer
pub trait Drawable {
    /// Describe the entity at wall-clock time `now_ms`
    fn sprite(&self, now_ms: f64) -> Sprite;
}

/// Render description of one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sprite {
    Ship {
        pos: Vec2,
        angle: f32,
        size: f32,
        color: u32,
        /// Boost flame visible
        boosting: bool,
        /// Hull polygon relative to `pos`, unrotated (nose along +x)
        outline: Vec<Vec2>,
    },
    Asteroid {
        pos: Vec2,
        angle: f32,
        color: u32,
        /// Polygon outline relative to `pos`, unrotated
        outline: Vec<Vec2>,
    },
    Particle {
        pos: Vec2,
        size: f32,
        color: u32,
        alpha: f32,
    },
    Star {
        pos: Vec2,
        size: f32,
        color: u32,
        alpha: f32,
    },
}
