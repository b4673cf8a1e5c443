//! Read-only frame view for renderers
//!
//! Built once per tick after the update. Everything a renderer or UI
//! overlay needs, in draw order, and serializable so the browser side can
//! receive it as JSON.

use serde::Serialize;

use crate::sim::{Drawable, GameState, Sprite, WorldBounds};

/// Everything visible in one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub bounds: WorldBounds,
    /// Score as displayed (rounded)
    pub score: u64,
    pub running: bool,
    /// Tint the screen while slow motion is active in a run
    pub slow_motion: bool,
    /// ms until a restart is accepted (0 when ready)
    pub restart_cooldown_ms: f32,
    /// Stars, asteroids, ship, particles
    pub sprites: Vec<Sprite>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, now_ms: f64) -> Self {
        let mut sprites = Vec::with_capacity(
            state.stars().len() + state.asteroids().len() + state.particles().len() + 1,
        );
        sprites.extend(state.stars().iter().map(|s| s.sprite(now_ms)));
        sprites.extend(state.asteroids().iter().map(|a| a.sprite(now_ms)));
        if let Some(ship) = state.ship() {
            sprites.push(ship.sprite(now_ms));
        }
        sprites.extend(state.particles().iter().map(|p| p.sprite(now_ms)));

        Self {
            bounds: state.bounds(),
            score: display_score(state.score()),
            running: state.is_running(),
            slow_motion: state.is_running() && state.session.slow_motion,
            restart_cooldown_ms: state.session.restart_cooldown_ms,
            sprites,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Score rounded for display
pub fn display_score(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.round() as u64
    } else {
        0
    }
}
