//! Game state and session bookkeeping
//!
//! `GameState` owns every entity collection; nothing else mutates them.
//! Presentation code reads through the accessors or a `FrameSnapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::entity::WorldBounds;
use super::input::InputState;
use super::particle::Particle;
use super::ship::Ship;
use super::star::{Star, starfield};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start or game-over screen: only particles animate
    Idle,
    /// Active gameplay
    Running,
}

/// Something the driver may want to react to (sound, UI, highscores)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    AsteroidSpawned { radius: f32 },
    /// Ship destroyed. Carries the unrounded final score.
    GameOver { score: f64 },
}

/// Per-run session values. Reset on every start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    /// Survival score, grows with simulated time
    pub score: f64,
    /// Simulated ms since the run started (slow motion dilated)
    pub elapsed_ms: f64,
    /// Slow motion was active for the latest tick
    pub slow_motion: bool,
    pub input: InputState,
    /// Timestamp of the previous tick (ms)
    pub last_time: Option<f64>,
    /// ms accumulated toward the next asteroid spawn
    pub spawn_accumulator_ms: f32,
    /// Interval the accumulator is currently counting toward
    pub spawn_interval_ms: f32,
    /// Remaining restart lockout after a game over
    pub restart_cooldown_ms: f32,
}

impl SessionState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0.0,
            elapsed_ms: 0.0,
            slow_motion: false,
            input: InputState::default(),
            last_time: None,
            spawn_accumulator_ms: 0.0,
            spawn_interval_ms: settings.spawn_interval_ms,
            restart_cooldown_ms: 0.0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Wall-clock ms since the previous tick, clamped to `0..=max_frame_ms`.
    /// The first tick after construction or start yields 0.
    pub fn advance_clock(&mut self, now_ms: f64, max_frame_ms: f32) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = self.last_time.map_or(0.0, |last| now_ms - last);
        self.last_time = Some(now_ms);
        dt.clamp(0.0, max_frame_ms as f64) as f32
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub session: SessionState,
    /// None before the first start and after the ship is destroyed
    pub ship: Option<Ship>,
    /// Spawn order; never shrinks during a run
    pub asteroids: Vec<Asteroid>,
    pub particles: Vec<Particle>,
    /// Created once, kept across runs
    pub stars: Vec<Star>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game with the given settings and RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = starfield(settings.star_count, bounds_of(&settings), &mut rng);
        Self {
            session: SessionState::new(&settings),
            settings,
            ship: None,
            asteroids: Vec::new(),
            particles: Vec::new(),
            stars,
            rng,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        bounds_of(&self.settings)
    }

    /// Resize the play area (viewport change). Entities keep their
    /// coordinates and wrap into the new bounds on their next update.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.world_width = width;
        self.settings.world_height = height;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.session.score
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn input(&self) -> &InputState {
        &self.session.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.session.input
    }

    /// A new game may start now
    pub fn can_start(&self) -> bool {
        !self.is_running() && self.session.restart_cooldown_ms <= 0.0
    }

    /// Take the events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn bounds_of(settings: &Settings) -> WorldBounds {
    WorldBounds::new(settings.world_width, settings.world_height)
}
