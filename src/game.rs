//! Simulation plus leaderboard
//!
//! `Game` is what a front end drives: it forwards ticks and controls to the
//! simulation and files the final score when a run ends.

use crate::highscores::{HighScores, HighscoreStore};
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState};
use crate::snapshot::FrameSnapshot;

/// Outcome of the most recent run
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub score: f64,
    /// 1-indexed leaderboard position, None if it didn't place
    pub rank: Option<usize>,
}

pub struct Game<S> {
    pub state: GameState,
    scores: HighscoreStore<S>,
    last_run: Option<RunResult>,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(settings: Settings, seed: u64, store: S) -> Self {
        Self {
            state: GameState::new(settings, seed),
            scores: HighscoreStore::new(store),
            last_run: None,
        }
    }

    /// Advance to wall-clock time `now_ms` and handle what happened.
    /// Returns the events raised during this tick.
    pub fn tick(&mut self, now_ms: f64) -> Vec<GameEvent> {
        sim::tick(&mut self.state, now_ms);
        let events = self.state.take_events();
        for event in &events {
            if let GameEvent::GameOver { score } = event {
                self.record_run(*score);
            }
        }
        events
    }

    fn record_run(&mut self, score: f64) {
        let name = self.scores.player_name();
        let before = self.scores.highscores();
        let rounded = crate::snapshot::display_score(score);
        let rank = before.potential_rank(rounded);
        self.scores.add_highscore(name.as_deref(), score);
        self.last_run = Some(RunResult { score, rank });
    }

    /// Start a run unless one is active or the restart lockout is pending
    pub fn start(&mut self, now_ms: f64) -> bool {
        sim::start_game(&mut self.state, now_ms)
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn press_boost(&mut self, now_ms: f64) {
        sim::press_boost(&mut self.state, now_ms);
    }

    pub fn release_boost(&mut self) {
        sim::release_boost(&mut self.state);
    }

    pub fn snapshot(&self, now_ms: f64) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, now_ms)
    }

    pub fn last_run(&self) -> Option<&RunResult> {
        self.last_run.as_ref()
    }

    pub fn player_name(&self) -> Option<String> {
        self.scores.player_name()
    }

    pub fn set_player_name(&mut self, name: &str) -> Option<String> {
        self.scores.set_player_name(name)
    }

    pub fn highscores(&self) -> HighScores {
        self.scores.highscores()
    }

    pub fn store(&self) -> &S {
        self.scores.store()
    }
}
