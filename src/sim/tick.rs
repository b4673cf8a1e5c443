//! Per-frame simulation tick
//!
//! The driver calls [`tick`] once per display refresh with a wall-clock
//! timestamp. Everything else (asteroid spawning, idle exhaust, restart
//! lockout) runs on elapsed-time accumulators advanced inside the tick.

use rand::Rng;

use super::asteroid::spawn_at_edge;
use super::collision::first_hit;
use super::entity::{Frame, UpdateContext, Updatable};
use super::particle::{explosion, update_particles};
use super::ship::Ship;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SCORE_PER_MS;

/// Advance the game to wall-clock time `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) {
    let dt = state.session.advance_clock(now_ms, state.settings.max_frame_ms);
    step(state, dt);
}

/// Advance the game by `dt_ms` of wall-clock time.
///
/// While running, slow motion dilates the delta before any entity sees it.
/// While idle only particles move and the restart lockout counts down.
/// Negative or non-finite deltas count as 0.
pub fn step(state: &mut GameState, dt_ms: f32) {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    state.session.slow_motion = state.session.input.slow_motion();

    match state.session.phase {
        GamePhase::Idle => {
            let cooldown = &mut state.session.restart_cooldown_ms;
            *cooldown = (*cooldown - dt_ms).max(0.0);
            update_particles(&mut state.particles, dt_ms);
        }
        GamePhase::Running => {
            let dt = if state.session.slow_motion {
                dt_ms * state.settings.slow_motion_factor
            } else {
                dt_ms
            };
            run_frame(state, dt);
        }
    }
}

fn run_frame(state: &mut GameState, dt: f32) {
    let frame = Frame {
        dt_ms: dt,
        bounds: state.bounds(),
        slow_motion: state.session.slow_motion,
        slow_motion_factor: state.settings.slow_motion_factor,
    };

    // Ship first, then asteroids, then particles (including this frame's exhaust)
    let mut emitted = Vec::new();
    {
        let mut ctx = UpdateContext {
            frame,
            input: &state.session.input,
            rng: &mut state.rng,
            emitted: &mut emitted,
        };
        if let Some(ship) = state.ship.as_mut() {
            ship.update(&mut ctx);
        }
        for asteroid in state.asteroids.iter_mut() {
            asteroid.update(&mut ctx);
        }
    }
    state.particles.append(&mut emitted);
    update_particles(&mut state.particles, dt);

    let hit = state
        .ship
        .as_ref()
        .and_then(|ship| first_hit(ship, &state.asteroids));
    if let Some(index) = hit {
        log::debug!("Ship hit asteroid #{}", index);
        report_collision(state);
        return;
    }

    advance_spawner(state, dt);

    state.session.score += dt as f64 * SCORE_PER_MS;
    state.session.elapsed_ms += dt as f64;
}

/// Count toward the next spawn; at most one asteroid per frame.
///
/// The interval is fixed when the countdown is armed, from the score at that
/// moment, so the first spawn of a run always comes after the base interval.
fn advance_spawner(state: &mut GameState, dt: f32) {
    let session = &mut state.session;
    session.spawn_accumulator_ms += dt;
    if session.spawn_accumulator_ms < session.spawn_interval_ms {
        return;
    }
    session.spawn_accumulator_ms -= session.spawn_interval_ms;
    session.spawn_interval_ms = state.settings.spawn_interval_at(session.score);
    spawn_random_asteroid(state);
}

/// Spawn one asteroid of the given radius at a random edge
pub fn spawn_asteroid(state: &mut GameState, radius: f32) {
    let bounds = state.bounds();
    let asteroid = spawn_at_edge(radius, bounds, &mut state.rng);
    log::debug!(
        "Spawned asteroid r={:.1} at ({:.0}, {:.0}), {} live",
        radius,
        asteroid.pos.x,
        asteroid.pos.y,
        state.asteroids.len() + 1
    );
    state.asteroids.push(asteroid);
    state.events.push(GameEvent::AsteroidSpawned { radius });
}

/// Spawn one asteroid sized from the layout's spawn range
pub fn spawn_random_asteroid(state: &mut GameState) {
    let radius = state.rng.random_range(state.settings.layout.spawn_size_range());
    spawn_asteroid(state, radius);
}

/// Begin a new run at wall-clock time `now_ms`.
///
/// Returns false (and changes nothing) while running or during the
/// post-game-over lockout.
pub fn start_game(state: &mut GameState, now_ms: f64) -> bool {
    if !state.can_start() {
        log::debug!(
            "Start refused ({:.0} ms lockout left)",
            state.session.restart_cooldown_ms
        );
        return false;
    }

    let session = &mut state.session;
    session.phase = GamePhase::Running;
    session.score = 0.0;
    session.elapsed_ms = 0.0;
    session.last_time = Some(now_ms);
    session.slow_motion = false;
    session.input.reset();
    session.spawn_accumulator_ms = 0.0;
    session.spawn_interval_ms = state.settings.spawn_interval_at(0.0);
    session.restart_cooldown_ms = 0.0;

    state.ship = Some(Ship::new(state.bounds()));
    state.particles.clear();
    state.asteroids.clear();
    for radius in state.settings.layout.initial_asteroid_sizes() {
        spawn_asteroid(state, radius);
    }

    state.events.push(GameEvent::Started);
    log::info!("Game started ({:?} layout)", state.settings.layout);
    true
}

/// The ship was hit: blow it up and end the run
pub fn report_collision(state: &mut GameState) {
    let Some(ship) = state.ship.take() else {
        return;
    };
    let debris = explosion(ship.pos, &mut state.rng);
    state.particles.extend(debris);

    let session = &mut state.session;
    session.phase = GamePhase::Idle;
    session.restart_cooldown_ms = state.settings.restart_cooldown_ms;

    let score = session.score;
    state.events.push(GameEvent::GameOver { score });
    log::info!(
        "Game over: score {:.0} after {:.1}s with {} asteroids",
        score,
        session.elapsed_ms / 1000.0,
        state.asteroids.len()
    );
}

/// Boost button pressed. While idle this doubles as the start button.
pub fn press_boost(state: &mut GameState, now_ms: f64) {
    if !state.is_running() && !start_game(state, now_ms) {
        return;
    }
    state.session.input.set_boost(true);
}

pub fn release_boost(state: &mut GameState) {
    state.session.input.set_boost(false);
}
