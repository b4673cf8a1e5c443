//! Rocket Spin entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless autopilot game and prints the leaderboard.
//!
//! Usage: `rocket-spin [seed] [scores.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rocket Spin (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    match args.next() {
        Some(path) => {
            let store = rocket_spin::persistence::FileStore::new(path);
            autopilot::run(store, seed);
        }
        None => autopilot::run(rocket_spin::persistence::MemoryStore::new(), seed),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is platform::web::wasm_start
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use rocket_spin::persistence::KeyValueStore;
    use rocket_spin::sim::{GameEvent, GameState, JoystickGrip};
    use rocket_spin::{Game, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const TIME_LIMIT_MS: f64 = 600_000.0;
    /// Rocks closer than this get steered away from
    const DANGER_RADIUS: f32 = 180.0;

    pub fn run<S: KeyValueStore>(store: S, seed: u64) {
        let mut game = Game::new(Settings::default(), seed, store);
        if game.player_name().is_none() {
            game.set_player_name("autopilot");
        }
        game.start(0.0);

        let mut now = 0.0;
        while now < TIME_LIMIT_MS {
            now += FRAME_MS;
            steer(&mut game.state);
            let events = game.tick(now);
            if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                break;
            }
        }

        let snapshot = game.snapshot(now);
        match game.last_run() {
            Some(run) => log::info!("Run over: score {:.0}, rank {:?}", run.score, run.rank),
            None => log::info!("Time limit reached with score {}", snapshot.score),
        }

        println!("\nHigh scores");
        for (i, entry) in game.highscores().entries.iter().enumerate() {
            println!("{:>2}. {:<20} {:>6}", i + 1, entry.name, entry.score);
        }
    }

    /// Point away from the closest threatening rock and boost while it's near
    fn steer(state: &mut GameState) {
        let Some(ship) = state.ship() else {
            return;
        };
        let threat = state
            .asteroids()
            .iter()
            .map(|a| (a.pos - ship.pos, a.size))
            .filter(|(offset, size)| offset.length() < DANGER_RADIUS + size)
            .min_by(|a, b| a.0.length().total_cmp(&b.0.length()));

        let input = state.input_mut();
        match threat {
            Some((offset, _)) => {
                let away = -offset.normalize_or(Vec2::X);
                input.joystick_begin(JoystickGrip::Mouse);
                input.joystick_move(JoystickGrip::Mouse, away.x, away.y);
                input.set_boost(true);
            }
            None => {
                input.joystick_end(JoystickGrip::Mouse);
                input.set_boost(false);
            }
        }
    }
}
