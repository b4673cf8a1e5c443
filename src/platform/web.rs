use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::settings::{LayoutPreset, Settings};
use crate::sim::{JoystickGrip, TouchId};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {err}").into());
    }
    log::info!("Rocket Spin (web) starting...");
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game handle driven from the page script
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create an idle game sized to the viewport. Seeds from the clock
    /// when `seed` is omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> WebGame {
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let store = LocalStorageStore;
        let mut settings = Settings::load(&store);
        settings.world_width = width;
        settings.world_height = height;
        settings.layout = LayoutPreset::for_viewport_width(width);
        log::info!(
            "World {}x{} ({} layout), seed {}",
            width,
            height,
            settings.layout.as_str(),
            seed
        );
        WebGame {
            game: Game::new(settings, seed, store),
        }
    }

    /// Advance to `now` (the requestAnimationFrame timestamp)
    pub fn tick(&mut self, now: f64) {
        self.game.tick(now);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.state.resize(width, height);
        self.game.state.settings.layout = LayoutPreset::for_viewport_width(width);
    }

    pub fn start_game(&mut self, now: f64) -> bool {
        self.game.start(now)
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    pub fn boost_down(&mut self, now: f64) {
        self.game.press_boost(now);
    }

    pub fn boost_up(&mut self) {
        self.game.release_boost();
    }

    /// Joystick grabbed. `touch_id` is None for the mouse.
    pub fn joystick_down(&mut self, touch_id: Option<TouchId>) {
        self.game.state.input_mut().joystick_begin(grip(touch_id));
    }

    /// Pointer at (`dx`, `dy`) from the joystick center
    pub fn joystick_move(&mut self, touch_id: Option<TouchId>, dx: f32, dy: f32) {
        self.game.state.input_mut().joystick_move(grip(touch_id), dx, dy);
    }

    pub fn joystick_up(&mut self, touch_id: Option<TouchId>) {
        self.game.state.input_mut().joystick_end(grip(touch_id));
    }

    /// Joystick pad offset for drawing the knob, as `[x, y]`
    pub fn joystick_pad(&self) -> Vec<f32> {
        let (x, y) = self.game.state.input().joystick_pad;
        vec![x, y]
    }

    /// Finger down on the open play field
    pub fn canvas_touch_down(&mut self, touch_id: TouchId) {
        self.game.state.input_mut().canvas_touch_begin(touch_id);
    }

    pub fn canvas_touch_up(&mut self, touch_id: TouchId) {
        self.game.state.input_mut().canvas_touch_end(touch_id);
    }

    /// Secondary mouse button on the play field
    pub fn set_slow_motion_button(&mut self, held: bool) {
        self.game.state.input_mut().slow_motion_button = held;
    }

    pub fn snapshot_json(&self, now: f64) -> Result<String, JsValue> {
        self.game.snapshot(now).to_json().map_err(js_error)
    }

    pub fn highscores_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.highscores()).map_err(js_error)
    }

    pub fn player_name(&self) -> Option<String> {
        self.game.player_name()
    }

    /// Store the player name. Returns the cleaned name, or None if it was
    /// empty after trimming.
    pub fn set_player_name(&mut self, name: &str) -> Option<String> {
        self.game.set_player_name(name)
    }

    /// Rank of the last finished run, 0 if it didn't place
    pub fn last_rank(&self) -> usize {
        self.game.last_run().and_then(|run| run.rank).unwrap_or(0)
    }
}

fn grip(touch_id: Option<TouchId>) -> JoystickGrip {
    match touch_id {
        Some(id) => JoystickGrip::Touch(id),
        None => JoystickGrip::Mouse,
    }
}
