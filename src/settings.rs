//! Game settings and tuning
//!
//! Persisted as JSON in the key-value store, separate from highscores.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Viewport width below which the compact layout is used
pub const COMPACT_VIEWPORT_WIDTH: f32 = 768.0;

/// Layout presets: small screens get smaller asteroids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPreset {
    #[default]
    Desktop,
    Compact,
}

impl LayoutPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPreset::Desktop => "Desktop",
            LayoutPreset::Compact => "Compact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(LayoutPreset::Desktop),
            "compact" | "mobile" => Some(LayoutPreset::Compact),
            _ => None,
        }
    }

    /// Preset for a viewport of the given width
    pub fn for_viewport_width(width: f32) -> Self {
        if width < COMPACT_VIEWPORT_WIDTH {
            LayoutPreset::Compact
        } else {
            LayoutPreset::Desktop
        }
    }

    /// Radii of the two asteroids placed at game start
    pub fn initial_asteroid_sizes(&self) -> [f32; 2] {
        match self {
            LayoutPreset::Desktop => [30.0, 40.0],
            LayoutPreset::Compact => [18.0, 25.0],
        }
    }

    /// Radius range for asteroids spawned during play
    pub fn spawn_size_range(&self) -> Range<f32> {
        match self {
            LayoutPreset::Desktop => 20.0..50.0,
            LayoutPreset::Compact => 12.0..32.0,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub layout: LayoutPreset,
    /// Background stars created at startup
    pub star_count: usize,

    // === Time ===
    /// Time scale while slow motion is held (< 1)
    pub slow_motion_factor: f32,
    /// Longest wall-clock gap a single tick will simulate (ms)
    pub max_frame_ms: f32,
    /// Restart lockout after a game over (ms)
    pub restart_cooldown_ms: f32,

    // === Difficulty ===
    /// Spawn interval at score 0 (ms)
    pub spawn_interval_ms: f32,
    /// Spawn interval floor (ms)
    pub min_spawn_interval_ms: f32,
    /// Interval reduction per score point (ms)
    pub spawn_interval_per_point_ms: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: 1280.0,
            world_height: 720.0,
            layout: LayoutPreset::Desktop,
            star_count: 100,

            slow_motion_factor: 0.3,
            max_frame_ms: 250.0,
            restart_cooldown_ms: 2000.0,

            spawn_interval_ms: 1500.0,
            min_spawn_interval_ms: 500.0,
            spawn_interval_per_point_ms: 5.0,
        }
    }
}

impl Settings {
    /// Settings for a viewport, picking the layout from its width
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            world_width: width,
            world_height: height,
            layout: LayoutPreset::for_viewport_width(width),
            ..Self::default()
        }
    }

    /// Spawn interval for the given score: shrinks with score, never below the floor
    pub fn spawn_interval_at(&self, score: f64) -> f32 {
        let interval = self.spawn_interval_ms as f64 - score * self.spawn_interval_per_point_ms as f64;
        interval.max(self.min_spawn_interval_ms as f64) as f32
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Storage key
    const STORAGE_KEY: &'static str = "rocket_spin_settings";

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("Stored settings unreadable ({err}), using defaults");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings storage failed ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(err) => log::warn!("Could not save settings: {err}"),
            },
            Err(err) => log::warn!("Could not encode settings: {err}"),
        }
    }
}
