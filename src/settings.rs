//! Startup settings
//!
//! Read once before the simulation is built. Persisted as JSON in LocalStorage
//! on the web; native builds always use the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation parameters fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of balls spawned at startup
    pub ball_count: usize,
    /// Spread of the initial per-axis velocity
    pub initial_speed: f32,
    /// Radius shared by every ball
    pub ball_radius: f32,
    /// Wall endpoint travel per frame
    pub wall_speed: f32,
    /// RNG seed for the initial population (None = time-based)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            initial_speed: INITIAL_SPEED,
            ball_radius: BALL_RADIUS,
            wall_speed: WALL_SPEED,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "wallball_settings";

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace unusable numeric values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            log::warn!("Invalid ball_radius {}, using {}", self.ball_radius, defaults.ball_radius);
            self.ball_radius = defaults.ball_radius;
        }
        if !(self.initial_speed.is_finite() && self.initial_speed >= 0.0) {
            log::warn!(
                "Invalid initial_speed {}, using {}",
                self.initial_speed,
                defaults.initial_speed
            );
            self.initial_speed = defaults.initial_speed;
        }
        if !(self.wall_speed.is_finite() && self.wall_speed > 0.0) {
            log::warn!("Invalid wall_speed {}, using {}", self.wall_speed, defaults.wall_speed);
            self.wall_speed = defaults.wall_speed;
        }

        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings.sanitized();
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no settings store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
