//! Simulation configuration
//!
//! All world constants live in one immutable struct handed to the game at
//! construction. Values can be overridden from a JSON document; missing keys
//! fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most fixed increments a single capped frame may queue
pub const MAX_INCREMENTS_PER_FRAME: f32 = 100_000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === World ===
    /// Visible world width (m)
    pub world_width: f32,
    /// Downward gravity (m/s²)
    pub gravity: f32,
    /// Gap between the world edge and a wall's inner face (m)
    pub wall_offset: f32,

    // === Timing ===
    /// Fixed physics increment (s)
    pub time_step: f32,
    /// Largest frame delta fed to the simulation (s)
    pub max_step_delta: f32,
    /// How long the world freezes on game over before a tap restarts (s)
    pub game_over_suspend: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,

    // === Gameplay ===
    /// Player box size (m)
    pub player_size: f32,
    /// Horizontal launch speed of a jump (m/s)
    pub jump_speed_x: f32,
    /// Vertical launch speed of a jump (m/s)
    pub jump_speed_y: f32,
    /// Vertical distance between consecutive obstacles (m)
    pub obstacle_spacing: f32,
    /// Speed the view climbs on its own once the run starts (m/s)
    pub scroll_speed: f32,
    /// Surface aspect (height / width) used until the host resizes
    pub aspect: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 20.0,
            gravity: 25.0,
            wall_offset: 0.05,

            time_step: 1.0 / 300.0,
            max_step_delta: 0.25,
            game_over_suspend: 0.5,
            velocity_iterations: 6,
            position_iterations: 2,

            player_size: 1.0,
            jump_speed_x: 16.0,
            jump_speed_y: 20.0,
            obstacle_spacing: 9.0,
            scroll_speed: 1.5,
            aspect: 16.0 / 9.0,
        }
    }
}

impl SimConfig {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(ConfigError::Invalid("time_step must be positive and finite"));
        }
        if !(self.max_step_delta >= 0.0) || !self.max_step_delta.is_finite() {
            return Err(ConfigError::Invalid("max_step_delta must be finite and not negative"));
        }
        if self.max_step_delta / self.time_step > MAX_INCREMENTS_PER_FRAME {
            return Err(ConfigError::Invalid("max_step_delta is too many time steps"));
        }
        if !(self.world_width > 0.0) {
            return Err(ConfigError::Invalid("world_width must be positive"));
        }
        if !(self.aspect > 0.0) {
            return Err(ConfigError::Invalid("aspect must be positive"));
        }
        if !(self.game_over_suspend >= 0.0) {
            return Err(ConfigError::Invalid("game_over_suspend must not be negative"));
        }
        if !(self.player_size > 0.0) || self.player_size >= self.world_width {
            return Err(ConfigError::Invalid("player_size must fit inside the world"));
        }
        if !(self.obstacle_spacing > 0.0) {
            return Err(ConfigError::Invalid("obstacle_spacing must be positive"));
        }
        Ok(())
    }

    /// Fixed increments in one second of simulated time
    pub fn steps_per_second(&self) -> f32 {
        1.0 / self.time_step
    }
}
