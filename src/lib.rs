//! JMP - a wall-jumping arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (timer, clock, suspend, physics, entities)
//! - `entities`: Ground, walls, background, player and obstacles
//! - `screens`: Start and in-game screens
//! - `game`: Session root driving frames and taps
//! - `renderer`: Camera and backend-agnostic draw queue
//! - `highscores`: Best score over a preferences store
//! - `config`: Data-driven world constants

pub mod config;
pub mod entities;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod screens;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use game::{Jmp, Resume, SimError};
pub use highscores::{HighScore, JsonFilePreferences, MemoryPreferences, Preferences, PrefsError};
pub use screens::ScreenKind;
