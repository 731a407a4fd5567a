//! Screens
//!
//! A screen is the active mode of the game. Screens that need per-increment
//! updates also implement [`SteppableScreen`] and expose it through
//! [`Screen::as_steppable`].

pub mod game;
pub mod start;

pub use game::GameScreen;
pub use start::StartScreen;

use crate::sim::state::{GameEvent, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Start,
    Game,
}

/// Request from a screen to the game root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    GameOver { score: u32 },
}

pub trait Screen {
    fn kind(&self) -> ScreenKind;

    /// Called once when the screen becomes active
    fn show(&mut self, _stage: &mut Stage) {}

    /// Queue this frame's draw commands
    fn render(&mut self, stage: &mut Stage, dt: f32);

    /// Handle a tap; returns true if it was used
    fn tap(&mut self, _stage: &mut Stage) -> bool {
        false
    }

    fn on_event(&mut self, _stage: &mut Stage, _event: GameEvent) -> Option<Signal> {
        None
    }

    /// Release everything the screen spawned
    fn dispose(&mut self, _stage: &mut Stage) {}

    fn as_steppable(&mut self) -> Option<&mut dyn SteppableScreen> {
        None
    }
}

/// Screen that advances with the simulation
pub trait SteppableScreen {
    fn step(&mut self, stage: &mut Stage, dt: f32);
}
