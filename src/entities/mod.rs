//! Concrete entities
//!
//! Ground, walls and background belong to the session and survive restarts.
//! Player and obstacles belong to a game screen.

pub mod background;
pub mod ground;
pub mod obstacle;
pub mod player;
pub mod wall;

pub use background::Background;
pub use ground::Ground;
pub use obstacle::Obstacle;
pub use player::{Footing, Player};
pub use wall::Wall;

/// Palette (RGBA)
pub mod colors {
    pub const GROUND: [f32; 4] = [0.16, 0.42, 0.38, 1.0];
    pub const WALL: [f32; 4] = [0.10, 0.30, 0.30, 1.0];
    pub const PLAYER: [f32; 4] = [0.95, 0.85, 0.30, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.90, 0.25, 0.25, 1.0];
    pub const STAR: [f32; 4] = [0.80, 0.90, 0.90, 0.6];
}
