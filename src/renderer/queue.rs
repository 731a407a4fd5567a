//! Layered draw queue
//!
//! Draw commands are collected during a frame and handed out ordered by
//! layer. Commands on the same layer keep their submission order, so text
//! queued on a high layer always lands on top of world geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Layer for world geometry
pub const LAYER_WORLD: i32 = 0;
/// Layer for background decoration
pub const LAYER_BACKGROUND: i32 = -10;
/// Layer for HUD text
pub const LAYER_TEXT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Font {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled box, `center` and `size` in world units
    Rect {
        center: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Text anchored at `pos` in world units
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        align: Align,
    },
}

#[derive(Debug, Default)]
pub struct DrawQueue {
    items: Vec<(i32, DrawCommand)>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: i32, command: DrawCommand) {
        self.items.push((layer, command));
    }

    pub fn rect(&mut self, layer: i32, center: Vec2, size: Vec2, color: [f32; 4]) {
        self.push(layer, DrawCommand::Rect { center, size, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, font: Font, align: Align) {
        self.push(
            LAYER_TEXT,
            DrawCommand::Text {
                text: text.into(),
                pos,
                font,
                align,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take this frame's commands, lowest layer first
    pub fn flush(&mut self) -> Vec<DrawCommand> {
        let mut items = std::mem::take(&mut self.items);
        // Stable sort keeps submission order within a layer
        items.sort_by_key(|(layer, _)| *layer);
        items.into_iter().map(|(_, command)| command).collect()
    }
}
