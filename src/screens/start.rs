//! Title screen

use glam::Vec2;

use super::{Screen, ScreenKind};
use crate::renderer::{Align, Font};
use crate::sim::state::{GameEvent, Stage};

pub struct StartScreen {
    high_score: u32,
}

impl StartScreen {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl Screen for StartScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Start
    }

    fn render(&mut self, stage: &mut Stage, _dt: f32) {
        let center = stage.camera.position;
        stage
            .draw
            .text("JMP", center + Vec2::new(0.0, 4.0), Font::H1, Align::Center);
        stage
            .draw
            .text("TAP TO START", center, Font::H3, Align::Center);
        if self.high_score > 0 {
            stage.draw.text(
                format!("BEST {}", self.high_score),
                center - Vec2::new(0.0, 2.0),
                Font::H2,
                Align::Center,
            );
        }
    }

    fn tap(&mut self, stage: &mut Stage) -> bool {
        stage.events.push(GameEvent::StartRequested);
        true
    }
}
