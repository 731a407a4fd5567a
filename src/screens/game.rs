//! In-game screen
//!
//! Owns the player and the obstacles of one run. Once the first jump is made
//! the view starts climbing; falling out of the bottom of the view or
//! touching a spike ends the run.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Screen, ScreenKind, Signal, SteppableScreen};
use crate::entities::obstacle::HEIGHT as OBSTACLE_HEIGHT;
use crate::entities::{Obstacle, Player};
use crate::renderer::{Align, Font};
use crate::sim::entity::{EntityId, Side};
use crate::sim::state::{GameEvent, Stage};

/// Height of the first obstacle (m)
const FIRST_OBSTACLE_Y: f32 = 12.0;

pub struct GameScreen {
    high_score: u32,
    score: u32,
    rng: Pcg32,
    player: Option<EntityId>,
    /// Live obstacles, lowest first
    obstacles: VecDeque<EntityId>,
    next_obstacle_y: f32,
    started: bool,
    over: bool,
}

impl GameScreen {
    pub fn new(high_score: u32, seed: u64) -> Self {
        Self {
            high_score,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            player: None,
            obstacles: VecDeque::new(),
            next_obstacle_y: FIRST_OBSTACLE_Y,
            started: false,
            over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Keep obstacles laid out one view ahead of the camera
    fn spawn_obstacles(&mut self, stage: &mut Stage) {
        let horizon = stage.camera.top() + stage.camera.viewport.y;
        while self.next_obstacle_y < horizon {
            let side = if self.rng.random_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            };
            let obstacle = Obstacle::new(
                &mut *stage.world,
                side,
                stage.config.world_width,
                self.next_obstacle_y,
            );
            self.obstacles.push_back(stage.spawn(Box::new(obstacle)));
            let spacing = stage.config.obstacle_spacing;
            self.next_obstacle_y += spacing * self.rng.random_range(0.7..1.3);
        }
    }

    /// Drop obstacles that scrolled out below the view
    fn despawn_passed(&mut self, stage: &mut Stage) {
        let floor = stage.camera.bottom() - OBSTACLE_HEIGHT;
        while let Some(&id) = self.obstacles.front() {
            match stage.position_of(id) {
                Some(position) if position.y >= floor => break,
                _ => {
                    stage.despawn(id);
                    self.obstacles.pop_front();
                }
            }
        }
    }
}

impl Screen for GameScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Game
    }

    fn show(&mut self, stage: &mut Stage) {
        let config = &stage.config;
        let player = Player::new(&mut *stage.world, config.world_width * 0.5, config.player_size);
        self.player = Some(stage.spawn(Box::new(player)));
        self.spawn_obstacles(stage);
        log::debug!("Game screen ready with {} obstacles", self.obstacles.len());
    }

    fn render(&mut self, stage: &mut Stage, _dt: f32) {
        let camera = stage.camera;
        let top_center = Vec2::new(camera.position.x, camera.top() - 2.0);
        stage
            .draw
            .text(self.score.to_string(), top_center, Font::H1, Align::Center);
        stage.draw.text(
            format!("BEST {}", self.high_score.max(self.score)),
            top_center - Vec2::new(0.0, 1.5),
            Font::H3,
            Align::Center,
        );
        if self.over {
            stage
                .draw
                .text("GAME OVER", camera.position, Font::H2, Align::Center);
        }
    }

    fn tap(&mut self, stage: &mut Stage) -> bool {
        if self.over {
            return false;
        }
        stage.input.jump = true;
        self.started = true;
        true
    }

    fn on_event(&mut self, _stage: &mut Stage, event: GameEvent) -> Option<Signal> {
        match event {
            GameEvent::Scored if !self.over => {
                self.score += 1;
                None
            }
            GameEvent::PlayerHit if !self.over => {
                self.over = true;
                log::info!("Run over at score {}", self.score);
                Some(Signal::GameOver { score: self.score })
            }
            _ => None,
        }
    }

    fn dispose(&mut self, stage: &mut Stage) {
        if let Some(player) = self.player.take() {
            stage.despawn(player);
        }
        for id in self.obstacles.drain(..) {
            stage.despawn(id);
        }
    }

    fn as_steppable(&mut self) -> Option<&mut dyn SteppableScreen> {
        Some(self)
    }
}

impl SteppableScreen for GameScreen {
    fn step(&mut self, stage: &mut Stage, dt: f32) {
        if self.over {
            return;
        }

        let player = self.player.and_then(|id| stage.position_of(id));
        if self.started {
            stage.camera.position.y += stage.config.scroll_speed * dt;
        }
        if let Some(position) = player {
            // The view only climbs
            if position.y > stage.camera.position.y {
                stage.camera.position.y = position.y;
            }
            let top = position.y + stage.config.player_size * 0.5;
            if top < stage.camera.bottom() {
                stage.events.push(GameEvent::PlayerHit);
            }
        }

        self.spawn_obstacles(stage);
        self.despawn_passed(stage);
    }
}
