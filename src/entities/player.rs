//! The player
//!
//! The player clings to whatever wall it lands on. A jump launches it toward
//! the opposite wall; reaching it scores. Obstacles end the run.

use glam::Vec2;

use super::colors;
use crate::renderer::queue::LAYER_WORLD;
use crate::sim::entity::{Entity, EntityKind, RenderContext, Side, StepContext};
use crate::sim::state::GameEvent;
use crate::sim::world::{BodyDef, BodyId, BodyKind, PhysicsWorld};

/// What the player is standing on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footing {
    Ground,
    Wall(Side),
    Air,
}

pub struct Player {
    body: BodyId,
    footing: Footing,
    /// Last wall reached; reaching the other one scores
    last_wall: Option<Side>,
    hit: bool,
}

impl Player {
    /// Player resting on the ground at `x`
    pub fn new(world: &mut dyn PhysicsWorld, x: f32, size: f32) -> Self {
        let start = Vec2::new(x, size * 0.5);
        let body = world.create_body(BodyDef::new(
            BodyKind::Dynamic,
            start,
            Vec2::splat(size * 0.5),
        ));
        Self {
            body,
            footing: Footing::Ground,
            last_wall: None,
            hit: false,
        }
    }

    pub fn footing(&self) -> Footing {
        self.footing
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Horizontal direction of the next jump
    fn jump_direction(&self) -> Option<f32> {
        match self.footing {
            // Head for the wall not reached last
            Footing::Ground => Some(match self.last_wall {
                Some(side) => side.away(),
                None => 1.0,
            }),
            Footing::Wall(side) => Some(side.away()),
            Footing::Air => None,
        }
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn body(&self) -> Option<BodyId> {
        Some(self.body)
    }

    fn step(&mut self, ctx: &mut StepContext<'_>, _dt: f32) {
        let jump = std::mem::take(&mut ctx.input.jump);
        let Some(body) = ctx.world.body_mut(self.body) else {
            return;
        };

        if self.hit {
            return;
        }

        if jump {
            if let Some(direction) = self.jump_direction() {
                body.velocity = Vec2::new(
                    direction * ctx.config.jump_speed_x,
                    ctx.config.jump_speed_y,
                );
                body.gravity_scale = 1.0;
                self.footing = Footing::Air;
                return;
            }
        }

        if let Footing::Wall(_) = self.footing {
            body.velocity = Vec2::ZERO;
            body.gravity_scale = 0.0;
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _dt: f32) {
        if let Some(body) = ctx.world.body(self.body) {
            ctx.draw
                .rect(LAYER_WORLD, body.position, body.half_extents * 2.0, colors::PLAYER);
        }
    }

    fn begin_contact(&mut self, other: &dyn Entity, events: &mut Vec<GameEvent>) {
        match other.kind() {
            EntityKind::Wall(side) => {
                self.footing = Footing::Wall(side);
                if self.last_wall != Some(side) {
                    self.last_wall = Some(side);
                    events.push(GameEvent::Scored);
                }
            }
            EntityKind::Ground => {
                if self.footing == Footing::Air {
                    self.footing = Footing::Ground;
                }
            }
            EntityKind::Obstacle(_) => {
                if !self.hit {
                    self.hit = true;
                    events.push(GameEvent::PlayerHit);
                }
            }
            EntityKind::Player | EntityKind::Background => {}
        }
    }

    fn end_contact(&mut self, other: &dyn Entity, _events: &mut Vec<GameEvent>) {
        match (other.kind(), self.footing) {
            (EntityKind::Wall(side), Footing::Wall(current)) if side == current => {
                self.footing = Footing::Air;
            }
            (EntityKind::Ground, Footing::Ground) => self.footing = Footing::Air,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entities::{Obstacle, Wall};
    use crate::renderer::Camera;
    use crate::sim::state::TickInput;
    use crate::sim::world::World;

    fn step(player: &mut Player, world: &mut World, input: &mut TickInput) -> Vec<GameEvent> {
        let config = SimConfig::default();
        let camera = Camera::new(20.0, 1.5);
        let mut events = Vec::new();
        let mut ctx = StepContext {
            world,
            camera: &camera,
            input,
            events: &mut events,
            config: &config,
        };
        player.step(&mut ctx, config.time_step);
        events
    }

    #[test]
    fn test_first_jump_goes_right() {
        let mut world = World::new(Vec2::new(0.0, -25.0));
        let mut player = Player::new(&mut world, 10.0, 1.0);
        let mut input = TickInput { jump: true };
        step(&mut player, &mut world, &mut input);

        assert!(!input.jump, "jump input is consumed");
        assert_eq!(player.footing(), Footing::Air);
        let velocity = world.body(player.body).unwrap().velocity;
        assert!(velocity.x > 0.0 && velocity.y > 0.0);
    }

    #[test]
    fn test_jump_in_air_is_dropped() {
        let mut world = World::new(Vec2::new(0.0, -25.0));
        let mut player = Player::new(&mut world, 10.0, 1.0);
        player.footing = Footing::Air;
        let mut input = TickInput { jump: true };
        step(&mut player, &mut world, &mut input);
        assert!(!input.jump);
        assert_eq!(world.body(player.body).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reaching_walls_scores_once_per_side() {
        let mut world = World::new(Vec2::ZERO);
        let mut player = Player::new(&mut world, 10.0, 1.0);
        let left = Wall::new(&mut world, Side::Left, 20.0, 0.05, 30.0);
        let right = Wall::new(&mut world, Side::Right, 20.0, 0.05, 30.0);

        let mut events = Vec::new();
        player.begin_contact(&right, &mut events);
        assert_eq!(player.footing(), Footing::Wall(Side::Right));
        player.end_contact(&right, &mut events);
        // Bouncing back onto the same wall does not score
        player.begin_contact(&right, &mut events);
        player.end_contact(&right, &mut events);
        player.begin_contact(&left, &mut events);
        assert_eq!(events, vec![GameEvent::Scored, GameEvent::Scored]);
    }

    #[test]
    fn test_clings_and_jumps_away_from_wall() {
        let mut world = World::new(Vec2::new(0.0, -25.0));
        let mut player = Player::new(&mut world, 10.0, 1.0);
        let right = Wall::new(&mut world, Side::Right, 20.0, 0.05, 30.0);
        let mut events = Vec::new();
        player.begin_contact(&right, &mut events);

        let mut input = TickInput::default();
        step(&mut player, &mut world, &mut input);
        let body = world.body(player.body).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.gravity_scale, 0.0);

        input.jump = true;
        step(&mut player, &mut world, &mut input);
        let body = world.body(player.body).unwrap();
        assert!(body.velocity.x < 0.0);
        assert_eq!(body.gravity_scale, 1.0);
    }

    #[test]
    fn test_jump_from_ground_heads_for_other_wall() {
        let mut world = World::new(Vec2::new(0.0, -25.0));
        let mut player = Player::new(&mut world, 10.0, 1.0);
        let ground = crate::entities::Ground::new(&mut world, 20.0);
        let left = Wall::new(&mut world, Side::Left, 20.0, 0.05, 30.0);
        let mut events = Vec::new();
        player.begin_contact(&left, &mut events);
        player.end_contact(&left, &mut events);
        assert_eq!(player.footing(), Footing::Air);
        player.begin_contact(&ground, &mut events);
        assert_eq!(player.footing(), Footing::Ground);

        let mut input = TickInput { jump: true };
        step(&mut player, &mut world, &mut input);
        assert!(world.body(player.body).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_obstacle_hits_once() {
        let mut world = World::new(Vec2::ZERO);
        let mut player = Player::new(&mut world, 10.0, 1.0);
        let spike = Obstacle::new(&mut world, Side::Left, 20.0, 5.0);
        let mut events = Vec::new();
        player.begin_contact(&spike, &mut events);
        player.begin_contact(&spike, &mut events);
        assert_eq!(events, vec![GameEvent::PlayerHit]);
        assert!(player.is_hit());

        // A hit player ignores further jumps
        let mut input = TickInput { jump: true };
        step(&mut player, &mut world, &mut input);
        assert!(!input.jump);
        assert_eq!(world.body(player.body).unwrap().velocity, Vec2::ZERO);
    }
}
