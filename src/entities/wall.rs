//! Side walls
//!
//! Walls are kinematic and follow the camera vertically, so they appear
//! endless however far the view climbs.

use glam::Vec2;

use super::colors;
use crate::renderer::queue::LAYER_WORLD;
use crate::sim::entity::{Entity, EntityKind, RenderContext, Side, StepContext};
use crate::sim::world::{BodyDef, BodyId, BodyKind, PhysicsWorld};

/// Wall thickness (m)
const THICKNESS: f32 = 1.0;

pub struct Wall {
    side: Side,
    body: BodyId,
}

impl Wall {
    /// Wall whose inner face sits `offset` outside the world edge on `side`
    pub fn new(
        world: &mut dyn PhysicsWorld,
        side: Side,
        world_width: f32,
        offset: f32,
        height: f32,
    ) -> Self {
        let x = match side {
            Side::Left => -offset - THICKNESS * 0.5,
            Side::Right => world_width + offset + THICKNESS * 0.5,
        };
        let body = world.create_body(BodyDef::new(
            BodyKind::Kinematic,
            Vec2::new(x, height * 0.5),
            Vec2::new(THICKNESS * 0.5, height),
        ));
        Self { side, body }
    }
}

impl Entity for Wall {
    fn kind(&self) -> EntityKind {
        EntityKind::Wall(self.side)
    }

    fn body(&self) -> Option<BodyId> {
        Some(self.body)
    }

    fn step(&mut self, ctx: &mut StepContext<'_>, _dt: f32) {
        let camera = ctx.camera;
        if let Some(body) = ctx.world.body_mut(self.body) {
            body.position.y = camera.position.y;
            // Twice the view height keeps both ends off screen
            body.half_extents.y = camera.viewport.y;
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _dt: f32) {
        if let Some(body) = ctx.world.body(self.body) {
            ctx.draw
                .rect(LAYER_WORLD, body.position, body.half_extents * 2.0, colors::WALL);
        }
    }
}
