//! Spikes sticking out of a wall

use glam::Vec2;

use super::colors;
use crate::renderer::queue::LAYER_WORLD;
use crate::sim::entity::{Entity, EntityKind, RenderContext, Side};
use crate::sim::world::{BodyDef, BodyId, BodyKind, PhysicsWorld};

/// How far a spike reaches into the world (m)
pub const REACH: f32 = 1.2;
/// Vertical extent of a spike (m)
pub const HEIGHT: f32 = 1.2;

/// Static sensor; touching it ends the run
pub struct Obstacle {
    side: Side,
    body: BodyId,
}

impl Obstacle {
    /// Spike on the `side` wall centered at height `y`
    pub fn new(world: &mut dyn PhysicsWorld, side: Side, world_width: f32, y: f32) -> Self {
        let x = match side {
            Side::Left => REACH * 0.5,
            Side::Right => world_width - REACH * 0.5,
        };
        let body = world.create_body(
            BodyDef::new(
                BodyKind::Static,
                Vec2::new(x, y),
                Vec2::new(REACH * 0.5, HEIGHT * 0.5),
            )
            .sensor(),
        );
        Self { side, body }
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle(self.side)
    }

    fn body(&self) -> Option<BodyId> {
        Some(self.body)
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _dt: f32) {
        let Some(body) = ctx.world.body(self.body) else {
            return;
        };
        if ctx.camera.is_visible(&body.aabb()) {
            ctx.draw.rect(
                LAYER_WORLD,
                body.position,
                body.half_extents * 2.0,
                colors::OBSTACLE,
            );
        }
    }
}
