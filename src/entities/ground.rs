//! Floor the player starts on

use glam::Vec2;

use super::colors;
use crate::renderer::queue::LAYER_WORLD;
use crate::sim::entity::{Entity, EntityKind, RenderContext};
use crate::sim::world::{BodyDef, BodyId, BodyKind, PhysicsWorld};

/// Ground thickness (m)
const THICKNESS: f32 = 1.0;

/// Static slab whose top face is at y = 0
pub struct Ground {
    body: BodyId,
}

impl Ground {
    pub fn new(world: &mut dyn PhysicsWorld, width: f32) -> Self {
        let half = Vec2::new(width * 0.5, THICKNESS * 0.5);
        let body = world.create_body(BodyDef::new(
            BodyKind::Static,
            Vec2::new(width * 0.5, -THICKNESS * 0.5),
            half,
        ));
        Self { body }
    }
}

impl Entity for Ground {
    fn kind(&self) -> EntityKind {
        EntityKind::Ground
    }

    fn body(&self) -> Option<BodyId> {
        Some(self.body)
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _dt: f32) {
        let Some(body) = ctx.world.body(self.body) else {
            return;
        };
        if ctx.camera.is_visible(&body.aabb()) {
            ctx.draw
                .rect(LAYER_WORLD, body.position, body.half_extents * 2.0, colors::GROUND);
        }
    }
}
