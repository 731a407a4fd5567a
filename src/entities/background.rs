//! Star field behind the world
//!
//! Stars are laid out once per tile from a seeded RNG and repeated
//! vertically. The field scrolls slower than the camera and drifts slowly on
//! its own.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::colors;
use crate::renderer::queue::LAYER_BACKGROUND;
use crate::sim::entity::{Entity, EntityKind, RenderContext, StepContext};
use crate::sim::world::PhysicsWorld;

const STARS_PER_TILE: usize = 40;
const STAR_SIZE: f32 = 0.12;
/// Fraction of camera movement the field follows
const PARALLAX: f32 = 0.5;
/// Downward drift (m/s)
const DRIFT_SPEED: f32 = 0.2;

pub struct Background {
    /// Star positions within one tile, tile origin at bottom-left
    stars: Vec<Vec2>,
    tile: Vec2,
    drift: f32,
}

impl Background {
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STARS_PER_TILE)
            .map(|_| Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height)))
            .collect();
        Self {
            stars,
            tile: Vec2::new(width, height),
            drift: 0.0,
        }
    }

    pub fn drift(&self) -> f32 {
        self.drift
    }
}

impl Entity for Background {
    fn kind(&self) -> EntityKind {
        EntityKind::Background
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>, dt: f32) {
        self.drift = (self.drift + DRIFT_SPEED * dt) % self.tile.y;
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _dt: f32) {
        let bottom = ctx.camera.bottom();
        let top = ctx.camera.top();
        // Field-space offset of the view
        let shift = bottom * (1.0 - PARALLAX) + self.drift;
        let first_tile = ((bottom - shift) / self.tile.y).floor() as i32;
        let last_tile = ((top - shift) / self.tile.y).ceil() as i32;

        for tile in first_tile..=last_tile {
            let origin = shift + tile as f32 * self.tile.y;
            for star in &self.stars {
                let y = origin + star.y;
                if y >= bottom && y <= top {
                    ctx.draw.rect(
                        LAYER_BACKGROUND,
                        Vec2::new(star.x, y),
                        Vec2::splat(STAR_SIZE),
                        colors::STAR,
                    );
                }
            }
        }
    }

    fn reset(&mut self, _world: &mut dyn PhysicsWorld) {
        self.drift = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Camera, DrawQueue};
    use crate::sim::world::World;

    #[test]
    fn test_layout_is_deterministic() {
        let a = Background::new(7, 20.0, 30.0);
        let b = Background::new(7, 20.0, 30.0);
        assert_eq!(a.stars, b.stars);
        assert!(a.stars.iter().all(|s| s.x >= 0.0 && s.x < 20.0));
    }

    #[test]
    fn test_renders_only_visible_stars() {
        let mut background = Background::new(1, 20.0, 30.0);
        let world = World::new(Vec2::ZERO);
        let mut camera = Camera::new(20.0, 1.5);
        camera.position.y = 500.0;
        let mut draw = DrawQueue::new();
        let mut ctx = RenderContext {
            world: &world,
            camera: &camera,
            draw: &mut draw,
        };
        background.render(&mut ctx, 0.016);

        // One tile covers the view exactly, so roughly one tile of stars shows
        let count = draw.len();
        assert!(count > 0 && count <= STARS_PER_TILE * 2, "drew {count}");
        for command in draw.flush() {
            if let crate::renderer::DrawCommand::Rect { center, .. } = command {
                assert!(center.y >= camera.bottom() && center.y <= camera.top());
            }
        }
    }

    #[test]
    fn test_reset_clears_drift() {
        let mut background = Background::new(1, 20.0, 30.0);
        background.drift = 4.0;
        let mut world = World::new(Vec2::ZERO);
        background.reset(&mut world);
        assert_eq!(background.drift(), 0.0);
    }
}
