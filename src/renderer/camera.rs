//! Orthographic camera in world units

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::collision::Aabb;

/// Camera over the world, `position` is the center of the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    /// Camera showing `world_width` meters across with the given aspect
    /// (height / width), anchored at the world origin
    pub fn new(world_width: f32, aspect: f32) -> Self {
        let viewport = Vec2::new(world_width, world_width * aspect);
        Self {
            position: viewport * 0.5,
            viewport,
        }
    }

    /// Keep the world width, follow the surface aspect
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        if width_px == 0 {
            return;
        }
        self.viewport.y = self.viewport.x * height_px as f32 / width_px as f32;
    }

    /// Back to the origin-anchored view
    pub fn reset(&mut self) {
        self.position = self.viewport * 0.5;
    }

    pub fn bottom(&self) -> f32 {
        self.position.y - self.viewport.y * 0.5
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.viewport.y * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.viewport * 0.5)
    }

    pub fn is_visible(&self, aabb: &Aabb) -> bool {
        self.bounds().overlaps(aabb)
    }

    /// Meters covered by one pixel for a surface `width_px` wide
    pub fn pixel_width(&self, width_px: u32) -> f32 {
        self.viewport.x / width_px.max(1) as f32
    }
}
