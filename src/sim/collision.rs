//! Box-vs-box collision detection
//!
//! Every body in the world is an axis-aligned box, so narrow phase reduces to
//! interval overlap on both axes. The axis of least penetration gives the
//! contact normal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Allowed penetration left in place after position correction.
///
/// Keeping resting bodies slightly overlapped keeps their contact alive from
/// one step to the next.
pub const LINEAR_SLOP: f32 = 0.005;

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Unit normal pointing from `b` toward `a` (the direction to push `a` out)
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub penetration: f32,
}

/// Check overlap between two boxes
///
/// Returns `None` when the boxes are separated or only touching.
pub fn box_box_collision(a: &Aabb, b: &Aabb) -> Option<Manifold> {
    if !a.overlaps(b) {
        return None;
    }

    let delta = a.center() - b.center();
    let overlap = a.half_extents() + b.half_extents() - delta.abs();

    // Resolve along the shallower axis
    if overlap.x < overlap.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        Some(Manifold {
            normal: Vec2::new(sign, 0.0),
            penetration: overlap.x,
        })
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        Some(Manifold {
            normal: Vec2::new(0.0, sign),
            penetration: overlap.y,
        })
    }
}
