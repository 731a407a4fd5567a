//! Physics world
//!
//! The simulation talks to physics through [`PhysicsWorld`]. [`World`] is the
//! built-in implementation: axis-aligned boxes, gravity, static/kinematic/
//! dynamic bodies, sensors, and begin/end contact tracking.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, LINEAR_SLOP, box_box_collision};
use super::contact::ContactListener;

/// Stable handle to a body, never reused within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves
    Static,
    /// Moves by its velocity only, unaffected by gravity or contacts
    Kinematic,
    /// Fully simulated
    Dynamic,
}

/// Parameters for creating a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
    /// Sensors report contacts but never push anything
    pub sensor: bool,
    pub gravity_scale: f32,
}

impl BodyDef {
    pub fn new(kind: BodyKind, position: Vec2, half_extents: Vec2) -> Self {
        Self {
            kind,
            position,
            half_extents,
            velocity: Vec2::ZERO,
            sensor: false,
            gravity_scale: 1.0,
        }
    }

    pub fn sensor(mut self) -> Self {
        self.sensor = true;
        self
    }
}

/// A rigid box owned by the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub velocity: Vec2,
    pub sensor: bool,
    pub gravity_scale: f32,
}

impl Body {
    fn from_def(def: &BodyDef) -> Self {
        Self {
            kind: def.kind,
            position: def.position,
            half_extents: def.half_extents,
            velocity: def.velocity,
            sensor: def.sensor,
            gravity_scale: def.gravity_scale,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    /// Unit mass, so an impulse is a direct velocity change
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.kind == BodyKind::Dynamic {
            self.velocity += impulse;
        }
    }

    fn is_solid(&self) -> bool {
        !self.sensor
    }
}

/// Physics engine collaborator consumed by the simulation loop
pub trait PhysicsWorld {
    fn create_body(&mut self, def: BodyDef) -> BodyId;

    /// Remove a body. Its contacts disappear without end events.
    fn destroy_body(&mut self, id: BodyId);

    fn body(&self, id: BodyId) -> Option<&Body>;

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body>;

    /// All live bodies in creation order
    fn bodies(&self) -> Vec<BodyId>;

    fn gravity(&self) -> Vec2;

    /// Advance by exactly `dt`, reporting contact changes to `listener`
    fn step(
        &mut self,
        dt: f32,
        velocity_iterations: u32,
        position_iterations: u32,
        listener: &mut dyn ContactListener,
    );
}

/// Built-in box world
#[derive(Debug, Clone)]
pub struct World {
    gravity: Vec2,
    bodies: BTreeMap<BodyId, Body>,
    /// Pairs currently in contact, lower id first
    contacts: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: BTreeMap::new(),
            contacts: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Whether two bodies are touching as of the last step
    pub fn in_contact(&self, a: BodyId, b: BodyId) -> bool {
        self.contacts.contains(&ordered(a, b))
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.bodies.values_mut() {
            match body.kind {
                BodyKind::Static => {}
                BodyKind::Kinematic => body.position += body.velocity * dt,
                BodyKind::Dynamic => {
                    // Semi-implicit Euler
                    body.velocity += gravity * body.gravity_scale * dt;
                    body.position += body.velocity * dt;
                }
            }
        }
    }

    /// Dynamic-vs-solid pairs that need resolving, dynamic body first
    fn solver_pairs(&self) -> Vec<(BodyId, BodyId)> {
        let mut pairs = Vec::new();
        for (&a, body_a) in &self.bodies {
            if body_a.kind != BodyKind::Dynamic || !body_a.is_solid() {
                continue;
            }
            for (&b, body_b) in &self.bodies {
                if a == b || !body_b.is_solid() {
                    continue;
                }
                // Dynamic pairs are visited twice; keep one
                if body_b.kind == BodyKind::Dynamic && b < a {
                    continue;
                }
                pairs.push((a, b));
            }
        }
        pairs
    }

    fn solve_velocities(&mut self, pairs: &[(BodyId, BodyId)]) {
        for &(a, b) in pairs {
            let (Some(body_a), Some(body_b)) = (self.bodies.get(&a), self.bodies.get(&b)) else {
                continue;
            };
            let Some(manifold) = box_box_collision(&body_a.aabb(), &body_b.aabb()) else {
                continue;
            };
            let relative = body_a.velocity - body_b.velocity;
            let approach = relative.dot(manifold.normal);
            if approach >= 0.0 {
                continue;
            }
            let both_dynamic = body_b.kind == BodyKind::Dynamic;
            let correction = manifold.normal * approach;
            if both_dynamic {
                if let Some(body) = self.bodies.get_mut(&a) {
                    body.velocity -= correction * 0.5;
                }
                if let Some(body) = self.bodies.get_mut(&b) {
                    body.velocity += correction * 0.5;
                }
            } else if let Some(body) = self.bodies.get_mut(&a) {
                body.velocity -= correction;
            }
        }
    }

    fn solve_positions(&mut self, pairs: &[(BodyId, BodyId)]) {
        for &(a, b) in pairs {
            let (Some(body_a), Some(body_b)) = (self.bodies.get(&a), self.bodies.get(&b)) else {
                continue;
            };
            let Some(manifold) = box_box_collision(&body_a.aabb(), &body_b.aabb()) else {
                continue;
            };
            let depth = manifold.penetration - LINEAR_SLOP;
            if depth <= 0.0 {
                continue;
            }
            let push = manifold.normal * depth;
            if body_b.kind == BodyKind::Dynamic {
                if let Some(body) = self.bodies.get_mut(&a) {
                    body.position += push * 0.5;
                }
                if let Some(body) = self.bodies.get_mut(&b) {
                    body.position -= push * 0.5;
                }
            } else if let Some(body) = self.bodies.get_mut(&a) {
                body.position += push;
            }
        }
    }

    /// Overlapping pairs with at least one dynamic body
    fn find_contacts(&self) -> BTreeSet<(BodyId, BodyId)> {
        let mut found = BTreeSet::new();
        for (&a, body_a) in &self.bodies {
            for (&b, body_b) in self.bodies.range(BodyId(a.0 + 1)..) {
                if body_a.kind != BodyKind::Dynamic && body_b.kind != BodyKind::Dynamic {
                    continue;
                }
                if body_a.aabb().overlaps(&body_b.aabb()) {
                    found.insert((a, b));
                }
            }
        }
        found
    }
}

impl PhysicsWorld for World {
    fn create_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(id, Body::from_def(&def));
        id
    }

    fn destroy_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
        self.contacts.retain(|&(a, b)| a != id && b != id);
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    fn bodies(&self) -> Vec<BodyId> {
        self.bodies.keys().copied().collect()
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn step(
        &mut self,
        dt: f32,
        velocity_iterations: u32,
        position_iterations: u32,
        listener: &mut dyn ContactListener,
    ) {
        self.integrate(dt);

        let pairs = self.solver_pairs();
        for _ in 0..velocity_iterations {
            self.solve_velocities(&pairs);
        }
        for _ in 0..position_iterations {
            self.solve_positions(&pairs);
        }

        let current = self.find_contacts();
        let previous = std::mem::replace(&mut self.contacts, current);
        for &(a, b) in previous.difference(&self.contacts) {
            listener.end_contact(a, b);
        }
        for &(a, b) in self.contacts.difference(&previous) {
            listener.begin_contact(a, b);
        }
    }
}

fn ordered(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b { (a, b) } else { (b, a) }
}
