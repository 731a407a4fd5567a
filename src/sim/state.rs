//! Shared simulation state
//!
//! [`Stage`] bundles what entities and screens operate on: the physics world,
//! the entity registry, the camera, the pending input and the event queue.
//! The game root owns one stage for the whole session.

use glam::Vec2;

use super::contact::EntityContactDispatcher;
use super::entity::{Entity, EntityId, EntityRegistry, RenderContext, StepContext};
use super::world::PhysicsWorld;
use crate::config::SimConfig;
use crate::renderer::{Camera, DrawCommand, DrawQueue};

/// Something that happened during a step, handled by the game root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player reached the opposite wall
    Scored,
    /// Player touched an obstacle or fell out of view
    PlayerHit,
    /// Start screen was tapped
    StartRequested,
}

/// Input commands consumed by entities during the next steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump (tap); cleared by whoever consumes it
    pub jump: bool,
}

/// World, entities and their surroundings
pub struct Stage {
    pub config: SimConfig,
    pub world: Box<dyn PhysicsWorld>,
    pub entities: EntityRegistry,
    pub camera: Camera,
    pub input: TickInput,
    pub events: Vec<GameEvent>,
    pub draw: DrawQueue,
}

impl Stage {
    pub fn new(config: SimConfig, world: Box<dyn PhysicsWorld>) -> Self {
        let camera = Camera::new(config.world_width, config.aspect);
        Self {
            config,
            world,
            entities: EntityRegistry::new(),
            camera,
            input: TickInput::default(),
            events: Vec::new(),
            draw: DrawQueue::new(),
        }
    }

    /// Register an entity built against this stage's world
    pub fn spawn(&mut self, entity: Box<dyn Entity>) -> EntityId {
        self.entities.insert(entity)
    }

    /// Unregister an entity and release its physics resources
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(mut entity) = self.entities.remove(id) {
            entity.dispose(&mut *self.world);
        }
    }

    /// Position of an entity's body
    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        let body = self.entities.get(id)?.body()?;
        self.world.body(body).map(|body| body.position)
    }

    /// Step every entity by one increment, in registration order
    pub fn step_entities(&mut self, dt: f32) {
        let Stage {
            config,
            world,
            entities,
            camera,
            input,
            events,
            ..
        } = self;
        let mut ctx = StepContext {
            world: &mut **world,
            camera,
            input,
            events,
            config,
        };
        entities.for_each_mut(|_, entity| entity.step(&mut ctx, dt));
    }

    /// Step physics by one increment, dispatching contacts to entities
    pub fn step_world(&mut self, dt: f32) {
        let mut dispatcher = EntityContactDispatcher::new(&mut self.entities, &mut self.events);
        self.world.step(
            dt,
            self.config.velocity_iterations,
            self.config.position_iterations,
            &mut dispatcher,
        );
    }

    /// Let every entity queue its draw commands
    pub fn render_entities(&mut self, dt: f32) {
        let Stage {
            world,
            entities,
            camera,
            draw,
            ..
        } = self;
        let mut ctx = RenderContext {
            world: &**world,
            camera,
            draw,
        };
        entities.for_each_mut(|_, entity| entity.render(&mut ctx, dt));
    }

    /// Take this frame's draw commands
    pub fn flush_draw(&mut self) -> Vec<DrawCommand> {
        self.draw.flush()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
