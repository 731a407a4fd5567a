//! Entity model
//!
//! Entities are the polymorphic objects living in the simulation: they step
//! with the fixed increment, render once per frame and hear about contacts
//! between their bodies. The registry owns them and maps physics bodies back
//! to their owning entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, TickInput};
use super::world::{BodyId, PhysicsWorld};
use crate::config::SimConfig;
use crate::renderer::{Camera, DrawQueue};

/// Stable handle to a registered entity, never reused within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Which wall something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction pointing away from this wall
    pub fn away(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Concrete entity variant, used to react to the other party of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ground,
    Background,
    Wall(Side),
    Player,
    Obstacle(Side),
}

/// Everything an entity may touch during a fixed step
pub struct StepContext<'a> {
    pub world: &'a mut dyn PhysicsWorld,
    pub camera: &'a Camera,
    pub input: &'a mut TickInput,
    pub events: &'a mut Vec<GameEvent>,
    pub config: &'a SimConfig,
}

/// Everything an entity may touch while rendering
pub struct RenderContext<'a> {
    pub world: &'a dyn PhysicsWorld,
    pub camera: &'a Camera,
    pub draw: &'a mut DrawQueue,
}

/// A simulation object
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// Physics body owned by this entity, if any
    fn body(&self) -> Option<BodyId> {
        None
    }

    /// Advance by one fixed increment
    fn step(&mut self, _ctx: &mut StepContext<'_>, _dt: f32) {}

    /// Queue draw commands for this frame (`dt` is the raw frame delta)
    fn render(&mut self, _ctx: &mut RenderContext<'_>, _dt: f32) {}

    fn begin_contact(&mut self, _other: &dyn Entity, _events: &mut Vec<GameEvent>) {}

    fn end_contact(&mut self, _other: &dyn Entity, _events: &mut Vec<GameEvent>) {}

    /// Return to the state of a fresh game
    fn reset(&mut self, _world: &mut dyn PhysicsWorld) {}

    /// Release physics resources
    fn dispose(&mut self, world: &mut dyn PhysicsWorld) {
        if let Some(body) = self.body() {
            world.destroy_body(body);
        }
    }
}

/// Owner of all live entities
#[derive(Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Box<dyn Entity>>,
    owners: BTreeMap<BodyId, EntityId>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, attaching its body if it has one
    pub fn insert(&mut self, entity: Box<dyn Entity>) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        if let Some(body) = entity.body() {
            self.owners.insert(body, id);
        }
        self.entities.insert(id, entity);
        id
    }

    /// Associate an additional body with an entity
    pub fn attach(&mut self, body: BodyId, id: EntityId) {
        self.owners.insert(body, id);
    }

    /// Unregister an entity and every body association pointing at it
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Entity>> {
        let entity = self.entities.remove(&id)?;
        self.owners.retain(|_, owner| *owner != id);
        Some(entity)
    }

    /// Entity owning `body`, if the body belongs to one
    pub fn owner(&self, body: BodyId) -> Option<EntityId> {
        self.owners.get(&body).copied()
    }

    pub fn get(&self, id: EntityId) -> Option<&dyn Entity> {
        self.entities.get(&id).map(|entity| entity.as_ref())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(&id).map(|entity| entity.as_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Live ids in registration order
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Visit every entity in registration order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(EntityId, &mut dyn Entity)) {
        for (&id, entity) in self.entities.iter_mut() {
            f(id, entity.as_mut());
        }
    }

    /// Borrow two distinct entities mutably at once
    ///
    /// Returns false (without calling `f`) if the ids are equal or either is
    /// not registered.
    pub fn with_pair(
        &mut self,
        a: EntityId,
        b: EntityId,
        f: impl FnOnce(&mut dyn Entity, &mut dyn Entity),
    ) -> bool {
        if a == b || !self.entities.contains_key(&b) {
            return false;
        }
        let Some(mut first) = self.entities.remove(&a) else {
            return false;
        };
        if let Some(second) = self.entities.get_mut(&b) {
            f(first.as_mut(), second.as_mut());
        }
        self.entities.insert(a, first);
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Entity that records every callback it receives
    pub(crate) struct Probe {
        pub kind: EntityKind,
        pub body: Option<BodyId>,
        pub log: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        pub(crate) fn new(kind: EntityKind, body: Option<BodyId>) -> (Self, Rc<RefCell<Vec<String>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    kind,
                    body,
                    log: log.clone(),
                },
                log,
            )
        }
    }

    impl Entity for Probe {
        fn kind(&self) -> EntityKind {
            self.kind
        }

        fn body(&self) -> Option<BodyId> {
            self.body
        }

        fn step(&mut self, _ctx: &mut StepContext<'_>, dt: f32) {
            self.log.borrow_mut().push(format!("step {dt}"));
        }

        fn render(&mut self, _ctx: &mut RenderContext<'_>, _dt: f32) {
            self.log.borrow_mut().push("render".to_string());
        }

        fn begin_contact(&mut self, other: &dyn Entity, _events: &mut Vec<GameEvent>) {
            self.log.borrow_mut().push(format!("begin {:?}", other.kind()));
        }

        fn end_contact(&mut self, other: &dyn Entity, _events: &mut Vec<GameEvent>) {
            self.log.borrow_mut().push(format!("end {:?}", other.kind()));
        }
    }

    #[test]
    fn test_insert_attaches_body() {
        let mut registry = EntityRegistry::new();
        let (probe, _) = Probe::new(EntityKind::Ground, Some(BodyId(7)));
        let id = registry.insert(Box::new(probe));
        assert_eq!(registry.owner(BodyId(7)), Some(id));
        assert_eq!(registry.owner(BodyId(8)), None);
        assert_eq!(registry.get(id).map(|e| e.kind()), Some(EntityKind::Ground));
    }

    #[test]
    fn test_remove_detaches_all_bodies() {
        let mut registry = EntityRegistry::new();
        let (probe, _) = Probe::new(EntityKind::Player, Some(BodyId(1)));
        let id = registry.insert(Box::new(probe));
        registry.attach(BodyId(2), id);

        assert!(registry.remove(id).is_some());
        assert_eq!(registry.owner(BodyId(1)), None);
        assert_eq!(registry.owner(BodyId(2)), None);
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut registry = EntityRegistry::new();
        let (probe, _) = Probe::new(EntityKind::Background, None);
        let first = registry.insert(Box::new(probe));
        registry.remove(first);
        let (probe, _) = Probe::new(EntityKind::Background, None);
        let second = registry.insert(Box::new(probe));
        assert_ne!(first, second);
    }

    #[test]
    fn test_with_pair_sees_both() {
        let mut registry = EntityRegistry::new();
        let (a, log_a) = Probe::new(EntityKind::Player, None);
        let (b, log_b) = Probe::new(EntityKind::Ground, None);
        let a = registry.insert(Box::new(a));
        let b = registry.insert(Box::new(b));

        let mut events = Vec::new();
        let called = registry.with_pair(a, b, |ea, eb| {
            ea.begin_contact(&*eb, &mut events);
            eb.begin_contact(&*ea, &mut events);
        });
        assert!(called);
        assert_eq!(*log_a.borrow(), vec!["begin Ground".to_string()]);
        assert_eq!(*log_b.borrow(), vec!["begin Player".to_string()]);
        // Entity was put back
        assert!(registry.contains(a));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_with_pair_rejects_same_or_missing() {
        let mut registry = EntityRegistry::new();
        let (a, _) = Probe::new(EntityKind::Player, None);
        let a = registry.insert(Box::new(a));
        assert!(!registry.with_pair(a, a, |_, _| panic!("same entity")));
        assert!(!registry.with_pair(a, EntityId(99), |_, _| panic!("missing")));
        assert!(!registry.with_pair(EntityId(99), a, |_, _| panic!("missing")));
        assert!(registry.contains(a));
    }
}
