//! Contact dispatch
//!
//! The physics world reports contacts between bodies. The dispatcher resolves
//! each body to its owning entity and notifies both sides.

use super::entity::EntityRegistry;
use super::state::GameEvent;
use super::world::BodyId;

/// Receives raw contact changes from the physics world during a step
pub trait ContactListener {
    fn begin_contact(&mut self, a: BodyId, b: BodyId);

    fn end_contact(&mut self, a: BodyId, b: BodyId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Begin,
    End,
}

/// Bridges body contacts to [`Entity`](super::entity::Entity) callbacks
///
/// Contacts where either body has no owning entity (or both bodies belong to
/// the same entity) are dropped.
pub struct EntityContactDispatcher<'a> {
    entities: &'a mut EntityRegistry,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> EntityContactDispatcher<'a> {
    pub fn new(entities: &'a mut EntityRegistry, events: &'a mut Vec<GameEvent>) -> Self {
        Self { entities, events }
    }

    fn dispatch(&mut self, phase: Phase, a: BodyId, b: BodyId) {
        let (Some(entity_a), Some(entity_b)) = (self.entities.owner(a), self.entities.owner(b))
        else {
            log::trace!("Ignoring {phase:?} contact {a:?}/{b:?} without entities");
            return;
        };

        let events = &mut *self.events;
        let delivered = self.entities.with_pair(entity_a, entity_b, |first, second| match phase {
            Phase::Begin => {
                first.begin_contact(&*second, events);
                second.begin_contact(&*first, events);
            }
            Phase::End => {
                first.end_contact(&*second, events);
                second.end_contact(&*first, events);
            }
        });
        if !delivered {
            log::trace!("Ignoring {phase:?} contact within {entity_a:?}");
        }
    }
}

impl ContactListener for EntityContactDispatcher<'_> {
    fn begin_contact(&mut self, a: BodyId, b: BodyId) {
        self.dispatch(Phase::Begin, a, b);
    }

    fn end_contact(&mut self, a: BodyId, b: BodyId) {
        self.dispatch(Phase::End, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::sim::entity::tests::Probe;

    #[test]
    fn test_begin_notifies_both_sides() {
        let mut registry = EntityRegistry::new();
        let (player, player_log) = Probe::new(EntityKind::Player, Some(BodyId(1)));
        let (ground, ground_log) = Probe::new(EntityKind::Ground, Some(BodyId(2)));
        registry.insert(Box::new(player));
        registry.insert(Box::new(ground));

        let mut events = Vec::new();
        let mut dispatcher = EntityContactDispatcher::new(&mut registry, &mut events);
        dispatcher.begin_contact(BodyId(1), BodyId(2));
        dispatcher.end_contact(BodyId(2), BodyId(1));

        assert_eq!(
            *player_log.borrow(),
            vec!["begin Ground".to_string(), "end Ground".to_string()]
        );
        assert_eq!(
            *ground_log.borrow(),
            vec!["begin Player".to_string(), "end Player".to_string()]
        );
    }

    #[test]
    fn test_untagged_body_is_ignored() {
        let mut registry = EntityRegistry::new();
        let (player, player_log) = Probe::new(EntityKind::Player, Some(BodyId(1)));
        registry.insert(Box::new(player));

        let mut events = Vec::new();
        let mut dispatcher = EntityContactDispatcher::new(&mut registry, &mut events);
        dispatcher.begin_contact(BodyId(1), BodyId(9));
        dispatcher.begin_contact(BodyId(9), BodyId(1));
        dispatcher.end_contact(BodyId(8), BodyId(9));

        assert!(player_log.borrow().is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_two_bodies_of_one_entity_are_ignored() {
        let mut registry = EntityRegistry::new();
        let (player, player_log) = Probe::new(EntityKind::Player, Some(BodyId(1)));
        let id = registry.insert(Box::new(player));
        registry.attach(BodyId(2), id);

        let mut events = Vec::new();
        let mut dispatcher = EntityContactDispatcher::new(&mut registry, &mut events);
        dispatcher.begin_contact(BodyId(1), BodyId(2));
        assert!(player_log.borrow().is_empty());
    }
}
