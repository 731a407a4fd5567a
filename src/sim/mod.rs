//! Simulation module
//!
//! Everything that advances with simulated time lives here:
//! - Fixed timestep only (`clock`, `timer`)
//! - Suspend with a one-shot continuation (`suspend`)
//! - Box physics with begin/end contacts (`world`, `collision`)
//! - Entities and contact dispatch keyed by stable ids (`entity`, `contact`)

pub mod clock;
pub mod collision;
pub mod contact;
pub mod entity;
pub mod state;
pub mod suspend;
pub mod timer;
pub mod world;

pub use clock::FixedClock;
pub use collision::{Aabb, LINEAR_SLOP, Manifold, box_box_collision};
pub use contact::{ContactListener, EntityContactDispatcher};
pub use entity::{Entity, EntityId, EntityKind, EntityRegistry, RenderContext, Side, StepContext};
pub use state::{GameEvent, Stage, TickInput};
pub use suspend::{SuspendError, Suspender};
pub use timer::Timer;
pub use world::{Body, BodyDef, BodyId, BodyKind, PhysicsWorld, World};
