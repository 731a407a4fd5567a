//! Headless rendering front
//!
//! Entities and screens describe what to draw as layered commands. A host
//! (window, test, replay tool) drains the queue once per frame.

pub mod camera;
pub mod queue;

pub use camera::Camera;
pub use queue::{Align, DrawCommand, DrawQueue, Font};
