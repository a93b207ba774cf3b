//! Firework instances
//!
//! An instance is one explosion of a template snapshot at a world position.
//! Triggering is data-driven: callers construct instances and hand them to
//! the manager, which steps them against the shared particle arena.

pub mod firework_instance;
pub mod manager;

pub use firework_instance::{EmissionState, FireworkInstance};
pub use manager::InstanceManager;
