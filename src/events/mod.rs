//! Random and triggered events

pub mod catalog;
pub mod engine;
pub mod template;

pub use catalog::EventCatalog;
pub use engine::{maybe_fire, EventReport, FiredEvent};
pub use template::{Boost, Condition, Effect, EventCategory, EventTemplate, Modifiers};
