//! Everglades Escape - Deterministic Expedition Survival Engine

pub mod actions;
pub mod campaign;
pub mod core;
pub mod entity;
pub mod events;
pub mod scenario;
pub mod simulation;

pub use actions::{ActionCommand, ActionKind, ActionResult, InventoryOp};
pub use crate::core::error::{ActionError, ConfigError, EngineError, Result, TurnError};
pub use simulation::{Expedition, GameConfig, GameSnapshot, LossReason, SavePoint, Status, TurnReport};
