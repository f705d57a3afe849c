//! Actions a party can take, one resolver per kind

pub mod catalog;
pub mod foraging;
pub mod inventory;
pub mod repair;
pub mod resolver;
pub mod rest;
pub mod travel;

pub use catalog::{
    ActionCommand, ActionKind, ActionResult, HealthChange, InventoryOp, StatusChange,
};
pub use resolver::{resolve, resolve_named};
