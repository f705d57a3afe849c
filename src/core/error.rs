use thiserror::Error;

use crate::core::types::{EventId, LocationId, MemberId};
use crate::simulation::outcome::Status;

/// Precondition failures raised by an action resolver.
///
/// The game state is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("no route from {from} to {to}")]
    InvalidTarget { from: LocationId, to: LocationId },

    #[error("no repair materials available at {location}")]
    MissingMaterials { location: LocationId },

    #[error("canoe condition {condition} is too low to paddle")]
    InsufficientCondition { condition: f32 },

    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),

    #[error("invalid action parameters: {0}")]
    InvalidParameters(String),
}

/// Problems detected while building a run from its configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),

    #[error("edge from {from} points at unknown location {to}")]
    UnknownEdgeTarget { from: LocationId, to: LocationId },

    #[error("destination {destination} is unreachable from {start}")]
    DisconnectedGraph { start: LocationId, destination: LocationId },

    #[error("duplicate location id: {0}")]
    DuplicateLocation(LocationId),

    #[error("duplicate party member id: {0}")]
    DuplicateMember(MemberId),

    #[error("invalid tunable: {0}")]
    InvalidTunable(String),

    #[error("invalid event template {id}: {reason}")]
    InvalidEvent { id: EventId, reason: String },

    #[error("save point does not match configuration: {0}")]
    IncompatibleSave(String),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a call to `Expedition::apply_action` produced no turn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnError {
    #[error("action rejected: {0}")]
    Rejected(#[from] ActionError),

    #[error("game over: {status:?}")]
    GameOver { status: Status },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
