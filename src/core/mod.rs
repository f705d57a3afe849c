pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::Calendar;
pub use config::{StatusDecay, Tunables};
pub use error::{ActionError, ConfigError, EngineError, Result, TurnError};
pub use types::{EventId, Hours, LocationId, MemberId, Span};
