//! Simulation core: state, time, evaluation and the turn facade

pub mod expedition;
pub mod outcome;
pub mod snapshot;
pub mod state;
pub mod time;

pub use expedition::{Expedition, GameConfig, SavePoint, TurnReport};
pub use outcome::{evaluate, LossReason, Status};
pub use snapshot::{GameSnapshot, MemberSummary};
pub use state::{ActiveEvent, GameState};
pub use time::{advance, DailySummary};
