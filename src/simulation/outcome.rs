//! Win/loss evaluation

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::campaign::map::LocationGraph;

/// Why an expedition failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    OutOfTime,
    PartyLost,
    CanoeDestroyed,
}

/// Run status. Won and Lost are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Ongoing,
    Won,
    Lost(LossReason),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Evaluate the run status.
///
/// Checks run in a fixed order so simultaneous conditions resolve the same
/// way every time: destination, time, party, canoe.
pub fn evaluate(state: &GameState, graph: &LocationGraph, canoe_required: bool) -> Status {
    let here = graph.get(state.current_location());
    let at_destination = state.current_location() == state.destination()
        || here.map(|loc| loc.is_destination).unwrap_or(false);
    if at_destination {
        return Status::Won;
    }

    if state.time_remaining() <= 0 {
        return Status::Lost(LossReason::OutOfTime);
    }

    if state.living_count() == 0 {
        return Status::Lost(LossReason::PartyLost);
    }

    let stranded = state.resources().canoe_condition <= 0.0
        && canoe_required
        && !here.map(|loc| loc.has_overland_route()).unwrap_or(false);
    if stranded {
        return Status::Lost(LossReason::CanoeDestroyed);
    }

    Status::Ongoing
}
