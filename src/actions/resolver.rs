//! Resolver lookup
//!
//! Every action kind maps to exactly one resolver. Resolvers are pure:
//! they read the current state and return a successor plus a result, or an
//! error with the state untouched. Adding an action means adding a variant
//! and an arm here; the turn sequencing never changes.

use rand::RngCore;
use tracing::debug;

use super::catalog::{ActionCommand, ActionResult};
use super::{foraging, inventory, repair, rest, travel};
use crate::core::error::ActionError;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

pub fn resolve(
    state: &GameState,
    command: &ActionCommand,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Result<(GameState, ActionResult), ActionError> {
    let (next, result) = match command {
        ActionCommand::Travel { to } => travel::resolve(state, to, config, rng),
        ActionCommand::ForageAndFish => foraging::forage(state, config, rng),
        ActionCommand::Hunt => foraging::hunt(state, config, rng),
        ActionCommand::RepairCanoe { hours } => repair::resolve(state, *hours, config),
        ActionCommand::Rest { hours } => rest::resolve(state, *hours, config),
        ActionCommand::ManageInventory { op } => inventory::resolve(state, op, config),
    }?;

    debug!(
        action = %result.kind,
        hours = result.hours,
        location = %next.current_location(),
        "action resolved"
    );
    Ok((next, result))
}

/// Resolve a command given by name, e.g. `"rest 12"`
pub fn resolve_named(
    state: &GameState,
    line: &str,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Result<(GameState, ActionResult), ActionError> {
    let command = ActionCommand::parse(line)?;
    resolve(state, &command, config, rng)
}
