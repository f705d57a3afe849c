//! Resting in camp

use super::catalog::{ActionKind, ActionResult};
use crate::core::error::ActionError;
use crate::core::types::Hours;
use crate::entity::status::StatusEffect;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

/// Rest for `hours`. Healing scales with time; a long enough rest shakes
/// off exhaustion. Food is eaten by the daily upkeep as usual.
pub fn resolve(
    state: &GameState,
    hours: Hours,
    config: &GameConfig,
) -> Result<(GameState, ActionResult), ActionError> {
    let t = &config.tunables;
    if hours == 0 || hours > t.max_rest_hours {
        return Err(ActionError::InvalidParameters(format!(
            "rest takes 1 to {} hours, got {}",
            t.max_rest_hours, hours
        )));
    }

    let heal = t.rest_heal_per_day * t.days(hours);
    let recovers = hours >= t.exhaustion_recovery_hours;

    let mut next = state.clone();
    for member in next.party.iter_mut().filter(|m| m.is_alive()) {
        member.heal(heal);
        if recovers {
            member.remove_status(StatusEffect::Exhausted);
        }
    }

    let description = format!("Rested for {} hours", hours);
    let result = ActionResult::between(ActionKind::Rest, hours, state, &next, description);
    Ok((next, result))
}
