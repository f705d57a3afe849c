//! Travel along an outbound edge
//!
//! Cost grows as party health and canoe condition fall. A battered canoe
//! also risks further damage on the water.

use rand::{Rng, RngCore};

use super::catalog::{ActionKind, ActionResult};
use crate::campaign::location::Edge;
use crate::campaign::supply::MAX_CANOE_CONDITION;
use crate::core::config::Tunables;
use crate::core::error::ActionError;
use crate::core::types::{Hours, LocationId};
use crate::entity::status::StatusEffect;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

/// Share of risky-water mishaps that are breaches rather than scrapes
const BREACH_SHARE: f32 = 0.3;

/// Hours needed to cover `edge` in the current state
pub fn travel_cost(state: &GameState, edge: &Edge, tunables: &Tunables) -> Hours {
    let health_factor = 1.0 + tunables.health_travel_penalty * (1.0 - state.average_health());
    let canoe_factor = if edge.mode.requires_canoe() {
        let wear = 1.0 - state.resources().canoe_condition / MAX_CANOE_CONDITION;
        1.0 + tunables.canoe_travel_penalty * wear.clamp(0.0, 1.0)
    } else {
        1.0
    };

    let hours = edge.base_hours as f32 * health_factor * canoe_factor * state.travel_multiplier();
    (hours.ceil() as Hours).max(tunables.min_travel_hours)
}

pub fn resolve(
    state: &GameState,
    to: &LocationId,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Result<(GameState, ActionResult), ActionError> {
    let tunables = &config.tunables;
    let from = state.current_location();
    let edge = config
        .graph
        .edge(from, to)
        .ok_or_else(|| ActionError::InvalidTarget {
            from: from.clone(),
            to: to.clone(),
        })?;

    let canoe = state.resources().canoe_condition;
    if edge.mode.requires_canoe() && canoe <= 0.0 {
        return Err(ActionError::InsufficientCondition { condition: canoe });
    }

    let hours = travel_cost(state, edge, tunables);
    let mut next = state.clone();

    // The budget runs out before the far bank: nobody arrives
    if hours as i64 > state.time_remaining() {
        let result = ActionResult::between(
            ActionKind::Travel,
            hours,
            state,
            &next,
            format!("Time runs out on the way to {}", to),
        );
        return Ok((next, result));
    }

    let mut notes = Vec::new();
    if edge.mode.requires_canoe() && canoe < tunables.canoe_risk_threshold && edge.risk > 0.0 {
        let roll: f32 = rng.gen();
        let breach = BREACH_SHARE * edge.risk;
        let scrape = (1.0 - BREACH_SHARE) * edge.risk;
        let damage = if roll < breach {
            notes.push("the hull is breached");
            tunables.canoe_breach_damage.roll(rng)
        } else if roll < breach + scrape {
            notes.push("the hull scrapes bottom");
            tunables.canoe_scrape_damage.roll(rng)
        } else {
            0.0
        };
        next.resources.damage_canoe(damage);
    }

    next.current_location = to.clone();

    if hours >= tunables.exhausting_travel_hours {
        for member in next.party.iter_mut() {
            member.add_status(StatusEffect::Exhausted);
        }
    }

    let mut description = format!("Travelled from {} to {} in {} hours", from, to, hours);
    for note in notes {
        description.push_str("; ");
        description.push_str(note);
    }
    let result = ActionResult::between(ActionKind::Travel, hours, state, &next, description);
    Ok((next, result))
}
