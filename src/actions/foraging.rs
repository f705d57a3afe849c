//! Foraging, fishing and hunting
//!
//! Both outings take a fixed number of hours and roll once for success.
//! The odds depend on what the location offers, how fit the party is and
//! the state of the tool used.

use rand::{Rng, RngCore};

use super::catalog::{ActionKind, ActionResult};
use crate::campaign::location::{Hazard, Location, ResourceTag};
use crate::campaign::supply::{ResourceKind, ToolKind};
use crate::core::config::Tunables;
use crate::core::error::ActionError;
use crate::entity::status::StatusEffect;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

/// Chance that an outing succeeds, capped below certainty
pub fn success_chance(state: &GameState, abundance: f32, tool: ToolKind, tunables: &Tunables) -> f32 {
    let fitness = state.work_capacity() * (0.5 + 0.5 * state.average_health());
    let tool_factor = state.resources().tool_factor(tool, tunables.tool_bonus);
    (abundance * fitness * tool_factor).clamp(0.0, tunables.max_success_chance)
}

fn current_location<'a>(state: &GameState, config: &'a GameConfig) -> Result<&'a Location, ActionError> {
    config.graph.get(state.current_location()).ok_or_else(|| {
        ActionError::InvalidParameters(format!(
            "party is at unknown location {}",
            state.current_location()
        ))
    })
}

pub fn forage(
    state: &GameState,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Result<(GameState, ActionResult), ActionError> {
    let t = &config.tunables;
    let location = current_location(state, config)?;
    let abundance = location
        .resources
        .iter()
        .filter(|spot| spot.tag.is_forageable())
        .map(|spot| spot.abundance)
        .fold(0.0, f32::max);

    let chance = success_chance(state, abundance, ToolKind::FishingGear, t);
    let tool_factor = state.resources().tool_factor(ToolKind::FishingGear, t.tool_bonus);
    let mut next = state.clone();

    let description = if rng.gen::<f32>() < chance {
        let food = t.forage_yield.roll(rng) * tool_factor * state.forage_multiplier();
        next.resources.adjust(ResourceKind::Food, food);
        if location.has_resource(ResourceTag::Herbs) {
            next.resources.adjust(ResourceKind::Herbs, t.herb_yield);
        }
        format!("Foraged and fished at {}: {:.1} food", location.id, food)
    } else {
        next.resources.adjust(ResourceKind::Food, -t.forage_failure_waste);
        format!("Foraging at {} came up empty", location.id)
    };
    next.resources.wear_tool(ToolKind::FishingGear, t.tool_wear);

    let result = ActionResult::between(ActionKind::ForageAndFish, t.forage_hours, state, &next, description);
    Ok((next, result))
}

pub fn hunt(
    state: &GameState,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Result<(GameState, ActionResult), ActionError> {
    let t = &config.tunables;
    let location = current_location(state, config)?;
    let abundance = location.abundance(ResourceTag::SmallGame);

    let chance = success_chance(state, abundance, ToolKind::HuntingSpear, t);
    let tool_factor = state.resources().tool_factor(ToolKind::HuntingSpear, t.tool_bonus);
    let mut next = state.clone();

    let description = if rng.gen::<f32>() < chance {
        let food = t.hunt_yield.roll(rng) * tool_factor * state.forage_multiplier();
        next.resources.adjust(ResourceKind::Food, food);
        format!("Hunted at {}: {:.1} food", location.id, food)
    } else {
        next.resources.adjust(ResourceKind::Food, -t.hunt_failure_waste);

        let mut snakebite = t.snakebite_chance;
        if location.has_hazard(Hazard::Snakes) {
            snakebite += t.snake_hazard_bonus;
        }
        let living = next.living_indices();
        let bitten = !living.is_empty() && rng.gen::<f32>() < snakebite.min(1.0);
        if bitten {
            let idx = living[rng.gen_range(0..living.len())];
            let damage = t.snakebite_damage.roll(rng);
            let member = &mut next.party[idx];
            member.take_damage(damage);
            member.add_status(StatusEffect::Snakebitten);
            format!("The hunt failed and {} was bitten by a snake", member.id)
        } else {
            format!("The hunt at {} failed", location.id)
        }
    };
    next.resources.wear_tool(ToolKind::HuntingSpear, t.tool_wear);

    let result = ActionResult::between(ActionKind::Hunt, t.hunt_hours, state, &next, description);
    Ok((next, result))
}
