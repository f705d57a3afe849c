//! Canoe repair

use super::catalog::{ActionKind, ActionResult};
use crate::campaign::location::ResourceTag;
use crate::campaign::supply::{ResourceKind, ToolKind};
use crate::core::error::ActionError;
use crate::core::types::Hours;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

/// Spend `hours` patching the canoe.
///
/// Timber at the current location is free to use; elsewhere the party burns
/// carried materials. Deterministic: no randomness is drawn.
pub fn resolve(
    state: &GameState,
    hours: Hours,
    config: &GameConfig,
) -> Result<(GameState, ActionResult), ActionError> {
    let t = &config.tunables;
    if hours < t.min_repair_hours || hours > t.max_repair_hours {
        return Err(ActionError::InvalidParameters(format!(
            "repair takes {} to {} hours, got {}",
            t.min_repair_hours, t.max_repair_hours, hours
        )));
    }

    let here = state.current_location();
    let has_timber = config
        .graph
        .get(here)
        .map(|loc| loc.has_resource(ResourceTag::Timber))
        .unwrap_or(false);

    let mut next = state.clone();
    if !has_timber {
        if state.resources().materials < t.materials_per_repair {
            return Err(ActionError::MissingMaterials {
                location: here.clone(),
            });
        }
        next.resources.adjust(ResourceKind::Materials, -t.materials_per_repair);
    }

    let kit = state.resources().tool_factor(ToolKind::RepairKit, t.tool_bonus);
    let amount = (t.repair_per_hour * hours as f32 * kit).min(t.max_repair_per_action);
    let restored = next.resources.repair_canoe(amount);
    next.resources.wear_tool(ToolKind::RepairKit, t.tool_wear);

    let source = if has_timber { "local timber" } else { "carried materials" };
    let description = format!(
        "Repaired the canoe with {} over {} hours (+{:.1})",
        source, hours, restored
    );
    let result = ActionResult::between(ActionKind::RepairCanoe, hours, state, &next, description);
    Ok((next, result))
}
