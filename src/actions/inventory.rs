//! Inventory management. Instant and deterministic.

use super::catalog::{ActionKind, ActionResult, InventoryOp};
use crate::core::error::ActionError;
use crate::simulation::expedition::GameConfig;
use crate::simulation::state::GameState;

pub fn resolve(
    state: &GameState,
    op: &InventoryOp,
    config: &GameConfig,
) -> Result<(GameState, ActionResult), ActionError> {
    let mut next = state.clone();

    let description = match op {
        InventoryOp::SetRations { rations } => {
            next.rations = *rations;
            format!("Rations set to {:?}", rations)
        }
        InventoryOp::Discard { resource, amount } => {
            if !amount.is_finite() || *amount <= 0.0 {
                return Err(ActionError::InvalidParameters(format!(
                    "discard amount must be positive, got {}",
                    amount
                )));
            }
            let dropped = -next.resources.adjust(*resource, -amount);
            format!("Discarded {:.1} {}", dropped, resource)
        }
        InventoryOp::TreatMember { member } => {
            let cost = config.tunables.herbs_per_treatment;
            if state.resources().herbs < cost {
                return Err(ActionError::InvalidParameters(format!(
                    "treatment needs {} herbs, only {} carried",
                    cost,
                    state.resources().herbs
                )));
            }
            let patient = next
                .member_mut(member)
                .filter(|m| m.is_alive())
                .ok_or_else(|| {
                    ActionError::InvalidParameters(format!("no living party member {}", member))
                })?;
            let treatable: Vec<_> = patient.statuses().filter(|s| s.is_treatable()).collect();
            if treatable.is_empty() {
                return Err(ActionError::InvalidParameters(format!(
                    "{} has nothing herbs can treat",
                    member
                )));
            }
            for status in treatable {
                patient.remove_status(status);
            }
            next.resources.herbs -= cost;
            format!("Treated {} with herbs", member)
        }
    };

    let result = ActionResult::between(ActionKind::ManageInventory, 0, state, &next, description);
    Ok((next, result))
}
