//! Action definitions and catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::campaign::supply::{ResourceDelta, ResourceKind, Rations};
use crate::core::error::ActionError;
use crate::core::types::{Hours, LocationId, MemberId};
use crate::entity::status::StatusEffect;
use crate::simulation::state::GameState;

/// The closed set of things a party can do in one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Travel,
    ForageAndFish,
    Hunt,
    RepairCanoe,
    Rest,
    ManageInventory,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Travel,
        ActionKind::ForageAndFish,
        ActionKind::Hunt,
        ActionKind::RepairCanoe,
        ActionKind::Rest,
        ActionKind::ManageInventory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Travel => "travel",
            ActionKind::ForageAndFish => "forage_and_fish",
            ActionKind::Hunt => "hunt",
            ActionKind::RepairCanoe => "repair_canoe",
            ActionKind::Rest => "rest",
            ActionKind::ManageInventory => "manage_inventory",
        }
    }

    /// Actions that gather food from the land
    pub fn is_provisioning(&self) -> bool {
        matches!(self, ActionKind::ForageAndFish | ActionKind::Hunt)
    }

    /// Actions that never consume time or randomness
    pub fn is_instant(&self) -> bool {
        matches!(self, ActionKind::ManageInventory)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ActionError::UnknownActionKind(s.to_string()))
    }
}

/// Zero-time reallocation of supplies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InventoryOp {
    SetRations { rations: Rations },
    Discard { resource: ResourceKind, amount: f32 },
    /// Spend herbs to cure a member's treatable effects
    TreatMember { member: MemberId },
}

/// An action kind together with its typed parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionCommand {
    Travel { to: LocationId },
    ForageAndFish,
    Hunt,
    RepairCanoe { hours: Hours },
    Rest { hours: Hours },
    ManageInventory { op: InventoryOp },
}

impl ActionCommand {
    pub fn travel(to: impl Into<String>) -> Self {
        ActionCommand::Travel {
            to: LocationId::new(to),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionCommand::Travel { .. } => ActionKind::Travel,
            ActionCommand::ForageAndFish => ActionKind::ForageAndFish,
            ActionCommand::Hunt => ActionKind::Hunt,
            ActionCommand::RepairCanoe { .. } => ActionKind::RepairCanoe,
            ActionCommand::Rest { .. } => ActionKind::Rest,
            ActionCommand::ManageInventory { .. } => ActionKind::ManageInventory,
        }
    }

    /// Parse a command line such as `travel river_fork`, `rest 12` or
    /// `manage_inventory treat api`.
    pub fn parse(line: &str) -> Result<Self, ActionError> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| ActionError::InvalidParameters("empty command".into()))?;
        let kind: ActionKind = head.parse()?;
        let args: Vec<&str> = words.collect();

        let command = match kind {
            ActionKind::Travel => ActionCommand::Travel {
                to: LocationId::new(single_arg(kind, &args)?),
            },
            ActionKind::ForageAndFish => ActionCommand::ForageAndFish,
            ActionKind::Hunt => ActionCommand::Hunt,
            ActionKind::RepairCanoe => ActionCommand::RepairCanoe {
                hours: parse_number(kind, single_arg(kind, &args)?)?,
            },
            ActionKind::Rest => ActionCommand::Rest {
                hours: parse_number(kind, single_arg(kind, &args)?)?,
            },
            ActionKind::ManageInventory => ActionCommand::ManageInventory {
                op: parse_inventory_op(&args)?,
            },
        };
        Ok(command)
    }
}

fn single_arg<'a>(kind: ActionKind, args: &[&'a str]) -> Result<&'a str, ActionError> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(ActionError::InvalidParameters(format!(
            "{} takes exactly one argument",
            kind
        ))),
    }
}

fn parse_number<T: FromStr>(kind: ActionKind, arg: &str) -> Result<T, ActionError> {
    arg.parse()
        .map_err(|_| ActionError::InvalidParameters(format!("{}: bad number '{}'", kind, arg)))
}

fn parse_inventory_op(args: &[&str]) -> Result<InventoryOp, ActionError> {
    let bad = |msg: &str| ActionError::InvalidParameters(msg.to_string());
    match args {
        ["rations", level] => Ok(InventoryOp::SetRations {
            rations: level.parse().map_err(|e: String| bad(&e))?,
        }),
        ["discard", resource, amount] => Ok(InventoryOp::Discard {
            resource: resource.parse().map_err(|e: String| bad(&e))?,
            amount: parse_number(ActionKind::ManageInventory, amount)?,
        }),
        ["treat", member] => Ok(InventoryOp::TreatMember {
            member: MemberId::new(*member),
        }),
        _ => Err(bad(
            "expected 'rations <level>', 'discard <resource> <amount>' or 'treat <member>'",
        )),
    }
}

/// A status effect gained or lost by a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub member: MemberId,
    pub status: StatusEffect,
    pub gained: bool,
}

/// Net health change of a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthChange {
    pub member: MemberId,
    pub delta: f32,
    pub died: bool,
}

/// What an action did. Produced by every resolver so callers never diff
/// state themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub kind: ActionKind,
    /// Hours the action consumes; the time advancer charges them
    pub hours: Hours,
    pub resources: ResourceDelta,
    pub description: String,
    pub status_changes: Vec<StatusChange>,
    pub health_changes: Vec<HealthChange>,
    /// Set when the party ends the action somewhere new
    pub moved_to: Option<LocationId>,
}

impl ActionResult {
    /// Build a result by comparing the state before and after an action
    pub fn between(
        kind: ActionKind,
        hours: Hours,
        before: &GameState,
        after: &GameState,
        description: impl Into<String>,
    ) -> Self {
        let (status_changes, health_changes) = party_changes(before, after);
        let moved_to = (before.current_location() != after.current_location())
            .then(|| after.current_location().clone());
        Self {
            kind,
            hours,
            resources: ResourceDelta::between(before.resources(), after.resources()),
            description: description.into(),
            status_changes,
            health_changes,
            moved_to,
        }
    }
}

/// Status and health differences, member by member in roster order
pub fn party_changes(before: &GameState, after: &GameState) -> (Vec<StatusChange>, Vec<HealthChange>) {
    let mut statuses = Vec::new();
    let mut health = Vec::new();

    for (old, new) in before.party().iter().zip(after.party()) {
        for status in StatusEffect::AILMENTS {
            let (had, has) = (old.has_status(status), new.has_status(status));
            if had != has {
                statuses.push(StatusChange {
                    member: new.id.clone(),
                    status,
                    gained: has,
                });
            }
        }

        let delta = new.health() - old.health();
        if delta != 0.0 {
            health.push(HealthChange {
                member: new.id.clone(),
                delta,
                died: old.is_alive() && !new.is_alive(),
            });
        }
    }

    (statuses, health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::supply::Resources;
    use crate::entity::member::MemberSpec;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.name().parse::<ActionKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "portage".parse::<ActionKind>(),
            Err(ActionError::UnknownActionKind("portage".into()))
        );
        assert!(matches!(
            ActionCommand::parse("dance wildly"),
            Err(ActionError::UnknownActionKind(_))
        ));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ActionCommand::parse("travel river_fork"),
            Ok(ActionCommand::travel("river_fork"))
        );
        assert_eq!(ActionCommand::parse("hunt"), Ok(ActionCommand::Hunt));
        assert_eq!(
            ActionCommand::parse("rest 12"),
            Ok(ActionCommand::Rest { hours: 12 })
        );
        assert_eq!(
            ActionCommand::parse("manage_inventory rations meager"),
            Ok(ActionCommand::ManageInventory {
                op: InventoryOp::SetRations {
                    rations: Rations::Meager
                }
            })
        );
        assert_eq!(
            ActionCommand::parse("manage_inventory discard food 2.5"),
            Ok(ActionCommand::ManageInventory {
                op: InventoryOp::Discard {
                    resource: ResourceKind::Food,
                    amount: 2.5
                }
            })
        );
    }

    #[test]
    fn test_parse_bad_parameters() {
        assert!(matches!(
            ActionCommand::parse("rest"),
            Err(ActionError::InvalidParameters(_))
        ));
        assert!(matches!(
            ActionCommand::parse("repair_canoe lots"),
            Err(ActionError::InvalidParameters(_))
        ));
        assert!(matches!(
            ActionCommand::parse("manage_inventory rations feast"),
            Err(ActionError::InvalidParameters(_))
        ));
        assert!(matches!(
            ActionCommand::parse("   "),
            Err(ActionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_result_reports_changes() {
        let before = GameState::new(
            "camp".into(),
            "mound".into(),
            &[MemberSpec::new("api"), MemberSpec::new("nokomis")],
            Resources::default(),
            240,
            24,
        );
        let mut after = before.clone();
        after.current_location = "slough".into();
        after.resources.food -= 2.0;
        after.party[1].take_damage(100.0);
        after.party[0].add_status(StatusEffect::Exhausted);

        let result = ActionResult::between(ActionKind::Travel, 10, &before, &after, "paddled");
        assert_eq!(result.moved_to, Some(LocationId::new("slough")));
        assert_eq!(result.resources.food, -2.0);
        assert_eq!(
            result.status_changes,
            vec![StatusChange {
                member: MemberId::new("api"),
                status: StatusEffect::Exhausted,
                gained: true
            }]
        );
        assert_eq!(result.health_changes.len(), 1);
        assert!(result.health_changes[0].died);
    }

    #[test]
    fn test_command_json_shape() {
        let json = serde_json::to_string(&ActionCommand::Rest { hours: 8 }).unwrap();
        assert_eq!(json, r#"{"action":"rest","hours":8}"#);
    }
}
