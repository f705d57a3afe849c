//! Read-only views of game state for presentation layers

use serde::{Deserialize, Serialize};

use super::outcome::Status;
use super::state::GameState;
use crate::campaign::supply::{Rations, Resources};
use crate::core::types::{EventId, Hours, LocationId, MemberId};
use crate::entity::member::PartyMember;
use crate::entity::status::StatusEffect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: MemberId,
    pub health: f32,
    pub max_health: f32,
    pub hunger: f32,
    pub statuses: Vec<StatusEffect>,
    pub alive: bool,
}

impl From<&PartyMember> for MemberSummary {
    fn from(member: &PartyMember) -> Self {
        Self {
            id: member.id.clone(),
            health: member.health(),
            max_health: member.max_health(),
            hunger: member.hunger(),
            statuses: member.statuses().collect(),
            alive: member.is_alive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEventSummary {
    pub id: EventId,
    pub remaining_days: u32,
}

/// Owned copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: u32,
    pub day: u32,
    pub hour_of_day: Hours,
    pub time_remaining_hours: i64,
    pub time_remaining_days: f32,
    pub resources: Resources,
    pub rations: Rations,
    pub party: Vec<MemberSummary>,
    pub current_location: LocationId,
    pub destination: LocationId,
    pub active_events: Vec<ActiveEventSummary>,
    pub status: Status,
}

impl GameSnapshot {
    pub fn of(state: &GameState) -> Self {
        let hours_per_day = state.calendar().hours_per_day().max(1);
        Self {
            turn: state.turn(),
            day: state.day(),
            hour_of_day: state.hour_of_day(),
            time_remaining_hours: state.time_remaining(),
            time_remaining_days: state.time_remaining() as f32 / hours_per_day as f32,
            resources: state.resources().clone(),
            rations: state.rations(),
            party: state.party().iter().map(MemberSummary::from).collect(),
            current_location: state.current_location().clone(),
            destination: state.destination().clone(),
            active_events: state
                .active_events()
                .iter()
                .map(|e| ActiveEventSummary {
                    id: e.id.clone(),
                    remaining_days: e.remaining_days,
                })
                .collect(),
            status: state.status(),
        }
    }

    pub fn living_count(&self) -> usize {
        self.party.iter().filter(|m| m.alive).count()
    }
}
