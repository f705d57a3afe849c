//! Game state - the single mutable aggregate of a run
//!
//! Everything outside the crate reads state through the accessors below.
//! Fields are crate-visible so resolvers, the event engine and the time
//! advancer can derive successor states; nothing else mutates them.

use serde::{Deserialize, Serialize};

use super::outcome::Status;
use crate::actions::catalog::ActionKind;
use crate::campaign::supply::{Rations, Resources};
use crate::core::calendar::Calendar;
use crate::core::types::{EventId, Hours, LocationId, MemberId};
use crate::entity::member::{MemberSpec, PartyMember};
use crate::events::template::{Effect, EventCategory, Modifiers};

/// A persistent event still in effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub id: EventId,
    pub category: EventCategory,
    /// Day boundaries left before the event expires
    pub remaining_days: u32,
    pub modifiers: Modifiers,
    /// Re-applied once per day while the event lasts
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) calendar: Calendar,
    /// Hours left in the budget. Goes negative only when the last action
    /// overran it; evaluation turns that into a loss.
    pub(crate) time_remaining: i64,
    pub(crate) resources: Resources,
    /// Roster order, stable for the whole run
    pub(crate) party: Vec<PartyMember>,
    pub(crate) current_location: LocationId,
    pub(crate) destination: LocationId,
    pub(crate) active_events: Vec<ActiveEvent>,
    pub(crate) rations: Rations,
    pub(crate) last_action: Option<ActionKind>,
    pub(crate) status: Status,
    pub(crate) turn: u32,
}

impl GameState {
    pub fn new(
        start: LocationId,
        destination: LocationId,
        roster: &[MemberSpec],
        resources: Resources,
        time_limit_hours: Hours,
        hours_per_day: Hours,
    ) -> Self {
        let mut resources = resources;
        resources.clamp();
        Self {
            calendar: Calendar::new(hours_per_day),
            time_remaining: time_limit_hours as i64,
            resources,
            party: roster.iter().map(PartyMember::from_spec).collect(),
            current_location: start,
            destination,
            active_events: Vec::new(),
            rations: Rations::default(),
            last_action: None,
            status: Status::Ongoing,
            turn: 0,
        }
    }

    pub fn day(&self) -> u32 {
        self.calendar.current_day()
    }

    pub fn hour_of_day(&self) -> Hours {
        self.calendar.hour_of_day()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn time_remaining(&self) -> i64 {
        self.time_remaining
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn party(&self) -> &[PartyMember] {
        &self.party
    }

    pub fn member(&self, id: &MemberId) -> Option<&PartyMember> {
        self.party.iter().find(|m| &m.id == id)
    }

    pub fn living_members(&self) -> impl Iterator<Item = &PartyMember> {
        self.party.iter().filter(|m| m.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.living_members().count()
    }

    /// Mean health fraction of living members, 0.0 if nobody is alive
    pub fn average_health(&self) -> f32 {
        let (sum, count) = self
            .living_members()
            .fold((0.0, 0usize), |(sum, n), m| (sum + m.health_fraction(), n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }

    /// Mean work modifier of living members, 0.0 if nobody is alive
    pub fn work_capacity(&self) -> f32 {
        let (sum, count) = self
            .living_members()
            .fold((0.0, 0usize), |(sum, n), m| (sum + m.work_modifier(), n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }

    pub fn current_location(&self) -> &LocationId {
        &self.current_location
    }

    pub fn destination(&self) -> &LocationId {
        &self.destination
    }

    pub fn active_events(&self) -> &[ActiveEvent] {
        &self.active_events
    }

    pub fn is_event_active(&self, id: &EventId) -> bool {
        self.active_events.iter().any(|e| &e.id == id)
    }

    pub fn rations(&self) -> Rations {
        self.rations
    }

    pub fn last_action(&self) -> Option<ActionKind> {
        self.last_action
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of turns played
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Combined travel-cost multiplier of active events
    pub fn travel_multiplier(&self) -> f32 {
        self.active_events
            .iter()
            .map(|e| e.modifiers.travel_cost)
            .product()
    }

    /// Combined forage/hunt yield multiplier of active events
    pub fn forage_multiplier(&self) -> f32 {
        self.active_events
            .iter()
            .map(|e| e.modifiers.forage_yield)
            .product()
    }

    /// Extra daily spoilage fraction from active events
    pub fn extra_spoilage(&self) -> f32 {
        self.active_events.iter().map(|e| e.modifiers.spoilage).sum()
    }

    pub(crate) fn member_mut(&mut self, id: &MemberId) -> Option<&mut PartyMember> {
        self.party.iter_mut().find(|m| &m.id == id)
    }

    /// Indices of living members in roster order
    pub(crate) fn living_indices(&self) -> Vec<usize> {
        self.party
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_alive())
            .map(|(i, _)| i)
            .collect()
    }
}
