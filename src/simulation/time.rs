//! Time advancer - charges elapsed hours and runs the daily upkeep
//!
//! Daily effects fire once for every day boundary crossed, so a three-day
//! journey costs three days of food, decay and event ticks.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::expedition::GameConfig;
use super::state::GameState;
use crate::campaign::supply::ResourceKind;
use crate::core::types::{EventId, Hours, MemberId};
use crate::entity::status::StatusEffect;
use crate::events::engine::apply_effects;

/// Upkeep applied at one day boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Day that began at this boundary
    pub day: u32,
    pub food_eaten: f32,
    pub food_spoiled: f32,
    /// Members who got less than a normal ration
    pub underfed: Vec<MemberId>,
    pub deaths: Vec<MemberId>,
    /// Persistent events whose effects were re-applied
    pub renewed_events: Vec<EventId>,
    pub expired_events: Vec<EventId>,
    /// Notes from re-applied event effects
    pub event_notes: Vec<String>,
}

/// Charge `hours` against the budget and apply the daily upkeep of every
/// crossed day boundary
pub fn advance(
    state: &mut GameState,
    hours: Hours,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> Vec<DailySummary> {
    state.time_remaining -= hours as i64;
    let crossed = state.calendar.advance(hours);

    let mut summaries = Vec::with_capacity(crossed as usize);
    for offset in 0..crossed {
        let day = state.day() + 1 + offset - crossed;
        let summary = end_of_day(state, day, config, rng);
        debug!(
            day,
            eaten = summary.food_eaten,
            spoiled = summary.food_spoiled,
            deaths = summary.deaths.len(),
            "day boundary"
        );
        summaries.push(summary);
    }

    state.resources.clamp();
    summaries
}

fn end_of_day(
    state: &mut GameState,
    day: u32,
    config: &GameConfig,
    rng: &mut dyn RngCore,
) -> DailySummary {
    let t = &config.tunables;
    let alive_before: Vec<bool> = state.party.iter().map(|m| m.is_alive()).collect();
    let mut summary = DailySummary {
        day,
        ..DailySummary::default()
    };

    // Feed the hungriest first; ties keep roster order
    let mut order = state.living_indices();
    order.sort_by(|&a, &b| {
        state.party[b]
            .hunger()
            .total_cmp(&state.party[a].hunger())
    });

    let portion = state.rations.portion();
    let ration = t.food_per_member * portion;
    for idx in order {
        let given = ration.min(state.resources.food);
        state.resources.food -= given;
        summary.food_eaten += given;

        // Share of a normal ration actually received
        let received = if t.food_per_member > 0.0 {
            given / t.food_per_member
        } else {
            portion
        };
        let hunger_delta = if received >= 1.0 {
            -t.hunger_relief * received
        } else {
            summary.underfed.push(state.party[idx].id.clone());
            -t.hunger_relief * received + t.hunger_gain * (1.0 - received)
        };
        state.party[idx].change_hunger(
            hunger_delta,
            t.hungry_threshold,
            t.hungry_recovery_threshold,
        );
    }

    // Spoilage
    let rate = (t.spoilage_rate + state.extra_spoilage()).clamp(0.0, 1.0);
    let spoiled = state.resources.food * rate;
    summary.food_spoiled = -state.resources.adjust(ResourceKind::Food, -spoiled);

    // Status decay and natural recovery
    for member in state.party.iter_mut().filter(|m| m.is_alive()) {
        let decay: f32 = member
            .statuses()
            .map(|s| t.status_decay.for_status(s))
            .sum();
        member.take_damage(decay);
        if member.has_status(StatusEffect::Healthy) {
            member.heal(t.natural_recovery);
        }
    }

    // Persistent events
    let active = std::mem::take(&mut state.active_events);
    let mut still_active = Vec::with_capacity(active.len());
    for mut event in active {
        event.remaining_days = event.remaining_days.saturating_sub(1);
        if event.remaining_days == 0 {
            summary.expired_events.push(event.id.clone());
            continue;
        }
        let outcome = apply_effects(state, &event.effects, false, rng);
        summary.event_notes.extend(outcome.notes);
        summary.renewed_events.push(event.id.clone());
        still_active.push(event);
    }
    state.active_events = still_active;

    summary.deaths = state
        .party
        .iter()
        .zip(alive_before)
        .filter(|(m, was_alive)| *was_alive && !m.is_alive())
        .map(|(m, _)| m.id.clone())
        .collect();

    state.resources.clamp();
    summary
}
