//! Event templates
//!
//! A template is pure data: the conditions under which it may fire, how
//! likely it is, and what it does. Templates never hold state; firing one
//! produces an ephemeral report and, for persistent events, an entry in the
//! game state's active events.

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActionKind;
use crate::campaign::location::{Hazard, ResourceTag};
use crate::campaign::map::LocationGraph;
use crate::campaign::supply::ToolKind;
use crate::core::types::{EventId, Hours, Span};
use crate::entity::status::StatusEffect;
use crate::simulation::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Weather,
    Wildlife,
    Navigation,
    ResourceCrisis,
    HumanEncounter,
}

/// Predicate over a state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// The current location carries this hazard
    LocationHazard { hazard: Hazard },
    /// The current location offers this resource
    LocationResource { tag: ResourceTag },
    /// The action just taken was of this kind
    LastAction { action: ActionKind },
    CanoeBelow { value: f32 },
    FoodBelow { value: f32 },
    FoodAtLeast { value: f32 },
    /// The expedition has reached at least this day
    MinDay { day: u32 },
    /// Some living member has this status
    MemberHas { status: StatusEffect },
}

impl Condition {
    pub fn holds(&self, state: &GameState, graph: &LocationGraph) -> bool {
        let here = graph.get(state.current_location());
        match self {
            Self::LocationHazard { hazard } => here.map(|l| l.has_hazard(*hazard)).unwrap_or(false),
            Self::LocationResource { tag } => here.map(|l| l.has_resource(*tag)).unwrap_or(false),
            Self::LastAction { action } => state.last_action() == Some(*action),
            Self::CanoeBelow { value } => state.resources().canoe_condition < *value,
            Self::FoodBelow { value } => state.resources().food < *value,
            Self::FoodAtLeast { value } => state.resources().food >= *value,
            Self::MinDay { day } => state.day() >= *day,
            Self::MemberHas { status } => state.living_members().any(|m| m.has_status(*status)),
        }
    }
}

/// Multiplies a template's weight while its condition holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub when: Condition,
    pub factor: f32,
}

/// A single consequence of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    DamageCanoe { amount: Span },
    GainFood { amount: Span },
    /// Lose a fraction of stored food
    SpoilFood { fraction: f32 },
    /// With probability `chance`, hurt one random living member and
    /// optionally inflict a status
    StrikeMember {
        chance: f32,
        damage: Span,
        #[serde(default)]
        status: Option<StatusEffect>,
    },
    GainMaterials { amount: Span },
    GainHerbs { amount: Span },
    /// Extra hours lost this turn. Applied only when the event fires.
    Delay { hours: Hours },
    WearTool { tool: ToolKind, amount: f32 },
}

/// Ongoing adjustments while a persistent event is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Multiplier on travel cost
    pub travel_cost: f32,
    /// Added to the daily spoilage fraction
    pub spoilage: f32,
    /// Multiplier on forage and hunt yields
    pub forage_yield: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            travel_cost: 1.0,
            spoilage: 0.0,
            forage_yield: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: EventId,
    pub name: String,
    pub category: EventCategory,
    #[serde(default)]
    pub description: String,
    /// Relative weight in the draw
    pub weight: f32,
    /// Lower sorts first in the draw order
    #[serde(default)]
    pub priority: u32,
    /// All must hold for the template to qualify
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub boosts: Vec<Boost>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// 0 = instantaneous, otherwise days the event stays active
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl EventTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: EventCategory,
        weight: f32,
    ) -> Self {
        Self {
            id: EventId::new(id),
            name: name.into(),
            category,
            description: String::new(),
            weight,
            priority: 0,
            conditions: Vec::new(),
            boosts: Vec::new(),
            effects: Vec::new(),
            duration_days: 0,
            modifiers: Modifiers::default(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn boost(mut self, when: Condition, factor: f32) -> Self {
        self.boosts.push(Boost { when, factor });
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn lasting(mut self, days: u32, modifiers: Modifiers) -> Self {
        self.duration_days = days;
        self.modifiers = modifiers;
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_days > 0
    }

    /// Can this template fire given the current state?
    pub fn is_applicable(&self, state: &GameState, graph: &LocationGraph) -> bool {
        if self.is_persistent() && state.is_event_active(&self.id) {
            return false;
        }
        self.conditions.iter().all(|c| c.holds(state, graph))
    }

    /// Relative weight for selection, boosts included
    pub fn weight(&self, state: &GameState, graph: &LocationGraph) -> f32 {
        self.boosts
            .iter()
            .filter(|b| b.when.holds(state, graph))
            .fold(self.weight, |w, b| w * b.factor)
            .max(0.0)
    }

    /// Describe what is wrong with this template, if anything
    pub fn problem(&self) -> Option<String> {
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Some("weight must be a non-negative number".into());
        }
        if self.boosts.iter().any(|b| !(b.factor.is_finite() && b.factor >= 0.0)) {
            return Some("boost factors must be non-negative".into());
        }
        let m = &self.modifiers;
        if m.travel_cost <= 0.0 || m.forage_yield < 0.0 || m.spoilage < 0.0 {
            return Some("modifiers out of range".into());
        }
        for effect in &self.effects {
            let ok = match effect {
                Effect::DamageCanoe { amount }
                | Effect::GainFood { amount }
                | Effect::GainMaterials { amount }
                | Effect::GainHerbs { amount } => amount.is_valid(),
                Effect::SpoilFood { fraction } => (0.0..=1.0).contains(fraction),
                Effect::StrikeMember { chance, damage, .. } => {
                    (0.0..=1.0).contains(chance) && damage.is_valid()
                }
                Effect::Delay { .. } => true,
                Effect::WearTool { amount, .. } => *amount >= 0.0,
            };
            if !ok {
                return Some(format!("invalid effect {:?}", effect));
            }
        }
        None
    }
}
