//! Event catalog - the configured set of event templates

use std::collections::BTreeSet;

use super::template::{Condition, Effect, EventCategory, EventTemplate, Modifiers};
use crate::actions::catalog::ActionKind;
use crate::campaign::location::{Hazard, ResourceTag};
use crate::core::error::ConfigError;
use crate::core::types::{EventId, Span};
use crate::entity::status::StatusEffect;

#[derive(Debug, Clone, PartialEq)]
pub struct EventCatalog {
    templates: Vec<EventTemplate>,
}

impl EventCatalog {
    /// Build a catalog, rejecting duplicate ids and malformed templates
    pub fn new(templates: Vec<EventTemplate>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for template in &templates {
            if !seen.insert(template.id.clone()) {
                return Err(ConfigError::InvalidEvent {
                    id: template.id.clone(),
                    reason: "duplicate id".into(),
                });
            }
            if let Some(reason) = template.problem() {
                return Err(ConfigError::InvalidEvent {
                    id: template.id.clone(),
                    reason,
                });
            }
        }
        Ok(Self { templates })
    }

    /// A catalog in which nothing ever happens
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Swamp hazards of the default scenario
    pub fn builtin() -> Self {
        let travel = || Condition::LastAction {
            action: ActionKind::Travel,
        };

        let templates = vec![
            EventTemplate::new("storm", "Sudden storm", EventCategory::Weather, 8.0)
                .describe("A squall whips across the open water.")
                .boost(travel(), 1.5)
                .effect(Effect::DamageCanoe {
                    amount: Span::new(5.0, 25.0),
                })
                .effect(Effect::StrikeMember {
                    chance: 0.3,
                    damage: Span::new(1.0, 10.0),
                    status: Some(StatusEffect::Injured),
                }),
            EventTemplate::new("heavy_rain", "Heavy rain", EventCategory::Weather, 5.0)
                .describe("Rain settles in for days; channels swell and stores grow damp.")
                .effect(Effect::SpoilFood { fraction: 0.02 })
                .lasting(
                    2,
                    Modifiers {
                        travel_cost: 1.25,
                        spoilage: 0.05,
                        forage_yield: 0.8,
                    },
                ),
            EventTemplate::new("berry_patch", "Berry patch", EventCategory::ResourceCrisis, 6.0)
                .describe("A thicket heavy with ripe berries.")
                .boost(
                    Condition::LocationResource {
                        tag: ResourceTag::Berries,
                    },
                    2.0,
                )
                .effect(Effect::GainFood {
                    amount: Span::new(3.0, 8.0),
                })
                .effect(Effect::StrikeMember {
                    chance: 0.05,
                    damage: Span::fixed(0.0),
                    status: Some(StatusEffect::Sick),
                }),
            EventTemplate::new("snake_attack", "Snake attack", EventCategory::Wildlife, 3.0)
                .describe("A cottonmouth strikes from the reeds.")
                .boost(
                    Condition::LocationHazard {
                        hazard: Hazard::Snakes,
                    },
                    4.0,
                )
                .effect(Effect::StrikeMember {
                    chance: 1.0,
                    damage: Span::new(10.0, 25.0),
                    status: Some(StatusEffect::Snakebitten),
                }),
            EventTemplate::new("alligator", "Alligator", EventCategory::Wildlife, 6.0)
                .describe("An alligator rams the canoe.")
                .when(Condition::LocationHazard {
                    hazard: Hazard::Alligators,
                })
                .boost(travel(), 1.5)
                .effect(Effect::DamageCanoe {
                    amount: Span::new(15.0, 30.0),
                })
                .effect(Effect::StrikeMember {
                    chance: 0.25,
                    damage: Span::new(5.0, 15.0),
                    status: Some(StatusEffect::Injured),
                }),
            EventTemplate::new("submerged_logs", "Submerged logs", EventCategory::Navigation, 10.0)
                .describe("The hull grinds over a hidden log.")
                .when(travel())
                .when(Condition::LocationHazard {
                    hazard: Hazard::SubmergedLogs,
                })
                .effect(Effect::DamageCanoe {
                    amount: Span::new(5.0, 15.0),
                }),
            EventTemplate::new("sawgrass_maze", "Lost in the sawgrass", EventCategory::Navigation, 6.0)
                .describe("The channel vanishes into sawgrass and the party must backtrack.")
                .when(travel())
                .when(Condition::LocationHazard {
                    hazard: Hazard::DifficultTerrain,
                })
                .effect(Effect::Delay { hours: 6 })
                .effect(Effect::StrikeMember {
                    chance: 0.2,
                    damage: Span::fixed(0.0),
                    status: Some(StatusEffect::Exhausted),
                }),
            EventTemplate::new("fog", "Dense fog", EventCategory::Navigation, 4.0)
                .describe("Fog rolls in and the party waits for it to lift.")
                .when(travel())
                .effect(Effect::Delay { hours: 4 }),
            EventTemplate::new("food_spoilage", "Spoiled stores", EventCategory::ResourceCrisis, 4.0)
                .describe("Mould gets into the food bundles.")
                .when(Condition::FoodAtLeast { value: 5.0 })
                .effect(Effect::SpoilFood { fraction: 0.25 }),
            EventTemplate::new("friendly_traders", "Friendly traders", EventCategory::HumanEncounter, 2.0)
                .describe("A dugout of Seminole traders shares supplies.")
                .when(Condition::MinDay { day: 2 })
                .boost(Condition::FoodBelow { value: 5.0 }, 2.0)
                .effect(Effect::GainFood {
                    amount: Span::new(2.0, 5.0),
                })
                .effect(Effect::GainMaterials {
                    amount: Span::new(1.0, 2.0),
                })
                .effect(Effect::GainHerbs {
                    amount: Span::fixed(1.0),
                }),
        ];

        let templates = templates
            .into_iter()
            .enumerate()
            .map(|(i, t)| t.with_priority(i as u32))
            .collect();
        Self { templates }
    }

    pub fn templates(&self) -> &[EventTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &EventId) -> Option<&EventTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
