//! Simulation tunables with documented constants
//!
//! Every number the engine uses to turn an action into time, food, damage or
//! healing lives here. Values travel with the run configuration; there is no
//! process-wide config.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::{Hours, Span};
use crate::entity::status::StatusEffect;

/// Health lost per day for each status effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusDecay {
    pub injured: f32,
    pub sick: f32,
    pub snakebitten: f32,
    pub exhausted: f32,
    pub hungry: f32,
}

impl Default for StatusDecay {
    fn default() -> Self {
        Self {
            injured: 1.0,
            sick: 3.0,
            snakebitten: 8.0,
            exhausted: 1.0,
            hungry: 12.0,
        }
    }
}

impl StatusDecay {
    pub fn for_status(&self, status: StatusEffect) -> f32 {
        match status {
            StatusEffect::Injured => self.injured,
            StatusEffect::Sick => self.sick,
            StatusEffect::Snakebitten => self.snakebitten,
            StatusEffect::Exhausted => self.exhausted,
            StatusEffect::Hungry => self.hungry,
            StatusEffect::Healthy => 0.0,
        }
    }
}

/// Tunables for action resolution, daily effects and event selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    // === CLOCK ===
    /// Length of one day. Daily effects fire each time this many hours
    /// accumulate.
    pub hours_per_day: Hours,

    // === TRAVEL ===
    /// No journey, however favourable, costs less than this.
    pub min_travel_hours: Hours,

    /// Extra travel cost fraction at zero average party health.
    ///
    /// At 1.0 a party at half health travels 50% slower.
    pub health_travel_penalty: f32,

    /// Extra travel cost fraction on paddle edges at zero canoe condition.
    pub canoe_travel_penalty: f32,

    /// Below this canoe condition, paddling risks further hull damage.
    pub canoe_risk_threshold: f32,

    /// Hull damage from a scrape during risky travel
    pub canoe_scrape_damage: Span,

    /// Hull damage from a breach during risky travel
    pub canoe_breach_damage: Span,

    /// Journeys at least this long leave the party Exhausted.
    pub exhausting_travel_hours: Hours,

    // === FORAGING / HUNTING ===
    pub forage_hours: Hours,
    pub hunt_hours: Hours,

    /// Food gathered by a successful forage before modifiers
    pub forage_yield: Span,

    /// Food brought back by a successful hunt before modifiers
    pub hunt_yield: Span,

    /// Food wasted (bait, spoiled catch) on a failed forage
    pub forage_failure_waste: f32,

    /// Food wasted on a failed hunt
    pub hunt_failure_waste: f32,

    /// Success chance is capped here so no outing is a sure thing.
    pub max_success_chance: f32,

    /// Herbs gathered by a successful forage where herbs grow
    pub herb_yield: f32,

    /// Chance a failed hunt ends with a snakebite
    pub snakebite_chance: f32,

    /// Added to the snakebite chance where snakes are a known hazard
    pub snake_hazard_bonus: f32,

    pub snakebite_damage: Span,

    /// Durability lost by a tool each time it is used
    pub tool_wear: f32,

    /// Yield/success bonus fraction from a tool at full durability
    pub tool_bonus: f32,

    // === REPAIR ===
    /// Canoe condition restored per hour of repair work
    pub repair_per_hour: f32,

    /// Cap on condition restored by a single repair action
    pub max_repair_per_action: f32,

    /// Carried materials used by a repair away from timber
    pub materials_per_repair: f32,

    pub min_repair_hours: Hours,
    pub max_repair_hours: Hours,

    // === REST ===
    /// Health restored per full day of rest
    pub rest_heal_per_day: f32,

    /// Resting at least this long clears Exhausted.
    pub exhaustion_recovery_hours: Hours,

    pub max_rest_hours: Hours,

    // === DAILY UPKEEP ===
    /// Food eaten per living member per day at normal rations
    pub food_per_member: f32,

    /// Hunger removed from a member fed a full normal ration
    pub hunger_relief: f32,

    /// Hunger gained by a member who gets nothing to eat
    pub hunger_gain: f32,

    /// Members at or above this hunger become Hungry.
    pub hungry_threshold: f32,

    /// Hungry members recover once their hunger drops below this.
    pub hungry_recovery_threshold: f32,

    /// Fraction of stored food lost to spoilage each day
    pub spoilage_rate: f32,

    /// Health lost per day for each status effect
    pub status_decay: StatusDecay,

    /// Health regained per day by members with no status effects
    pub natural_recovery: f32,

    /// Herbs used to treat one member
    pub herbs_per_treatment: f32,

    // === EVENTS ===
    /// Relative weight of "nothing happens" in the event draw for a
    /// one-day action. Shorter actions weigh it up, longer ones down.
    pub quiet_weight: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            hours_per_day: 24,

            min_travel_hours: 2,
            health_travel_penalty: 1.0,
            canoe_travel_penalty: 1.0,
            canoe_risk_threshold: 50.0,
            canoe_scrape_damage: Span::new(5.0, 15.0),
            canoe_breach_damage: Span::new(15.0, 35.0),
            exhausting_travel_hours: 16,

            forage_hours: 6,
            hunt_hours: 8,
            forage_yield: Span::new(2.0, 6.0),
            hunt_yield: Span::new(4.0, 10.0),
            forage_failure_waste: 0.0,
            hunt_failure_waste: 1.0,
            max_success_chance: 0.95,
            herb_yield: 1.0,
            snakebite_chance: 0.1,
            snake_hazard_bonus: 0.15,
            snakebite_damage: Span::new(10.0, 25.0),
            tool_wear: 5.0,
            tool_bonus: 0.5,

            repair_per_hour: 4.0,
            max_repair_per_action: 40.0,
            materials_per_repair: 1.0,
            min_repair_hours: 1,
            max_repair_hours: 24,

            rest_heal_per_day: 15.0,
            exhaustion_recovery_hours: 8,
            max_rest_hours: 72,

            food_per_member: 1.0,
            hunger_relief: 10.0,
            hunger_gain: 15.0,
            hungry_threshold: 60.0,
            hungry_recovery_threshold: 40.0,
            spoilage_rate: 0.02,
            status_decay: StatusDecay::default(),
            natural_recovery: 1.0,
            herbs_per_treatment: 1.0,

            quiet_weight: 60.0,
        }
    }
}

impl Tunables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate tunables for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hours_per_day == 0 {
            return Err(ConfigError::InvalidTunable("hours_per_day must be positive".into()));
        }

        if self.min_travel_hours == 0 {
            return Err(ConfigError::InvalidTunable(
                "min_travel_hours must be positive".into(),
            ));
        }

        if self.hungry_recovery_threshold > self.hungry_threshold {
            return Err(ConfigError::InvalidTunable(format!(
                "hungry_recovery_threshold ({}) should be <= hungry_threshold ({})",
                self.hungry_recovery_threshold, self.hungry_threshold
            )));
        }

        if self.min_repair_hours == 0 || self.min_repair_hours > self.max_repair_hours {
            return Err(ConfigError::InvalidTunable(
                "repair hours must satisfy 0 < min <= max".into(),
            ));
        }

        for (name, span) in [
            ("canoe_scrape_damage", self.canoe_scrape_damage),
            ("canoe_breach_damage", self.canoe_breach_damage),
            ("forage_yield", self.forage_yield),
            ("hunt_yield", self.hunt_yield),
            ("snakebite_damage", self.snakebite_damage),
        ] {
            if !span.is_valid() {
                return Err(ConfigError::InvalidTunable(format!(
                    "{} must be a non-negative range with min <= max",
                    name
                )));
            }
        }

        let probabilities = [
            ("spoilage_rate", self.spoilage_rate),
            ("snakebite_chance", self.snakebite_chance),
            ("max_success_chance", self.max_success_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidTunable(format!(
                    "{} ({}) must lie in [0, 1]",
                    name, p
                )));
            }
        }

        let decay = &self.status_decay;
        let rates = [
            ("food_per_member", self.food_per_member),
            ("hunger_relief", self.hunger_relief),
            ("hunger_gain", self.hunger_gain),
            ("natural_recovery", self.natural_recovery),
            ("rest_heal_per_day", self.rest_heal_per_day),
            ("herbs_per_treatment", self.herbs_per_treatment),
            ("status_decay.injured", decay.injured),
            ("status_decay.sick", decay.sick),
            ("status_decay.snakebitten", decay.snakebitten),
            ("status_decay.exhausted", decay.exhausted),
            ("status_decay.hungry", decay.hungry),
        ];
        for (name, value) in rates {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTunable(format!(
                    "{} ({}) must be >= 0",
                    name, value
                )));
            }
        }

        if self.quiet_weight < 0.0 || !self.quiet_weight.is_finite() {
            return Err(ConfigError::InvalidTunable("quiet_weight must be >= 0".into()));
        }

        Ok(())
    }

    /// Fraction of a day represented by `hours`
    pub fn days(&self, hours: Hours) -> f32 {
        hours as f32 / self.hours_per_day as f32
    }
}
