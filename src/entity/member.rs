//! Party members
//!
//! Members are created from the roster at game start and never removed. A
//! member whose health reaches zero is dead: excluded from active-party
//! computations, kept in the collection for reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::status::StatusEffect;
use crate::core::types::MemberId;

pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

/// 0.0 = fully fed, 100.0 = starving
pub const MAX_HUNGER: f32 = 100.0;

/// Roster entry used to create a member at game start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub id: MemberId,
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    #[serde(default)]
    pub initial_health: Option<f32>,
    #[serde(default)]
    pub initial_hunger: f32,
    #[serde(default)]
    pub statuses: Vec<StatusEffect>,
}

fn default_max_health() -> f32 {
    DEFAULT_MAX_HEALTH
}

impl MemberSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(id),
            max_health: DEFAULT_MAX_HEALTH,
            initial_health: None,
            initial_hunger: 0.0,
            statuses: Vec::new(),
        }
    }

    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.initial_health = Some(health);
        self
    }

    pub fn with_hunger(mut self, hunger: f32) -> Self {
        self.initial_hunger = hunger;
        self
    }

    pub fn with_status(mut self, status: StatusEffect) -> Self {
        self.statuses.push(status);
        self
    }
}

/// A member of the travelling party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    pub id: MemberId,
    health: f32,
    max_health: f32,
    hunger: f32,
    statuses: BTreeSet<StatusEffect>,
}

impl PartyMember {
    pub fn new(id: MemberId, max_health: f32) -> Self {
        let max_health = max_health.max(1.0);
        Self {
            id,
            health: max_health,
            max_health,
            hunger: 0.0,
            statuses: BTreeSet::from([StatusEffect::Healthy]),
        }
    }

    pub fn from_spec(spec: &MemberSpec) -> Self {
        let mut member = Self::new(spec.id.clone(), spec.max_health);
        if let Some(health) = spec.initial_health {
            member.health = health.clamp(0.0, member.max_health);
        }
        member.hunger = spec.initial_hunger.clamp(0.0, MAX_HUNGER);
        for status in &spec.statuses {
            member.add_status(*status);
        }
        member
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction of maximum, 0.0 for the dead
    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn statuses(&self) -> impl Iterator<Item = StatusEffect> + '_ {
        self.statuses.iter().copied()
    }

    pub fn has_status(&self, status: StatusEffect) -> bool {
        self.statuses.contains(&status)
    }

    /// Productivity multiplier from the worst current effect
    pub fn work_modifier(&self) -> f32 {
        self.statuses
            .iter()
            .map(|s| s.work_modifier())
            .fold(1.0, f32::min)
    }

    /// Reduce health, clamping at zero. Returns true if this blow was fatal.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        !self.is_alive()
    }

    /// Restore health up to the maximum. The dead cannot be healed.
    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 || !self.is_alive() {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Shift hunger by `delta` and update the Hungry effect.
    ///
    /// Hungry is gained at `threshold` and lost only below `recovery`.
    pub fn change_hunger(&mut self, delta: f32, threshold: f32, recovery: f32) {
        if !self.is_alive() {
            return;
        }
        self.hunger = (self.hunger + delta).clamp(0.0, MAX_HUNGER);
        if self.hunger >= threshold {
            self.add_status(StatusEffect::Hungry);
        } else if self.hunger < recovery {
            self.remove_status(StatusEffect::Hungry);
        }
    }

    /// Add an effect. Returns true if it was newly added.
    pub fn add_status(&mut self, status: StatusEffect) -> bool {
        if !self.is_alive() || status == StatusEffect::Healthy {
            return false;
        }
        let added = self.statuses.insert(status);
        self.normalize();
        added
    }

    /// Remove an effect. Returns true if it was present.
    pub fn remove_status(&mut self, status: StatusEffect) -> bool {
        if !self.is_alive() || status == StatusEffect::Healthy {
            return false;
        }
        let removed = self.statuses.remove(&status);
        self.normalize();
        removed
    }

    fn normalize(&mut self) {
        let ailing = self.statuses.iter().any(|s| *s != StatusEffect::Healthy);
        if ailing {
            self.statuses.remove(&StatusEffect::Healthy);
        } else {
            self.statuses.insert(StatusEffect::Healthy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> PartyMember {
        PartyMember::new(MemberId::new("api"), 100.0)
    }

    #[test]
    fn test_new_member_is_healthy() {
        let m = member();
        assert!(m.is_alive());
        assert_eq!(m.health(), 100.0);
        assert_eq!(m.hunger(), 0.0);
        assert_eq!(m.statuses().collect::<Vec<_>>(), vec![StatusEffect::Healthy]);
    }

    #[test]
    fn test_from_spec_applies_overrides() {
        let spec = MemberSpec::new("chayton")
            .with_max_health(110.0)
            .with_health(90.0)
            .with_hunger(20.0)
            .with_status(StatusEffect::Sick);
        let m = PartyMember::from_spec(&spec);
        assert_eq!(m.max_health(), 110.0);
        assert_eq!(m.health(), 90.0);
        assert_eq!(m.hunger(), 20.0);
        assert!(m.has_status(StatusEffect::Sick));
        assert!(!m.has_status(StatusEffect::Healthy));
    }

    #[test]
    fn test_take_damage_clamps_and_reports_death() {
        let mut m = member();
        assert!(!m.take_damage(30.0));
        assert_eq!(m.health(), 70.0);
        assert!(m.take_damage(150.0));
        assert_eq!(m.health(), 0.0);
        assert!(!m.is_alive());
        // Already dead: no second death
        assert!(!m.take_damage(10.0));
    }

    #[test]
    fn test_non_positive_damage_ignored() {
        let mut m = member();
        m.take_damage(0.0);
        m.take_damage(-10.0);
        assert_eq!(m.health(), 100.0);
    }

    #[test]
    fn test_heal_caps_at_max_and_skips_dead() {
        let mut m = member();
        m.take_damage(10.0);
        m.heal(50.0);
        assert_eq!(m.health(), 100.0);

        m.take_damage(100.0);
        m.heal(50.0);
        assert_eq!(m.health(), 0.0);
    }

    #[test]
    fn test_hungry_hysteresis() {
        let mut m = member();
        m.change_hunger(65.0, 60.0, 40.0);
        assert!(m.has_status(StatusEffect::Hungry));

        // Still above recovery: stays hungry
        m.change_hunger(-20.0, 60.0, 40.0);
        assert_eq!(m.hunger(), 45.0);
        assert!(m.has_status(StatusEffect::Hungry));

        m.change_hunger(-10.0, 60.0, 40.0);
        assert!(!m.has_status(StatusEffect::Hungry));
        assert!(m.has_status(StatusEffect::Healthy));
    }

    #[test]
    fn test_hunger_clamped() {
        let mut m = member();
        m.change_hunger(500.0, 60.0, 40.0);
        assert_eq!(m.hunger(), MAX_HUNGER);
        m.change_hunger(-500.0, 60.0, 40.0);
        assert_eq!(m.hunger(), 0.0);
    }

    #[test]
    fn test_healthy_marker_tracks_ailments() {
        let mut m = member();
        assert!(m.add_status(StatusEffect::Injured));
        assert!(!m.add_status(StatusEffect::Injured));
        assert!(!m.has_status(StatusEffect::Healthy));

        assert!(m.remove_status(StatusEffect::Injured));
        assert!(m.has_status(StatusEffect::Healthy));
        assert!(!m.remove_status(StatusEffect::Sick));
    }

    #[test]
    fn test_dead_members_keep_statuses() {
        let mut m = member();
        m.add_status(StatusEffect::Snakebitten);
        m.take_damage(100.0);
        assert!(!m.add_status(StatusEffect::Sick));
        assert!(!m.remove_status(StatusEffect::Snakebitten));
        assert!(m.has_status(StatusEffect::Snakebitten));
    }

    #[test]
    fn test_work_modifier_uses_worst_effect() {
        let mut m = member();
        assert_eq!(m.work_modifier(), 1.0);
        m.add_status(StatusEffect::Hungry);
        m.add_status(StatusEffect::Snakebitten);
        assert_eq!(m.work_modifier(), StatusEffect::Snakebitten.work_modifier());
    }
}
