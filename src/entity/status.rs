//! Status effects carried by party members

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tagged condition on a party member.
///
/// `Healthy` is the marker for "no other effect"; it never coexists with
/// any other variant on a living member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    Injured,
    Sick,
    Snakebitten,
    Exhausted,
    Hungry,
    Healthy,
}

impl StatusEffect {
    pub const AILMENTS: [StatusEffect; 5] = [
        StatusEffect::Injured,
        StatusEffect::Sick,
        StatusEffect::Snakebitten,
        StatusEffect::Exhausted,
        StatusEffect::Hungry,
    ];

    /// Effects that herbs can cure
    pub fn is_treatable(&self) -> bool {
        matches!(self, Self::Injured | Self::Sick | Self::Snakebitten)
    }

    /// Multiplier applied to foraging/hunting success for a member with this
    /// effect. Ailing members are less productive.
    pub fn work_modifier(&self) -> f32 {
        match self {
            Self::Healthy => 1.0,
            Self::Hungry => 0.9,
            Self::Exhausted => 0.8,
            Self::Sick => 0.7,
            Self::Injured => 0.6,
            Self::Snakebitten => 0.5,
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Injured => "injured",
            Self::Sick => "sick",
            Self::Snakebitten => "snakebitten",
            Self::Exhausted => "exhausted",
            Self::Hungry => "hungry",
            Self::Healthy => "healthy",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treatable_effects() {
        assert!(StatusEffect::Sick.is_treatable());
        assert!(StatusEffect::Snakebitten.is_treatable());
        assert!(!StatusEffect::Hungry.is_treatable());
        assert!(!StatusEffect::Exhausted.is_treatable());
    }

    #[test]
    fn test_healthy_works_hardest() {
        for effect in StatusEffect::AILMENTS {
            assert!(effect.work_modifier() < StatusEffect::Healthy.work_modifier());
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StatusEffect::Snakebitten).unwrap();
        assert_eq!(json, "\"snakebitten\"");
    }
}
