//! Supplies carried by the party
//!
//! Food, the canoe, repair materials, medicinal herbs and tools. Food is
//! eaten daily and spoils; the canoe and tools wear down with use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Canoe condition of a freshly built hull
pub const MAX_CANOE_CONDITION: f32 = 100.0;

/// Durability of an unused tool
pub const MAX_TOOL_DURABILITY: f32 = 100.0;

/// Starting food when a scenario gives none
pub const DEFAULT_FOOD: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    FishingGear,
    HuntingSpear,
    RepairKit,
}

/// Stockpiles that inventory management can hand out or throw away
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Food,
    Materials,
    Herbs,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Food => "food",
            Self::Materials => "materials",
            Self::Herbs => "herbs",
        })
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "materials" => Ok(Self::Materials),
            "herbs" => Ok(Self::Herbs),
            other => Err(format!("unknown resource: {}", other)),
        }
    }
}

/// Daily food allocation per member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rations {
    Meager,
    #[default]
    Normal,
    Filling,
}

impl Rations {
    /// Multiplier on food drawn per member and on hunger relief
    pub fn portion(&self) -> f32 {
        match self {
            Self::Meager => 0.5,
            Self::Normal => 1.0,
            Self::Filling => 1.5,
        }
    }
}

impl FromStr for Rations {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meager" => Ok(Self::Meager),
            "normal" => Ok(Self::Normal),
            "filling" => Ok(Self::Filling),
            other => Err(format!("unknown rations: {}", other)),
        }
    }
}

/// Everything the party carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub food: f32,
    /// 0 = wrecked, 100 = sound
    pub canoe_condition: f32,
    /// Carried repair materials (pitch, cordage, spare planks)
    pub materials: f32,
    /// Medicinal herbs for treating members
    pub herbs: f32,
    /// Tool durability in [0, 100]; absent tools count as 0
    pub tools: BTreeMap<ToolKind, f32>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            food: DEFAULT_FOOD,
            canoe_condition: MAX_CANOE_CONDITION,
            materials: 0.0,
            herbs: 0.0,
            tools: BTreeMap::new(),
        }
    }
}

impl Resources {
    pub fn new(food: f32, canoe_condition: f32) -> Self {
        Self {
            food,
            canoe_condition,
            ..Self::default()
        }
    }

    pub fn with_materials(mut self, materials: f32) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_herbs(mut self, herbs: f32) -> Self {
        self.herbs = herbs;
        self
    }

    pub fn with_tool(mut self, kind: ToolKind, durability: f32) -> Self {
        self.tools.insert(kind, durability);
        self
    }

    /// Durability of a tool, 0.0 if the party has none
    pub fn tool(&self, kind: ToolKind) -> f32 {
        self.tools.get(&kind).copied().unwrap_or(0.0)
    }

    /// Multiplier granted by a tool: 1.0 without it, up to `1 + bonus` at
    /// full durability
    pub fn tool_factor(&self, kind: ToolKind, bonus: f32) -> f32 {
        1.0 + bonus * (self.tool(kind) / MAX_TOOL_DURABILITY).clamp(0.0, 1.0)
    }

    /// Wear a tool down. Returns the durability actually lost.
    pub fn wear_tool(&mut self, kind: ToolKind, amount: f32) -> f32 {
        match self.tools.get_mut(&kind) {
            Some(durability) if *durability > 0.0 && amount > 0.0 => {
                let lost = amount.min(*durability);
                *durability -= lost;
                lost
            }
            _ => 0.0,
        }
    }

    pub fn amount(&self, kind: ResourceKind) -> f32 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Materials => self.materials,
            ResourceKind::Herbs => self.herbs,
        }
    }

    /// Add `delta` to a stockpile, flooring at zero. Returns the change
    /// actually applied.
    pub fn adjust(&mut self, kind: ResourceKind, delta: f32) -> f32 {
        let slot = match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Materials => &mut self.materials,
            ResourceKind::Herbs => &mut self.herbs,
        };
        let before = *slot;
        *slot = (*slot + delta).max(0.0);
        *slot - before
    }

    /// Reduce canoe condition. Returns the damage actually taken.
    pub fn damage_canoe(&mut self, amount: f32) -> f32 {
        let before = self.canoe_condition;
        self.canoe_condition = (self.canoe_condition - amount.max(0.0)).max(0.0);
        before - self.canoe_condition
    }

    /// Restore canoe condition up to the cap. Returns the repair applied.
    pub fn repair_canoe(&mut self, amount: f32) -> f32 {
        let before = self.canoe_condition;
        self.canoe_condition = (self.canoe_condition + amount.max(0.0)).min(MAX_CANOE_CONDITION);
        self.canoe_condition - before
    }

    /// Force every quantity back into its valid range
    pub fn clamp(&mut self) {
        self.food = self.food.max(0.0);
        self.materials = self.materials.max(0.0);
        self.herbs = self.herbs.max(0.0);
        self.canoe_condition = self.canoe_condition.clamp(0.0, MAX_CANOE_CONDITION);
        for durability in self.tools.values_mut() {
            *durability = durability.clamp(0.0, MAX_TOOL_DURABILITY);
        }
    }

    /// True if every quantity is within its valid range
    pub fn in_bounds(&self) -> bool {
        self.food >= 0.0
            && self.materials >= 0.0
            && self.herbs >= 0.0
            && (0.0..=MAX_CANOE_CONDITION).contains(&self.canoe_condition)
            && self
                .tools
                .values()
                .all(|d| (0.0..=MAX_TOOL_DURABILITY).contains(d))
    }
}

/// Net change between two resource levels, reported with every action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDelta {
    pub food: f32,
    pub canoe_condition: f32,
    pub materials: f32,
    pub herbs: f32,
    /// Only tools whose durability changed
    pub tools: BTreeMap<ToolKind, f32>,
}

impl ResourceDelta {
    pub fn between(before: &Resources, after: &Resources) -> Self {
        let mut tools = BTreeMap::new();
        for kind in before.tools.keys().chain(after.tools.keys()) {
            let change = after.tool(*kind) - before.tool(*kind);
            if change != 0.0 {
                tools.insert(*kind, change);
            }
        }
        Self {
            food: after.food - before.food,
            canoe_condition: after.canoe_condition - before.canoe_condition,
            materials: after.materials - before.materials,
            herbs: after.herbs - before.herbs,
            tools,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.food == 0.0
            && self.canoe_condition == 0.0
            && self.materials == 0.0
            && self.herbs == 0.0
            && self.tools.is_empty()
    }
}
