//! Location - a place on the expedition map
//!
//! Locations are the nodes of the travel graph. Their label and description
//! are passed through to collaborators untouched; the engine only reads
//! edges, resource tags, hazards and the destination flag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{Hours, LocationId};

/// How an edge is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Needs a working canoe
    #[default]
    Paddle,
    /// Overland; the canoe is carried or left behind
    Trek,
}

impl TravelMode {
    pub fn requires_canoe(&self) -> bool {
        matches!(self, Self::Paddle)
    }
}

/// Outbound travel edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: LocationId,
    pub base_hours: Hours,
    /// 0.0 = placid water, 1.0 = treacherous
    #[serde(default)]
    pub risk: f32,
    #[serde(default)]
    pub mode: TravelMode,
}

impl Edge {
    pub fn paddle(to: impl Into<String>, base_hours: Hours, risk: f32) -> Self {
        Self {
            to: LocationId::new(to),
            base_hours,
            risk,
            mode: TravelMode::Paddle,
        }
    }

    pub fn trek(to: impl Into<String>, base_hours: Hours, risk: f32) -> Self {
        Self {
            to: LocationId::new(to),
            base_hours,
            risk,
            mode: TravelMode::Trek,
        }
    }
}

/// Resource-acquisition opportunity at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTag {
    Fish,
    Berries,
    Reeds,
    Herbs,
    SmallGame,
    /// Timber for canoe repairs
    Timber,
}

impl ResourceTag {
    /// Tags that contribute food when foraging and fishing
    pub fn is_forageable(&self) -> bool {
        matches!(self, Self::Fish | Self::Berries | Self::Reeds | Self::Herbs)
    }
}

/// A resource tag with its abundance in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpot {
    pub tag: ResourceTag,
    pub abundance: f32,
}

/// Known dangers that raise the odds of related events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    SubmergedLogs,
    Alligators,
    Snakes,
    DifficultTerrain,
}

/// A location on the expedition map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub resources: Vec<ResourceSpot>,
    #[serde(default)]
    pub hazards: BTreeSet<Hazard>,
    #[serde(default)]
    pub is_destination: bool,
}

impl Location {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(id),
            label: label.into(),
            description: String::new(),
            edges: Vec::new(),
            resources: Vec::new(),
            hazards: BTreeSet::new(),
            is_destination: false,
        }
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_resource(mut self, tag: ResourceTag, abundance: f32) -> Self {
        self.resources.push(ResourceSpot { tag, abundance });
        self
    }

    pub fn with_hazard(mut self, hazard: Hazard) -> Self {
        self.hazards.insert(hazard);
        self
    }

    pub fn as_destination(mut self) -> Self {
        self.is_destination = true;
        self
    }

    /// Outbound edge to `to`, if any
    pub fn edge_to(&self, to: &LocationId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.to == to)
    }

    /// Abundance of a resource tag (0.0 when absent)
    pub fn abundance(&self, tag: ResourceTag) -> f32 {
        self.resources
            .iter()
            .filter(|r| r.tag == tag)
            .map(|r| r.abundance)
            .fold(0.0, f32::max)
    }

    pub fn has_resource(&self, tag: ResourceTag) -> bool {
        self.abundance(tag) > 0.0
    }

    pub fn has_hazard(&self, hazard: Hazard) -> bool {
        self.hazards.contains(&hazard)
    }

    /// True if some route out of here does not need the canoe
    pub fn has_overland_route(&self) -> bool {
        self.edges.iter().any(|e| !e.mode.requires_canoe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slough() -> Location {
        Location::new("murky_slough", "Murky Slough")
            .with_edge(Edge::paddle("start_hammock", 20, 0.2))
            .with_edge(Edge::paddle("river_fork", 24, 0.4))
            .with_resource(ResourceTag::Fish, 0.6)
            .with_resource(ResourceTag::Reeds, 0.8)
            .with_hazard(Hazard::SubmergedLogs)
    }

    #[test]
    fn test_edge_lookup() {
        let loc = slough();
        assert_eq!(loc.edge_to(&LocationId::new("river_fork")).map(|e| e.base_hours), Some(24));
        assert!(loc.edge_to(&LocationId::new("coastal_mound")).is_none());
    }

    #[test]
    fn test_abundance() {
        let loc = slough();
        assert_eq!(loc.abundance(ResourceTag::Fish), 0.6);
        assert_eq!(loc.abundance(ResourceTag::Timber), 0.0);
        assert!(!loc.has_resource(ResourceTag::SmallGame));
    }

    #[test]
    fn test_overland_route() {
        let loc = slough();
        assert!(!loc.has_overland_route());
        let loc = loc.with_edge(Edge::trek("shallow_marsh", 30, 0.1));
        assert!(loc.has_overland_route());
    }

    #[test]
    fn test_travel_mode_default_is_paddle() {
        let edge: Edge = toml::from_str("to = \"x\"\nbase_hours = 5\n").unwrap();
        assert_eq!(edge.mode, TravelMode::Paddle);
        assert!(edge.mode.requires_canoe());
        assert_eq!(edge.risk, 0.0);
    }
}
