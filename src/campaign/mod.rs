//! Expedition map and supplies

pub mod location;
pub mod map;
pub mod supply;

pub use location::{Edge, Hazard, Location, ResourceSpot, ResourceTag, TravelMode};
pub use map::LocationGraph;
pub use supply::{
    ResourceDelta, ResourceKind, Resources, Rations, ToolKind, MAX_CANOE_CONDITION,
    MAX_TOOL_DURABILITY,
};
