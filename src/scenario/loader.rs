//! Scenario loading from TOML
//!
//! The file format mirrors `GameConfig` with a few conveniences: tools are
//! a list of `{ kind, durability }` tables, tunables and events may be
//! omitted (defaults and the built-in catalog are used).

use serde::Deserialize;
use std::path::Path;

use crate::campaign::location::Location;
use crate::campaign::map::LocationGraph;
use crate::campaign::supply::{Resources, ToolKind, DEFAULT_FOOD, MAX_CANOE_CONDITION, MAX_TOOL_DURABILITY};
use crate::core::config::Tunables;
use crate::core::error::ConfigError;
use crate::entity::member::MemberSpec;
use crate::events::catalog::EventCatalog;
use crate::events::template::EventTemplate;
use crate::simulation::expedition::{GameConfig, DEFAULT_TIME_LIMIT_DAYS};

/// The bundled five-location Everglades scenario
pub const EVERGLADES: &str = include_str!("../../data/scenarios/everglades.toml");

/// Load a scenario from a TOML file
pub fn load_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Parse and validate a scenario from a TOML string
pub fn parse_toml(content: &str) -> Result<GameConfig, ConfigError> {
    let raw: TomlScenario = toml::from_str(content)?;
    let config = raw.into_config()?;
    config.validate()?;
    Ok(config)
}

/// The bundled scenario, ready to play
pub fn everglades() -> Result<GameConfig, ConfigError> {
    parse_toml(EVERGLADES)
}

#[derive(Debug, Deserialize)]
struct TomlScenario {
    scenario: TomlHeader,
    #[serde(default)]
    resources: TomlResources,
    party: Vec<MemberSpec>,
    locations: Vec<Location>,
    #[serde(default)]
    tunables: Tunables,
    /// None means "use the built-in catalog"; an empty list disables events
    #[serde(default)]
    events: Option<Vec<EventTemplate>>,
}

#[derive(Debug, Deserialize)]
struct TomlHeader {
    #[serde(default = "default_name")]
    name: String,
    start: String,
    destination: String,
    #[serde(default = "default_time_limit")]
    time_limit_days: u32,
    #[serde(default)]
    seed: u64,
    #[serde(default = "default_true")]
    canoe_required: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TomlResources {
    food: f32,
    canoe_condition: f32,
    materials: f32,
    herbs: f32,
    tools: Vec<TomlTool>,
}

impl Default for TomlResources {
    fn default() -> Self {
        Self {
            food: DEFAULT_FOOD,
            canoe_condition: MAX_CANOE_CONDITION,
            materials: 0.0,
            herbs: 0.0,
            tools: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlTool {
    kind: ToolKind,
    #[serde(default = "default_durability")]
    durability: f32,
}

fn default_name() -> String {
    String::from("expedition")
}

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT_DAYS
}

fn default_true() -> bool {
    true
}

fn default_durability() -> f32 {
    MAX_TOOL_DURABILITY
}

impl TomlResources {
    fn into_resources(self) -> Resources {
        self.tools.into_iter().fold(
            Resources::new(self.food, self.canoe_condition)
                .with_materials(self.materials)
                .with_herbs(self.herbs),
            |res, tool| res.with_tool(tool.kind, tool.durability),
        )
    }
}

impl TomlScenario {
    fn into_config(self) -> Result<GameConfig, ConfigError> {
        let graph = LocationGraph::new(self.locations)?;
        let events = match self.events {
            Some(templates) => EventCatalog::new(templates)?,
            None => EventCatalog::builtin(),
        };

        Ok(GameConfig::new(
            graph,
            self.scenario.start,
            self.scenario.destination,
            self.party,
        )
        .with_name(self.scenario.name)
        .with_resources(self.resources.into_resources())
        .with_time_limit_days(self.scenario.time_limit_days)
        .with_seed(self.scenario.seed)
        .with_events(events)
        .with_tunables(self.tunables)
        .with_canoe_required(self.scenario.canoe_required))
    }
}
