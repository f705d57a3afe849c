//! Expedition - the simulation facade
//!
//! Owns one run: its configuration, the game state and the seeded random
//! source. Each call to `apply_action` is one atomic turn: resolve the
//! action, maybe fire an event, advance time, evaluate. A rejected action
//! changes nothing, not even the random stream.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::outcome::{self, Status};
use super::snapshot::GameSnapshot;
use super::state::GameState;
use super::time::{self, DailySummary};
use crate::actions::catalog::{ActionCommand, ActionResult};
use crate::actions::resolver;
use crate::campaign::map::LocationGraph;
use crate::campaign::supply::Resources;
use crate::core::config::Tunables;
use crate::core::error::{ConfigError, TurnError};
use crate::core::types::{Hours, LocationId};
use crate::entity::member::MemberSpec;
use crate::events::catalog::EventCatalog;
use crate::events::engine::{self, EventReport};
use crate::events::template::Effect;

/// Default time budget in days
pub const DEFAULT_TIME_LIMIT_DAYS: u32 = 30;

/// Everything needed to start a run
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub name: String,
    pub start: LocationId,
    pub destination: LocationId,
    pub roster: Vec<MemberSpec>,
    pub resources: Resources,
    pub time_limit_days: u32,
    pub seed: u64,
    pub graph: LocationGraph,
    pub events: EventCatalog,
    pub tunables: Tunables,
    /// A wrecked canoe strands the party unless an overland route exists
    pub canoe_required: bool,
}

impl GameConfig {
    pub fn new(
        graph: LocationGraph,
        start: impl Into<String>,
        destination: impl Into<String>,
        roster: Vec<MemberSpec>,
    ) -> Self {
        Self {
            name: String::from("expedition"),
            start: LocationId::new(start),
            destination: LocationId::new(destination),
            roster,
            resources: Resources::default(),
            time_limit_days: DEFAULT_TIME_LIMIT_DAYS,
            seed: 0,
            graph,
            events: EventCatalog::builtin(),
            tunables: Tunables::default(),
            canoe_required: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_time_limit_days(mut self, days: u32) -> Self {
        self.time_limit_days = days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_events(mut self, events: EventCatalog) -> Self {
        self.events = events;
        self
    }

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }

    pub fn with_canoe_required(mut self, required: bool) -> Self {
        self.canoe_required = required;
        self
    }

    /// Time budget in hours
    pub fn time_limit_hours(&self) -> Hours {
        self.time_limit_days.saturating_mul(self.tunables.hours_per_day)
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tunables.validate()?;

        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let mut ids = BTreeSet::new();
        for spec in &self.roster {
            if !ids.insert(&spec.id) {
                return Err(ConfigError::DuplicateMember(spec.id.clone()));
            }
        }

        self.graph.validate_route(&self.start, &self.destination)?;

        // A delay longer than the whole budget can only end the run
        let limit = self.time_limit_hours();
        for template in self.events.templates() {
            let delay: u64 = template
                .effects
                .iter()
                .map(|effect| match effect {
                    Effect::Delay { hours } => *hours as u64,
                    _ => 0,
                })
                .sum();
            if delay > limit as u64 {
                return Err(ConfigError::InvalidEvent {
                    id: template.id.clone(),
                    reason: format!("delay of {} hours exceeds the {} hour budget", delay, limit),
                });
            }
        }
        Ok(())
    }

    fn initial_state(&self) -> GameState {
        GameState::new(
            self.start.clone(),
            self.destination.clone(),
            &self.roster,
            self.resources.clone(),
            self.time_limit_hours(),
            self.tunables.hours_per_day,
        )
    }
}

/// Everything that happened in one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub action: ActionResult,
    pub event: Option<EventReport>,
    /// One entry per day boundary crossed during the turn
    pub days: Vec<DailySummary>,
    /// Hours charged, event delays included
    pub hours_elapsed: Hours,
    pub status: Status,
}

/// Exact resumption point: state plus the position of the random stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePoint {
    pub state: GameState,
    pub rng: ChaCha8Rng,
}

#[derive(Debug, Clone)]
pub struct Expedition {
    config: GameConfig,
    state: GameState,
    rng: ChaCha8Rng,
    history: Vec<TurnReport>,
}

impl Expedition {
    /// Validate the configuration and start a run.
    ///
    /// The status is evaluated once up front, so a run that starts at its
    /// destination is already won.
    pub fn new_game(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = config.initial_state();
        state.status = outcome::evaluate(&state, &config.graph, config.canoe_required);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        info!(
            name = %config.name,
            seed = config.seed,
            start = %config.start,
            destination = %config.destination,
            party = config.roster.len(),
            status = ?state.status,
            "new expedition"
        );

        Ok(Self {
            config,
            state,
            rng,
            history: Vec::new(),
        })
    }

    /// Continue a run from a save point
    pub fn resume(config: GameConfig, save: SavePoint) -> Result<Self, ConfigError> {
        config.validate()?;
        if !config.graph.contains(save.state.current_location()) {
            return Err(ConfigError::UnknownLocation(
                save.state.current_location().clone(),
            ));
        }
        if save.state.destination() != &config.destination {
            return Err(ConfigError::IncompatibleSave(format!(
                "save heads for {}, configuration for {}",
                save.state.destination(),
                config.destination
            )));
        }
        let save_day = save.state.calendar().hours_per_day();
        if save_day != config.tunables.hours_per_day {
            return Err(ConfigError::IncompatibleSave(format!(
                "save uses {} hour days, configuration {}",
                save_day, config.tunables.hours_per_day
            )));
        }
        Ok(Self {
            config,
            state: save.state,
            rng: save.rng,
            history: Vec::new(),
        })
    }

    /// Play one turn
    pub fn apply_action(&mut self, command: ActionCommand) -> Result<TurnReport, TurnError> {
        if self.state.is_terminal() {
            return Err(TurnError::GameOver {
                status: self.state.status,
            });
        }

        // Work on a copy of the stream; commit only if the turn goes through
        let mut rng = self.rng.clone();

        let (mut next, action) =
            match resolver::resolve(&self.state, &command, &self.config, &mut rng) {
                Ok(resolved) => resolved,
                Err(err) => {
                    warn!(action = %command.kind(), error = %err, "action rejected");
                    return Err(err.into());
                }
            };
        next.last_action = Some(command.kind());
        next.turn += 1;

        let mut hours = action.hours;
        let mut event = None;
        if action.hours > 0 {
            if let Some(fired) = engine::maybe_fire(&next, action.hours, &self.config, &mut rng) {
                hours = hours.saturating_add(fired.report.delay_hours);
                next = fired.state;
                event = Some(fired.report);
            }
        }

        let days = time::advance(&mut next, hours, &self.config, &mut rng);
        next.status = outcome::evaluate(&next, &self.config.graph, self.config.canoe_required);

        if next.status.is_terminal() {
            info!(
                turn = next.turn,
                day = next.day(),
                status = ?next.status,
                "expedition over"
            );
        }

        let report = TurnReport {
            turn: next.turn,
            action,
            event,
            days,
            hours_elapsed: hours,
            status: next.status,
        };

        self.state = next;
        self.rng = rng;
        self.history.push(report.clone());
        Ok(report)
    }

    pub fn query_snapshot(&self) -> GameSnapshot {
        GameSnapshot::of(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Turn reports since the run started (or was resumed)
    pub fn history(&self) -> &[TurnReport] {
        &self.history
    }

    pub fn save_point(&self) -> SavePoint {
        SavePoint {
            state: self.state.clone(),
            rng: self.rng.clone(),
        }
    }
}
