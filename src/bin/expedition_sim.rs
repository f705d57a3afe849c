//! Headless Expedition Runner
//!
//! Plays a scenario from a command script or with a simple autopilot and
//! prints the turn reports as JSON lines or text.

use clap::Parser;
use everglades_escape::campaign::supply::ResourceKind;
use everglades_escape::campaign::ResourceTag;
use everglades_escape::scenario;
use everglades_escape::{ActionCommand, Expedition, InventoryOp, TurnError, TurnReport};
use std::path::PathBuf;

/// Headless Expedition Runner - scripted or autopilot playthroughs
#[derive(Parser, Debug)]
#[command(name = "expedition_sim")]
#[command(about = "Run an Everglades Escape scenario without a UI")]
struct Args {
    /// Scenario TOML file (defaults to the bundled Everglades scenario)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// File with one command per line, e.g. `travel murky_slough`
    #[arg(long, conflicts_with = "autopilot")]
    script: Option<PathBuf>,

    /// Let a simple policy pick every action
    #[arg(long)]
    autopilot: bool,

    /// Stop after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.scenario {
        Some(path) => scenario::load_from_path(path)?,
        None => scenario::everglades()?,
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut expedition = Expedition::new_game(config)?;
    let json = args.format == "json";

    let script: Vec<String> = match &args.script {
        Some(path) => std::fs::read_to_string(path)?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(String::from)
            .collect(),
        None => Vec::new(),
    };
    if !args.autopilot && script.is_empty() {
        return Err("nothing to play: pass --script or --autopilot".into());
    }

    let mut lines = script.iter();
    for _ in 0..args.max_turns {
        if expedition.status().is_terminal() {
            break;
        }

        let command = if args.autopilot {
            autopilot(&expedition)
        } else {
            let Some(line) = lines.next() else { break };
            match ActionCommand::parse(line) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("skipping '{}': {}", line, e);
                    continue;
                }
            }
        };

        match expedition.apply_action(command.clone()) {
            Ok(report) => print_report(&report, json)?,
            Err(TurnError::Rejected(e)) => {
                eprintln!("rejected {:?}: {}", command, e);
                if args.autopilot {
                    // Waiting is always legal
                    let report = expedition.apply_action(ActionCommand::Rest { hours: 8 })?;
                    print_report(&report, json)?;
                }
            }
            Err(e @ TurnError::GameOver { .. }) => return Err(e.into()),
        }
    }

    let snapshot = expedition.query_snapshot();
    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        println!(
            "\nFinal: {:?} on day {} at {} ({} of {} alive, {:.1} food, canoe {:.0})",
            snapshot.status,
            snapshot.day,
            snapshot.current_location,
            snapshot.living_count(),
            snapshot.party.len(),
            snapshot.resources.food,
            snapshot.resources.canoe_condition,
        );
    }
    Ok(())
}

fn print_report(report: &TurnReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    println!(
        "[turn {:>3}] {} ({}h): {}",
        report.turn, report.action.kind, report.hours_elapsed, report.action.description
    );
    if let Some(event) = &report.event {
        println!("    event: {} - {}", event.name, event.outcomes.join(", "));
    }
    for day in &report.days {
        println!(
            "    day {}: ate {:.1}, spoiled {:.1}, underfed {}, deaths {}",
            day.day,
            day.food_eaten,
            day.food_spoiled,
            day.underfed.len(),
            day.deaths.len()
        );
    }
    Ok(())
}

/// Greedy policy: patch people, then the canoe, then food, then paddle on
fn autopilot(expedition: &Expedition) -> ActionCommand {
    let state = expedition.state();
    let config = expedition.config();
    let t = &config.tunables;
    let resources = state.resources();

    if resources.herbs >= t.herbs_per_treatment {
        if let Some(member) = state
            .living_members()
            .find(|m| m.statuses().any(|s| s.is_treatable()))
        {
            return ActionCommand::ManageInventory {
                op: InventoryOp::TreatMember {
                    member: member.id.clone(),
                },
            };
        }
    }

    let here = config.graph.get(state.current_location());
    let has_timber = here
        .map(|loc| loc.has_resource(ResourceTag::Timber))
        .unwrap_or(false);
    if resources.canoe_condition < t.canoe_risk_threshold
        && (has_timber || resources.materials >= t.materials_per_repair)
    {
        return ActionCommand::RepairCanoe {
            hours: t.max_repair_hours.min(10),
        };
    }

    let daily_need = state.living_count() as f32 * t.food_per_member;
    if resources.amount(ResourceKind::Food) < daily_need * 2.0 {
        let can_hunt = here
            .map(|loc| loc.abundance(ResourceTag::SmallGame) > 0.5)
            .unwrap_or(false);
        return if can_hunt {
            ActionCommand::Hunt
        } else {
            ActionCommand::ForageAndFish
        };
    }

    let next_hop = config
        .graph
        .fastest_route(state.current_location(), state.destination())
        .and_then(|path| path.get(1).cloned());
    match next_hop {
        Some(to) => ActionCommand::Travel { to },
        None => ActionCommand::Rest { hours: 8 },
    }
}
