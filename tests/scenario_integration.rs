//! End-to-end expedition scenarios

use everglades_escape::actions::InventoryOp;
use everglades_escape::campaign::{Edge, Location, LocationGraph, ResourceTag, Resources, Rations, ToolKind};
use everglades_escape::core::config::Tunables;
use everglades_escape::core::types::{MemberId, Span};
use everglades_escape::entity::member::MemberSpec;
use everglades_escape::events::EventCatalog;
use everglades_escape::scenario;
use everglades_escape::{
    ActionCommand, ActionError, Expedition, GameConfig, LossReason, SavePoint, Status, TurnError,
};

fn two_stop_graph(hours: u32) -> LocationGraph {
    LocationGraph::new(vec![
        Location::new("camp", "Camp").with_edge(Edge::paddle("mound", hours, 0.0)),
        Location::new("mound", "Mound").with_edge(Edge::paddle("camp", hours, 0.0)),
    ])
    .unwrap()
}

fn quiet(config: GameConfig) -> GameConfig {
    config.with_events(EventCatalog::empty())
}

#[test]
fn test_journey_longer_than_time_left_is_lost() {
    let config = quiet(
        GameConfig::new(two_stop_graph(48), "camp", "mound", vec![MemberSpec::new("api")])
            .with_time_limit_days(1),
    );
    let mut exp = Expedition::new_game(config).unwrap();

    let report = exp.apply_action(ActionCommand::travel("mound")).unwrap();

    assert_eq!(report.status, Status::Lost(LossReason::OutOfTime));
    assert_eq!(report.hours_elapsed, 48);
    assert_eq!(report.days.len(), 2);
    assert!(exp.state().time_remaining() <= -24);
    assert_eq!(exp.state().current_location().as_str(), "camp");
    assert!(report.action.moved_to.is_none());
}

#[test]
fn test_start_at_destination_is_won() {
    let config = quiet(GameConfig::new(
        two_stop_graph(10),
        "mound",
        "mound",
        vec![MemberSpec::new("api")],
    ));
    let mut exp = Expedition::new_game(config).unwrap();
    assert_eq!(exp.status(), Status::Won);
    assert!(matches!(
        exp.apply_action(ActionCommand::Rest { hours: 8 }),
        Err(TurnError::GameOver { status: Status::Won })
    ));
}

#[test]
fn test_snakebites_wipe_out_the_party() {
    let tunables = Tunables {
        snakebite_chance: 1.0,
        ..Tunables::default()
    };
    // No small game at camp, so every hunt fails and every failure bites
    let config = quiet(
        GameConfig::new(two_stop_graph(10), "camp", "mound", vec![MemberSpec::new("api")])
            .with_tunables(tunables)
            .with_resources(Resources::new(50.0, 100.0).with_tool(ToolKind::HuntingSpear, 100.0)),
    );
    let mut exp = Expedition::new_game(config).unwrap();
    let api = MemberId::new("api");

    let mut turns = 0;
    while !exp.status().is_terminal() {
        let report = exp.apply_action(ActionCommand::Hunt).unwrap();
        let health = exp.state().member(&api).unwrap().health();
        if report.status == Status::Ongoing {
            assert!(health > 0.0);
        } else {
            assert_eq!(report.status, Status::Lost(LossReason::PartyLost));
            assert_eq!(health, 0.0);
        }
        turns += 1;
        assert!(turns < 50, "party should not survive this many bites");
    }
    assert_eq!(exp.state().living_count(), 0);
}

#[test]
fn test_repair_without_materials_is_rejected() {
    let config = quiet(
        GameConfig::new(two_stop_graph(10), "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 30.0)),
    );
    let mut exp = Expedition::new_game(config).unwrap();
    let before = exp.save_point();

    let err = exp
        .apply_action(ActionCommand::RepairCanoe { hours: 4 })
        .unwrap_err();

    assert!(matches!(
        err,
        TurnError::Rejected(ActionError::MissingMaterials { .. })
    ));
    assert_eq!(exp.save_point(), before);
}

#[test]
fn test_repair_at_timber_is_free() {
    let graph = LocationGraph::new(vec![
        Location::new("camp", "Camp")
            .with_resource(ResourceTag::Timber, 0.5)
            .with_edge(Edge::paddle("mound", 10, 0.0)),
        Location::new("mound", "Mound"),
    ])
    .unwrap();
    let config = quiet(
        GameConfig::new(graph, "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 30.0)),
    );
    let mut exp = Expedition::new_game(config).unwrap();

    let report = exp.apply_action(ActionCommand::RepairCanoe { hours: 5 }).unwrap();
    assert_eq!(report.action.resources.canoe_condition, 20.0);
    assert_eq!(exp.state().resources().canoe_condition, 50.0);
}

#[test]
fn test_wrecked_canoe_strands_party_on_water() {
    let config = quiet(
        GameConfig::new(two_stop_graph(10), "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 0.0)),
    );
    let exp = Expedition::new_game(config).unwrap();
    assert_eq!(exp.status(), Status::Lost(LossReason::CanoeDestroyed));
}

#[test]
fn test_overland_route_keeps_party_going() {
    let graph = LocationGraph::new(vec![
        Location::new("camp", "Camp").with_edge(Edge::trek("mound", 30, 0.0)),
        Location::new("mound", "Mound"),
    ])
    .unwrap();
    let config = quiet(
        GameConfig::new(graph, "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 0.0)),
    );
    let mut exp = Expedition::new_game(config).unwrap();
    assert_eq!(exp.status(), Status::Ongoing);

    let report = exp.apply_action(ActionCommand::travel("mound")).unwrap();
    assert_eq!(report.status, Status::Won);
}

#[test]
fn test_inventory_changes_are_instant() {
    let config = quiet(
        GameConfig::new(two_stop_graph(10), "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 100.0)),
    );
    let mut exp = Expedition::new_game(config).unwrap();

    let report = exp
        .apply_action(ActionCommand::ManageInventory {
            op: InventoryOp::SetRations {
                rations: Rations::Meager,
            },
        })
        .unwrap();
    assert_eq!(report.hours_elapsed, 0);
    assert!(report.days.is_empty());
    assert_eq!(exp.state().rations(), Rations::Meager);
    assert_eq!(exp.state().turn(), 1);
}

#[test]
fn test_meager_rations_stretch_food() {
    let base = quiet(
        GameConfig::new(two_stop_graph(10), "camp", "mound", vec![MemberSpec::new("api")])
            .with_resources(Resources::new(10.0, 100.0))
            .with_tunables(Tunables {
                spoilage_rate: 0.0,
                ..Tunables::default()
            }),
    );

    let mut normal = Expedition::new_game(base.clone()).unwrap();
    normal.apply_action(ActionCommand::Rest { hours: 24 }).unwrap();

    let mut meager = Expedition::new_game(base).unwrap();
    meager
        .apply_action(ActionCommand::ManageInventory {
            op: InventoryOp::SetRations {
                rations: Rations::Meager,
            },
        })
        .unwrap();
    meager.apply_action(ActionCommand::Rest { hours: 24 }).unwrap();

    assert_eq!(normal.state().resources().food, 9.0);
    assert_eq!(meager.state().resources().food, 9.5);
}

#[test]
fn test_same_seed_same_story() {
    let script = [
        "forage_and_fish",
        "travel murky_slough",
        "hunt",
        "rest 12",
        "travel river_fork",
        "forage_and_fish",
    ];

    let play = || {
        let mut exp = Expedition::new_game(scenario::everglades().unwrap()).unwrap();
        let mut reports = Vec::new();
        for line in script {
            if exp.status().is_terminal() {
                break;
            }
            let command = ActionCommand::parse(line).unwrap();
            reports.push(exp.apply_action(command));
        }
        (reports, exp.save_point())
    };

    let (a_reports, a_save) = play();
    let (b_reports, b_save) = play();
    assert_eq!(a_reports, b_reports);
    assert_eq!(a_save, b_save);
}

#[test]
fn test_resume_matches_uninterrupted_run() {
    let config = scenario::everglades().unwrap();
    let commands = [
        ActionCommand::ForageAndFish,
        ActionCommand::travel("murky_slough"),
        ActionCommand::Hunt,
        ActionCommand::Rest { hours: 10 },
        ActionCommand::ForageAndFish,
    ];

    let mut straight = Expedition::new_game(config.clone()).unwrap();
    let mut saved: Option<SavePoint> = None;
    for (i, command) in commands.iter().enumerate() {
        if i == 2 {
            let json = serde_json::to_string(&straight.save_point()).unwrap();
            saved = Some(serde_json::from_str(&json).unwrap());
        }
        let _ = straight.apply_action(command.clone());
    }

    let mut resumed = Expedition::resume(config, saved.unwrap()).unwrap();
    for command in &commands[2..] {
        let _ = resumed.apply_action(command.clone());
    }

    assert_eq!(resumed.save_point(), straight.save_point());
}

#[test]
fn test_bundled_scenario_is_winnable_on_the_fast_route() {
    let config = quiet(scenario::everglades().unwrap()).with_tunables(Tunables {
        canoe_scrape_damage: Span::new(0.0, 0.0),
        canoe_breach_damage: Span::new(0.0, 0.0),
        ..Tunables::default()
    });
    let route = config
        .graph
        .fastest_route(&config.start, &config.destination)
        .unwrap();
    let mut exp = Expedition::new_game(config).unwrap();

    for hop in route.iter().skip(1) {
        let report = exp
            .apply_action(ActionCommand::Travel { to: hop.clone() })
            .unwrap();
        assert_eq!(report.action.moved_to.as_ref(), Some(hop));
    }
    assert_eq!(exp.status(), Status::Won);
}
