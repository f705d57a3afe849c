//! Property tests over random command sequences on the bundled scenario

use proptest::prelude::*;

use everglades_escape::actions::InventoryOp;
use everglades_escape::campaign::{Rations, ResourceKind, MAX_CANOE_CONDITION};
use everglades_escape::core::types::{LocationId, MemberId};
use everglades_escape::scenario;
use everglades_escape::{ActionCommand, Expedition, TurnError};

const PLACES: [&str; 6] = [
    "start_hammock",
    "murky_slough",
    "shallow_marsh",
    "river_fork",
    "coastal_mound",
    "nowhere",
];

fn command() -> impl Strategy<Value = ActionCommand> {
    prop_oneof![
        (0..PLACES.len()).prop_map(|i| ActionCommand::Travel {
            to: LocationId::new(PLACES[i]),
        }),
        Just(ActionCommand::ForageAndFish),
        Just(ActionCommand::Hunt),
        (0u32..30).prop_map(|hours| ActionCommand::RepairCanoe { hours }),
        (0u32..80).prop_map(|hours| ActionCommand::Rest { hours }),
        prop_oneof![Just(Rations::Meager), Just(Rations::Normal), Just(Rations::Filling)]
            .prop_map(|rations| ActionCommand::ManageInventory {
                op: InventoryOp::SetRations { rations },
            }),
        (0.0f32..5.0).prop_map(|amount| ActionCommand::ManageInventory {
            op: InventoryOp::Discard {
                resource: ResourceKind::Food,
                amount,
            },
        }),
        prop_oneof![Just("api"), Just("chayton"), Just("ghost")].prop_map(|id| {
            ActionCommand::ManageInventory {
                op: InventoryOp::TreatMember {
                    member: MemberId::new(id),
                },
            }
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resources_and_health_stay_in_bounds(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..40),
    ) {
        let mut config = scenario::everglades().unwrap();
        config.seed = seed;
        let mut exp = Expedition::new_game(config).unwrap();

        for command in commands {
            let _ = exp.apply_action(command);
            let state = exp.state();
            let res = state.resources();
            prop_assert!(res.in_bounds());
            prop_assert!(res.food >= 0.0);
            prop_assert!((0.0..=MAX_CANOE_CONDITION).contains(&res.canoe_condition));
            for member in state.party() {
                prop_assert!(member.health() >= 0.0);
                prop_assert!(member.health() <= member.max_health());
            }
        }
    }

    #[test]
    fn terminal_status_is_final(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..60),
    ) {
        let mut config = scenario::everglades().unwrap();
        config.seed = seed;
        let mut exp = Expedition::new_game(config).unwrap();

        let mut ended = None;
        for command in commands {
            let result = exp.apply_action(command);
            match ended {
                Some(status) => {
                    prop_assert_eq!(result, Err(TurnError::GameOver { status }));
                    prop_assert_eq!(exp.status(), status);
                }
                None if exp.status().is_terminal() => ended = Some(exp.status()),
                None => {}
            }
        }
    }

    #[test]
    fn rejected_actions_leave_no_trace(
        seed in any::<u64>(),
        prefix in prop::collection::vec(command(), 0..10),
    ) {
        let mut config = scenario::everglades().unwrap();
        config.seed = seed;
        let mut exp = Expedition::new_game(config).unwrap();
        for command in prefix {
            let _ = exp.apply_action(command);
        }
        prop_assume!(!exp.status().is_terminal());

        let before = exp.save_point();
        let history = exp.history().len();
        let result = exp.apply_action(ActionCommand::travel("nowhere"));
        prop_assert!(matches!(result, Err(TurnError::Rejected(_))));
        prop_assert_eq!(exp.save_point(), before);
        prop_assert_eq!(exp.history().len(), history);
    }

    #[test]
    fn one_upkeep_per_day_boundary(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..40),
    ) {
        let mut config = scenario::everglades().unwrap();
        config.seed = seed;
        let mut exp = Expedition::new_game(config).unwrap();

        for command in commands {
            let day_before = exp.state().day();
            let time_before = exp.state().time_remaining();
            if let Ok(report) = exp.apply_action(command) {
                let crossed = exp.state().day() - day_before;
                prop_assert_eq!(report.days.len() as u32, crossed);
                prop_assert_eq!(
                    time_before - exp.state().time_remaining(),
                    report.hours_elapsed as i64
                );
            }
        }
    }
}
