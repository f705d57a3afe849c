use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use everglades_escape::scenario;
use everglades_escape::{ActionCommand, Expedition};

fn bench_turns(c: &mut Criterion) {
    let config = match scenario::everglades() {
        Ok(config) => config,
        Err(e) => panic!("bundled scenario failed to load: {}", e),
    };

    c.bench_function("forage_turn", |b| {
        b.iter_batched(
            || Expedition::new_game(config.clone()).ok(),
            |exp| {
                if let Some(mut exp) = exp {
                    let _ = black_box(exp.apply_action(ActionCommand::ForageAndFish));
                }
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("rest_ten_days", |b| {
        b.iter_batched(
            || Expedition::new_game(config.clone()).ok(),
            |exp| {
                if let Some(mut exp) = exp {
                    for _ in 0..10 {
                        let _ = black_box(exp.apply_action(ActionCommand::Rest { hours: 24 }));
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("fastest_route", |b| {
        b.iter(|| {
            black_box(
                config
                    .graph
                    .fastest_route(black_box(&config.start), black_box(&config.destination)),
            )
        })
    });
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
