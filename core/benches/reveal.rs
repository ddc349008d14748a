use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};
use sapper_core::*;
use std::hint::black_box;

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        group.bench_function(difficulty.name(), |b| {
            b.iter(|| {
                let mut board = Board::create(config);
                board
                    .place_mines((0, 0), config.mines, &mut rng)
                    .expect("preset leaves safe cells");
                black_box(board)
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal");
    group.bench_function("empty_hard_board", |b| {
        let config = GameConfig::new((16, 30), 0).expect("valid config");
        b.iter(|| {
            let mut game = GameSession::with_generator(config, FixedMineGenerator::default());
            black_box(game.reveal((8, 15)))
        })
    });
    group.bench_function("hard_first_click", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut game = GameSession::with_generator(
                Difficulty::Hard.config(),
                RandomMineGenerator::new(seed),
            );
            black_box(game.reveal((8, 15)))
        })
    });
    group.finish();
}

criterion_group!(benches, placement, flood_fill);
criterion_main!(benches);
