use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");

    group.bench_function("open_50x50", |b| {
        b.iter_batched(
            || {
                let config = GameConfig::new((50, 50), 1).unwrap();
                Session::with_mine_layout(config, &[(49, 49)]).unwrap()
            },
            |mut session| black_box(session.reveal_cell((0, 0), &mut ())),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("random_50x50_500", |b| {
        let mut seed = 0;
        b.iter_batched(
            || {
                seed += 1;
                Session::new_game(50, 50, 500, seed).unwrap()
            },
            |mut session| black_box(session.reveal_cell((25, 25), &mut ())),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, first_reveal);
criterion_main!(benches);
