use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameState, RandomSource, Tetromino};
use blockfall::engine::{best_placement, Match};
use blockfall::types::{Difficulty, Direction, ShapeKind, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut source = RandomSource::new(12345);
    let mut state = GameState::new(Difficulty::Normal, &mut source);
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += TICK_MS as u64;
            if !state.tick(black_box(now), &mut source) && state.game_over() {
                state.reset(&mut source);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row(y, Some(ShapeKind::I));
            }
            board.clear_full_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut source = RandomSource::new(12345);
    let mut state = GameState::new(Difficulty::Expert, &mut source);

    c.bench_function("hard_drop_and_spawn", |b| {
        b.iter(|| {
            if !state.hard_drop(&mut source) {
                state.reset(&mut source);
            }
        })
    });
}

fn bench_legality(c: &mut Criterion) {
    let mut board = Board::new();
    board.fill_row(19, Some(ShapeKind::Z));
    let piece = Tetromino::new(ShapeKind::H);

    c.bench_function("is_legal", |b| {
        b.iter(|| board.is_legal(black_box(&piece)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut source = RandomSource::new(12345);
    let mut state = GameState::new(Difficulty::Normal, &mut source);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(Direction::Cw);
        })
    });
}

fn bench_autopilot(c: &mut Criterion) {
    let game = Match::new(2, Difficulty::Normal, 12345).unwrap();

    c.bench_function("best_placement", |b| {
        b.iter(|| best_placement(black_box(game.player(1).unwrap())))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_legality,
    bench_rotate,
    bench_autopilot
);
criterion_main!(benches);
