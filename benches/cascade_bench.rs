use criterion::{Criterion, criterion_group, criterion_main};
use gemgrid::matcher::scan_board;
use gemgrid::{BoardConfig, Grid, Position, Session, SessionRng, TurnTracker};
use std::hint::black_box;

struct Discard;

impl TurnTracker for Discard {
    fn process_turn(&mut self, _cleared: usize, _subtract_moves: bool) {}
}

fn bench_initialize_8x8() {
    let mut rng = SessionRng::from_random();
    let grid = Grid::initialize(&BoardConfig::default(), &mut rng).unwrap();
    black_box(grid);
}

fn bench_scan_8x8(grid: &Grid) {
    let mut grid = grid.clone();
    black_box(scan_board(&mut grid).unwrap());
}

fn bench_swap_sweep() {
    let mut session =
        Session::new(BoardConfig::default(), SessionRng::from_random(), Discard).unwrap();
    for y in 0..8 {
        for x in 0..7 {
            session.select_at(Position::new(x, y)).unwrap();
            black_box(session.select_at(Position::new(x + 1, y)).unwrap());
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("initialize 8x8", |b| b.iter(bench_initialize_8x8));
    let mut rng = SessionRng::new(42);
    let grid = Grid::initialize(&BoardConfig::default(), &mut rng).unwrap();
    c.bench_function("scan 8x8", |b| b.iter(|| bench_scan_8x8(&grid)));
    c.bench_function("swap sweep 8x8", |b| b.iter(bench_swap_sweep));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
