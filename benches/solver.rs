//! Benchmarks for the line-clear solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lineclear::engine::{apply, clear_lines};
use lineclear::movegen::legal_positions;
use lineclear::pieces::stock;
use lineclear::{Board, Piece, Puzzle, SearchConfig, Solver};

const OPENING: &str = include_str!("../puzzles/opening.txt");

fn batch(names: &[&str]) -> Vec<Piece> {
    names.iter().filter_map(|name| stock(name)).collect()
}

/// Benchmark the full three-piece search on the bundled puzzle.
fn bench_solve(c: &mut Criterion) {
    let puzzle: Puzzle = OPENING.parse().expect("bundled puzzle parses");

    c.bench_function("solve_opening", |b| {
        b.iter(|| puzzle.solve(black_box(SearchConfig::default())))
    });
}

/// Benchmark the worst case: small pieces on an empty board.
fn bench_solve_empty_board(c: &mut Criterion) {
    let board = Board::empty(Board::DEFAULT_SIZE).expect("default size is valid");
    let pieces = batch(&["dot", "domino", "corner"]);

    let mut group = c.benchmark_group("empty_board");
    group.sample_size(10);
    group.bench_function("solve_small_pieces", |b| {
        b.iter(|| Solver::default().solve(black_box(&board), black_box(&pieces)))
    });
    group.bench_function("solve_capped", |b| {
        let solver = Solver::new(SearchConfig {
            max_positions: Some(8),
            ..SearchConfig::default()
        });
        b.iter(|| solver.solve(black_box(&board), black_box(&pieces)))
    });
    group.finish();
}

/// Benchmark enumerating anchors for one piece.
fn bench_legal_positions(c: &mut Criterion) {
    let puzzle: Puzzle = OPENING.parse().expect("bundled puzzle parses");
    let tee = stock("tee").expect("stock shape");

    c.bench_function("legal_positions", |b| {
        b.iter(|| legal_positions(black_box(&puzzle.board), black_box(&tee)))
    });
}

/// Benchmark placing a piece and clearing the lines it completes.
fn bench_apply(c: &mut Criterion) {
    let board: Board = "###.####\n\
                        ###.####\n\
                        ........\n\
                        ........\n\
                        ........\n\
                        ........\n\
                        ........\n\
                        ........"
        .parse()
        .expect("board parses");
    let domino = stock("domino-v").expect("stock shape");
    let at = lineclear::Position::new(0, 3);

    c.bench_function("apply_double_clear", |b| {
        b.iter(|| apply(black_box(&board), black_box(&domino), at))
    });
    c.bench_function("clear_lines_no_lines", |b| {
        b.iter(|| clear_lines(black_box(&board)))
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_empty_board,
    bench_legal_positions,
    bench_apply
);
criterion_main!(benches);
