use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mate_solver::game_state::game_state::GameState;
use mate_solver::move_generation::legal_move_generator::LegalMoveGenerator;
use mate_solver::search::mate_search::{solve_mate_in, SearchConfig, SolveMode};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    moves_to_mate: u8,
    mode: SolveMode,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "back_rank_m1",
        fen: "7k/8/6K1/8/8/8/8/R7 w - - 0 1",
        moves_to_mate: 1,
        mode: SolveMode::AllWinning,
    },
    BenchCase {
        name: "back_rank_m2_first",
        fen: "7k/6pp/2b5/8/8/8/5PPP/RR4K1 w - - 0 1",
        moves_to_mate: 2,
        mode: SolveMode::FirstWinning,
    },
    BenchCase {
        name: "back_rank_m2_all",
        fen: "7k/6pp/2b5/8/8/8/5PPP/RR4K1 w - - 0 1",
        moves_to_mate: 2,
        mode: SolveMode::AllWinning,
    },
    BenchCase {
        name: "queen_m1_all",
        fen: "7k/8/4Q1K1/8/8/8/8/8 w - - 0 1",
        moves_to_mate: 1,
        mode: SolveMode::AllWinning,
    },
];

fn bench_mate_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mate_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let mut game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let config = SearchConfig { mode: case.mode };

        // Correctness guard before benchmarking.
        let warmup = solve_mate_in(&mut game, &LegalMoveGenerator, case.moves_to_mate, config)
            .expect("search should run");
        assert!(warmup.is_solved(), "{} should be solvable", case.name);

        group.bench_function(BenchmarkId::from_parameter(case.name), |b| {
            b.iter(|| {
                let result = solve_mate_in(
                    black_box(&mut game),
                    &LegalMoveGenerator,
                    black_box(case.moves_to_mate),
                    config,
                )
                .expect("mate search benchmark run should succeed");
                black_box(result.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(mate_search_benches, bench_mate_search);
criterion_main!(mate_search_benches);
