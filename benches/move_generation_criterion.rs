//! Root move generation on the stored problems: full enumeration, the
//! first-legal probe the search uses at its last ply, and a divided perft.
//! `MATE_BENCH_DEPTH` sets the perft depth (default 2).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mate_solver::move_generation::legal_move_generator::LegalMoveGenerator;
use mate_solver::move_generation::move_generator::MoveGenerator;
use mate_solver::move_generation::perft::{perft, perft_divide};
use mate_solver::utils::problem_parser::{parse_problem, ChessProblem, ProblemOptions};

const PROBLEMS: &[(&str, &str)] = &[
    ("mate_in_one", include_str!("../problems/mate_in_one.txt")),
    ("mate_in_two", include_str!("../problems/mate_in_two.txt")),
    ("castling_en_passant", include_str!("../problems/castling_en_passant.txt")),
    ("promotion", include_str!("../problems/promotion.txt")),
];

fn load_all() -> Vec<(String, ChessProblem)> {
    let mut loaded = Vec::new();
    for &(name, text) in PROBLEMS {
        for mirror in [false, true] {
            let problem = parse_problem(text, ProblemOptions { mirror })
                .unwrap_or_else(|err| panic!("{name} should load: {err}"));
            let label = if mirror { format!("{name}_mirrored") } else { name.to_owned() };
            loaded.push((label, problem));
        }
    }
    loaded
}

fn perft_depth() -> u8 {
    std::env::var("MATE_BENCH_DEPTH")
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(2)
        .max(1)
}

fn bench_root_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_moves");

    for (label, problem) in load_all() {
        let mut game = problem.game_state;
        let expected = LegalMoveGenerator
            .generate_legal_moves(&mut game)
            .expect("generation should run")
            .len();
        // The probe and full enumeration have to agree before either is timed.
        assert_eq!(
            LegalMoveGenerator.has_legal_move(&mut game).expect("probe should run"),
            expected > 0,
            "{label}"
        );

        group.bench_function(BenchmarkId::new("all", &label), |b| {
            b.iter(|| {
                let moves = LegalMoveGenerator
                    .generate_legal_moves(black_box(&mut game))
                    .expect("generation should run");
                assert_eq!(moves.len(), expected);
                black_box(moves.len())
            });
        });

        group.bench_function(BenchmarkId::new("first_legal", &label), |b| {
            b.iter(|| {
                black_box(
                    LegalMoveGenerator
                        .has_legal_move(black_box(&mut game))
                        .expect("probe should run"),
                )
            });
        });
    }

    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let depth = perft_depth();
    let mut group = c.benchmark_group(format!("divide_d{depth}"));
    group.sample_size(20);

    for (label, problem) in load_all() {
        let mut game = problem.game_state;
        let total = perft(&LegalMoveGenerator, &mut game, depth).expect("perft should run");
        let summed: usize = perft_divide(&LegalMoveGenerator, &mut game, depth)
            .expect("divide should run")
            .iter()
            .map(|(_, counts)| counts.nodes)
            .sum();
        assert_eq!(summed, total.nodes, "divide mismatch for {label}");

        group.bench_function(BenchmarkId::from_parameter(&label), |b| {
            b.iter(|| {
                let divided = perft_divide(&LegalMoveGenerator, black_box(&mut game), depth)
                    .expect("divide should run");
                black_box(divided.len())
            });
        });
    }

    group.finish();
}

criterion_group!(move_generation_benches, bench_root_moves, bench_divide);
criterion_main!(move_generation_benches);
