//! Command-line front end for the mate solver.
//!
//! Usage:
//! `mate-solver solve problems/mate_in_two.txt`
//! `mate-solver solve --fen "7k/8/6K1/8/8/8/8/R7 w - - 0 1" --moves 1`
//! `mate-solver moves problems/mate_in_one.txt --check problems/mate_in_one_moves.txt`
//! `mate-solver perft --fen "<fen>" --depth 4 --divide`
//! `mate-solver selfcheck problems/castling_en_passant.txt --walks 100`

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::info;

use mate_solver::game_state::game_state::GameState;
use mate_solver::move_generation::legal_move_generator::LegalMoveGenerator;
use mate_solver::move_generation::move_generator::MoveGenerator;
use mate_solver::move_generation::perft::{perft, perft_divide};
use mate_solver::search::mate_search::{solve_mate_in, SearchConfig, SolveMode};
use mate_solver::search::solution::Solution;
use mate_solver::utils::fen_generator::generate_fen;
use mate_solver::utils::long_algebraic::move_to_long_algebraic;
use mate_solver::utils::move_transcript::{
    compare_transcripts, load_transcript, transcript_from_moves, write_transcript,
};
use mate_solver::utils::problem_parser::{load_problem, ChessProblem, ProblemOptions};
use mate_solver::utils::random_walk::run_random_walks;

#[derive(Parser, Debug)]
#[command(author, version, about = "Finds forced mates in chess problems", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a forced mate
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Report every winning first move instead of the first one found
        #[arg(long)]
        all: bool,
    },
    /// List the legal moves of the side to move
    Moves {
        #[command(flatten)]
        input: InputArgs,

        /// Compare the moves against a recorded transcript
        #[arg(long)]
        check: Option<PathBuf>,

        /// Write the moves as a transcript
        #[arg(long)]
        write: Option<PathBuf>,
    },
    /// Count move paths to a fixed depth
    Perft {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, default_value_t = 3)]
        depth: u8,

        /// Break the count down per root move
        #[arg(long)]
        divide: bool,
    },
    /// Run randomized apply/undo walks from the position
    Selfcheck {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value_t = 50)]
        walks: usize,

        #[arg(long, default_value_t = 40)]
        plies: usize,

        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Problem file in the solver's text format
    #[arg(conflicts_with = "fen", required_unless_present = "fen")]
    problem: Option<PathBuf>,

    /// Position as FEN instead of a problem file
    #[arg(long)]
    fen: Option<String>,

    /// Moves to mate when the position comes from --fen
    #[arg(long, default_value_t = 1)]
    moves: u8,

    /// Mirror the problem so that Dark attacks
    #[arg(long, conflicts_with = "fen")]
    mirror: bool,
}

impl InputArgs {
    fn load(&self) -> Result<ChessProblem> {
        if let Some(fen) = &self.fen {
            let game_state = GameState::from_fen(fen).context("cannot parse --fen")?;
            return Ok(ChessProblem {
                moves_to_mate: self.moves,
                game_state,
            });
        }

        let Some(path) = &self.problem else {
            bail!("either a problem file or --fen is required");
        };
        let options = ProblemOptions {
            mirror: self.mirror,
        };
        load_problem(path, options).with_context(|| format!("cannot load {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let started = Local::now();
    info!("run started {}", started.format("%Y-%m-%d %H:%M:%S"));

    match cli.command {
        Command::Solve { input, all } => run_solve(&input, all)?,
        Command::Moves {
            input,
            check,
            write,
        } => run_moves(&input, check, write)?,
        Command::Perft {
            input,
            depth,
            divide,
        } => run_perft(&input, depth, divide)?,
        Command::Selfcheck {
            input,
            walks,
            plies,
            seed,
        } => run_selfcheck(&input, walks, plies, seed)?,
    }

    let elapsed = Local::now() - started;
    println!("elapsed: {:.3} s", elapsed.num_milliseconds() as f64 / 1000.0);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_solve(input: &InputArgs, all: bool) -> Result<()> {
    let mut problem = input.load()?;
    println!("{}\n", problem.game_state);

    let config = SearchConfig {
        mode: if all {
            SolveMode::AllWinning
        } else {
            SolveMode::FirstWinning
        },
    };
    let attacker = problem.game_state.side_to_move;
    let result = solve_mate_in(
        &mut problem.game_state,
        &LegalMoveGenerator,
        problem.moves_to_mate,
        config,
    )?;

    let solution = Solution::from_search(problem.moves_to_mate, attacker, &result);
    print!("{solution}");
    println!("nodes: {}", solution.nodes);
    Ok(())
}

fn run_moves(input: &InputArgs, check: Option<PathBuf>, write: Option<PathBuf>) -> Result<()> {
    let mut problem = input.load()?;
    println!("{}", generate_fen(&problem.game_state));

    let moves = LegalMoveGenerator.generate_legal_moves(&mut problem.game_state)?;
    for (index, mv) in moves.iter().enumerate() {
        println!("{:3}. {}", index + 1, move_to_long_algebraic(mv));
    }
    println!("{} legal moves", moves.len());

    let generated = transcript_from_moves(&moves);
    if let Some(path) = write {
        fs::write(&path, write_transcript(&generated))
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("transcript written to {}", path.display());
    }
    if let Some(path) = check {
        let expected = load_transcript(&path)?;
        if let Some(mismatch) = compare_transcripts(&expected, &generated) {
            bail!("transcript {} differs: {mismatch}", path.display());
        }
        println!("transcript {} matches", path.display());
    }
    Ok(())
}

fn run_perft(input: &InputArgs, depth: u8, divide: bool) -> Result<()> {
    let mut problem = input.load()?;

    if divide {
        for (mv, counts) in perft_divide(&LegalMoveGenerator, &mut problem.game_state, depth)? {
            println!("{}: {}", move_to_long_algebraic(&mv), counts.nodes);
        }
    }

    let counts = perft(&LegalMoveGenerator, &mut problem.game_state, depth)?;
    println!(
        "depth {depth}: nodes {} captures {} e.p. {} castles {} promotions {} checks {} mates {}",
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates
    );
    Ok(())
}

fn run_selfcheck(input: &InputArgs, walks: usize, plies: usize, seed: u64) -> Result<()> {
    let mut problem = input.load()?;
    let report = run_random_walks(
        &mut problem.game_state,
        &LegalMoveGenerator,
        walks,
        plies,
        seed,
    )?;
    println!(
        "{} walks, {} plies played, {} moves applied and undone: ok",
        report.walks, report.plies_played, report.moves_checked
    );
    Ok(())
}
