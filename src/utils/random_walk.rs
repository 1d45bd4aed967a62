//! Randomized apply/undo self-check.
//!
//! Walks a random legal line from a position, checking at every step that
//! each legal move undoes cleanly and that the first-legal probe agrees with
//! full enumeration, then unwinds the whole line and compares each position
//! with the snapshot taken on the way down.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkReport {
    pub walks: usize,
    pub plies_played: usize,
    pub moves_checked: usize,
}

impl WalkReport {
    fn merge(&mut self, rhs: WalkReport) {
        self.walks += rhs.walks;
        self.plies_played += rhs.plies_played;
        self.moves_checked += rhs.moves_checked;
    }
}

/// One random walk of at most `max_plies` moves. Stops early at a position
/// without legal moves. The board is restored on success.
pub fn verify_reversibility<G: MoveGenerator, R: Rng + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    max_plies: usize,
    rng: &mut R,
) -> ChessResult<WalkReport> {
    let mut snapshots = Vec::with_capacity(max_plies);
    let mut report = WalkReport {
        walks: 1,
        ..WalkReport::default()
    };

    for _ in 0..max_plies {
        let moves = generator.generate_legal_moves(game_state)?;
        if moves.is_empty() != !generator.has_legal_move(game_state)? {
            return Err(ChessError::Internal(
                "first-legal probe disagrees with full enumeration".to_owned(),
            ));
        }

        let snapshot = game_state.clone();
        for &mv in &moves {
            game_state.apply_move(mv, true)?;
            game_state.undo_move(true)?;
            if *game_state != snapshot {
                return Err(ChessError::ReversibilityViolation {
                    ply: snapshots.len(),
                });
            }
        }
        report.moves_checked += moves.len();

        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        snapshots.push(snapshot);
        game_state.apply_move(mv, true)?;
        report.plies_played += 1;
    }

    while let Some(snapshot) = snapshots.pop() {
        game_state.undo_move(true)?;
        if *game_state != snapshot {
            return Err(ChessError::ReversibilityViolation {
                ply: snapshots.len(),
            });
        }
    }

    Ok(report)
}

/// `walks` seeded walks from the same starting position.
pub fn run_random_walks<G: MoveGenerator>(
    game_state: &mut GameState,
    generator: &G,
    walks: usize,
    max_plies: usize,
    seed: u64,
) -> ChessResult<WalkReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total = WalkReport::default();

    for walk in 0..walks {
        let report = verify_reversibility(game_state, generator, max_plies, &mut rng)?;
        debug!(
            "walk {walk}: {} plies, {} moves checked",
            report.plies_played, report.moves_checked
        );
        total.merge(report);
    }

    Ok(total)
}
