//! Forced-mate search.
//!
//! Proves "mate in N" by exhaustive ∃/∀ recursion over a half-move budget of
//! `2N - 1`. The attacker is whoever is to move at the root. At attacker
//! nodes one winning move suffices; at defender nodes every reply must lose.
//! The board is mutated in place and each node leaves it as it found it.

use log::{debug, info, trace};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::{move_to_long_algebraic, moves_to_long_algebraic};

/// Winning continuations from a node. "Mate on the board" is a single
/// empty line.
pub type ProofLines = Vec<Vec<Move>>;

/// Which attacker moves to keep once one of them is known to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveMode {
    /// Stop at the first winning attacker move in generation order.
    #[default]
    FirstWinning,
    /// Examine every attacker move and keep all the winning ones.
    AllWinning,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchConfig {
    pub mode: SolveMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MateSearchResult {
    /// Every winning line, each starting with an attacker move.
    pub lines: ProofLines,
    pub nodes: u64,
}

impl MateSearchResult {
    #[inline]
    pub fn is_solved(&self) -> bool {
        !self.lines.is_empty()
    }
}

/// Searches for a forced mate in `moves_to_mate` full moves for the side to
/// move. The board is returned unchanged.
pub fn solve_mate_in<G: MoveGenerator>(
    game_state: &mut GameState,
    generator: &G,
    moves_to_mate: u8,
    config: SearchConfig,
) -> ChessResult<MateSearchResult> {
    if moves_to_mate == 0 {
        return Err(ChessError::InvalidMoveBudget(moves_to_mate));
    }

    let budget = 2 * u16::from(moves_to_mate) - 1;
    let start_depth = game_state.undo_depth();
    let mut search = MateSearch {
        generator,
        attacker: game_state.side_to_move,
        mode: config.mode,
        budget,
        nodes: 0,
    };

    info!(
        "solving mate in {moves_to_mate} for {:?} ({budget} plies, {:?})",
        search.attacker, config.mode
    );

    let lines = search.search(game_state, budget)?.unwrap_or_default();

    if game_state.undo_depth() != start_depth {
        return Err(ChessError::Internal(format!(
            "search left {} moves on the undo stack",
            game_state.undo_depth() - start_depth
        )));
    }

    info!(
        "search finished: {} winning line(s), {} nodes",
        lines.len(),
        search.nodes
    );
    for line in &lines {
        debug!("winning line: {}", moves_to_long_algebraic(line));
    }

    Ok(MateSearchResult {
        lines,
        nodes: search.nodes,
    })
}

/// Plays `line` from the current position and reports whether it ends with
/// the side to move checkmated. The board is restored before returning.
pub fn line_delivers_mate<G: MoveGenerator>(
    game_state: &mut GameState,
    generator: &G,
    line: &[Move],
) -> ChessResult<bool> {
    for &mv in line {
        game_state.apply_move(mv, true)?;
    }

    let mated = is_king_in_check(game_state, game_state.side_to_move)
        && !generator.has_legal_move(game_state)?;

    for _ in line {
        game_state.undo_move(true)?;
    }
    Ok(mated)
}

struct MateSearch<'a, G: MoveGenerator> {
    generator: &'a G,
    attacker: Color,
    mode: SolveMode,
    budget: u16,
    nodes: u64,
}

impl<G: MoveGenerator> MateSearch<'_, G> {
    fn search(&mut self, game_state: &mut GameState, depth: u16) -> ChessResult<Option<ProofLines>> {
        self.nodes += 1;
        let side = game_state.side_to_move;

        if depth == 0 {
            if side == self.attacker {
                return Err(ChessError::Internal(
                    "half-move budget ran out on the attacker's turn".to_owned(),
                ));
            }
            // Any legal reply means the mate did not land on schedule.
            if self.generator.has_legal_move(game_state)? {
                return Ok(None);
            }
            return Ok(self.no_moves_verdict(game_state));
        }

        let moves = self.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            // A mated attacker is not a solution.
            if side == self.attacker {
                return Ok(None);
            }
            return Ok(self.no_moves_verdict(game_state));
        }

        if side == self.attacker {
            self.attacker_node(game_state, depth, moves)
        } else {
            self.defender_node(game_state, depth, moves)
        }
    }

    fn attacker_node(
        &mut self,
        game_state: &mut GameState,
        depth: u16,
        moves: Vec<Move>,
    ) -> ChessResult<Option<ProofLines>> {
        let mut lines = ProofLines::new();

        for mv in moves {
            game_state.apply_move(mv, true)?;
            let child = self.search(game_state, depth - 1)?;
            game_state.undo_move(true)?;

            if depth == self.budget {
                debug!(
                    "root move {}: {}",
                    move_to_long_algebraic(&mv),
                    if child.is_some() { "wins" } else { "fails" }
                );
            }

            let Some(continuations) = child else {
                continue;
            };
            lines.extend(prefixed(mv, continuations));
            if self.mode == SolveMode::FirstWinning {
                break;
            }
        }

        trace!("attacker node at depth {depth}: {} line(s)", lines.len());
        Ok((!lines.is_empty()).then_some(lines))
    }

    fn defender_node(
        &mut self,
        game_state: &mut GameState,
        depth: u16,
        moves: Vec<Move>,
    ) -> ChessResult<Option<ProofLines>> {
        let mut lines = ProofLines::new();

        for mv in moves {
            game_state.apply_move(mv, true)?;
            let child = self.search(game_state, depth - 1)?;
            game_state.undo_move(true)?;

            match child {
                Some(continuations) => lines.extend(prefixed(mv, continuations)),
                None => {
                    trace!("defender escapes at depth {depth} with {}-{}", mv.from, mv.to);
                    return Ok(None);
                }
            }
        }

        Ok(Some(lines))
    }

    /// No legal moves for the defender: mate if in check, stalemate if not.
    fn no_moves_verdict(&self, game_state: &GameState) -> Option<ProofLines> {
        is_king_in_check(game_state, game_state.side_to_move).then(|| vec![Vec::new()])
    }
}

fn prefixed(mv: Move, continuations: ProofLines) -> impl Iterator<Item = Vec<Move>> {
    continuations.into_iter().map(move |rest| {
        let mut line = Vec::with_capacity(rest.len() + 1);
        line.push(mv);
        line.extend(rest);
        line
    })
}
