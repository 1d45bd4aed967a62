//! Move-path enumeration for validating the generator against known counts.
//!
//! Runs in place on one board with apply/undo, the same way the mate search
//! does, so it exercises reversibility as a side effect.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

/// Leaf statistics. Everything except `nodes` describes the move that
/// reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<PerftCounts> {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }

    perft_recurse(generator, game_state, depth, &mut total)?;
    Ok(total)
}

/// Per-root-move breakdown, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<Vec<(Move, PerftCounts)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut divided = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut local = PerftCounts::default();
        if depth == 1 {
            count_leaf(generator, game_state, mv, &mut local)?;
        } else {
            game_state.apply_move(mv, true)?;
            perft_recurse(generator, game_state, depth - 1, &mut local)?;
            game_state.undo_move(true)?;
        }
        divided.push((mv, local));
    }

    Ok(divided)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    let moves = generator.generate_legal_moves(game_state)?;

    for mv in moves {
        if depth == 1 {
            count_leaf(generator, game_state, mv, counts)?;
        } else {
            game_state.apply_move(mv, true)?;
            perft_recurse(generator, game_state, depth - 1, counts)?;
            game_state.undo_move(true)?;
        }
    }

    Ok(())
}

fn count_leaf<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    mv: Move,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castling {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }

    game_state.apply_move(mv, true)?;
    if is_king_in_check(game_state, game_state.side_to_move) {
        counts.checks += 1;
        if !generator.has_legal_move(game_state)? {
            counts.checkmates += 1;
        }
    }
    game_state.undo_move(true)
}
