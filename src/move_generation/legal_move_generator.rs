//! Full legal move generation pipeline.
//!
//! Scans the board in fixed order (rank 8 to rank 1, file a to h), collects
//! each piece's pseudo-legal moves in its own direction order, and keeps the
//! ones that do not leave the mover's king attacked. The filter applies each
//! candidate, tests the king and undoes it again; there is no pin analysis.
//! This order decides which winning line a search reports first.

use crate::errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{GenerationMode, MoveGenerator};
use crate::moves::move_descriptions::Move;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_moves(&self, game_state: &mut GameState, mode: GenerationMode) -> ChessResult<Vec<Move>> {
        let side = game_state.side_to_move;
        let mut legal = Vec::<Move>::with_capacity(64);
        let mut pseudo = Vec::<Move>::with_capacity(32);

        for from in GameState::scan_order() {
            let Some(piece) = game_state.piece_at(from) else {
                continue;
            };
            if piece.color != side {
                continue;
            }

            pseudo.clear();
            generate_piece_moves(game_state, from, piece.kind, &mut pseudo)?;

            for &mv in &pseudo {
                if is_legal(game_state, mv)? {
                    legal.push(mv);
                    if mode == GenerationMode::FirstLegal {
                        return Ok(legal);
                    }
                }
            }
        }

        Ok(legal)
    }
}

/// Every pseudo-legal move of the side to move, in generation order.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> ChessResult<Vec<Move>> {
    let mut out = Vec::with_capacity(64);
    for (from, piece) in game_state.pieces() {
        if piece.color == game_state.side_to_move {
            generate_piece_moves(game_state, from, piece.kind, &mut out)?;
        }
    }
    Ok(out)
}

fn generate_piece_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    out: &mut Vec<Move>,
) -> ChessResult<()> {
    match kind {
        PieceKind::King => generate_king_moves(game_state, from, out),
        PieceKind::Queen => generate_queen_moves(game_state, from, out),
        PieceKind::Rook => generate_rook_moves(game_state, from, out),
        PieceKind::Knight => generate_knight_moves(game_state, from, out),
        PieceKind::Bishop => generate_bishop_moves(game_state, from, out),
        PieceKind::Pawn => generate_pawn_moves(game_state, from, out),
    }
}

fn is_legal(game_state: &mut GameState, mv: Move) -> ChessResult<bool> {
    game_state.apply_move(mv, false)?;
    let exposes_king = is_king_in_check(game_state, mv.color);
    game_state.undo_move(false)?;
    Ok(!exposes_king)
}
