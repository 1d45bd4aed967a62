//! King steps and castling.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{
    king_home, KINGSIDE_KING_TARGET_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_KING_TARGET_FILE,
    QUEENSIDE_ROOK_FILE,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_step_move;
use crate::moves::king_moves::king_steps;
use crate::moves::move_descriptions::{build_castling_move, Move};

pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) -> ChessResult<()> {
    for to in king_steps(from) {
        push_step_move(game_state, from, to, PieceKind::King, out)?;
    }

    generate_castling_moves(game_state, from, out);
    Ok(())
}

/// Short castling first, then long.
fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    if king_from != king_home(side) {
        return;
    }

    for (flag, rook_file, king_target_file) in [
        (kingside_flag(side), KINGSIDE_ROOK_FILE, KINGSIDE_KING_TARGET_FILE),
        (queenside_flag(side), QUEENSIDE_ROOK_FILE, QUEENSIDE_KING_TARGET_FILE),
    ] {
        if game_state.castling_rights & flag == 0 {
            continue;
        }
        if can_castle(game_state, king_from, rook_file, king_target_file) {
            let to = Square::grid(king_target_file, king_from.y());
            out.push(build_castling_move(game_state, king_from, to));
        }
    }
}

fn can_castle(game_state: &GameState, king_from: Square, rook_file: u8, king_target_file: u8) -> bool {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let rank = king_from.y();

    let rook = Some(Piece::new(side, PieceKind::Rook));
    if game_state.piece_at(Square::grid(rook_file, rank)) != rook {
        return false;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return false;
    }

    let (low, high) = if rook_file < king_from.x() {
        (rook_file + 1, king_from.x() - 1)
    } else {
        (king_from.x() + 1, rook_file - 1)
    };
    if (low..=high).any(|x| !game_state.cell(Square::grid(x, rank)).is_empty()) {
        return false;
    }

    // The square crossed, then the destination.
    let step: i8 = if king_target_file > king_from.x() { 1 } else { -1 };
    let transit = Square::grid((king_from.x() as i8 + step) as u8, rank);
    let destination = Square::grid(king_target_file, rank);
    !is_square_attacked(game_state, transit, enemy) && !is_square_attacked(game_state, destination, enemy)
}
