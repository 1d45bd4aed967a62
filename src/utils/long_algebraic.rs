//! Move notation for solution output.
//!
//! `Ra1-a8`, `Pa7-a8=Q`; the piece letter is lowercase for Dark. Castling is
//! written as the king move with `(O-O)` or `(O-O-O)` appended.

use crate::game_state::chess_rules::KINGSIDE_KING_TARGET_FILE;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = String::new();
    out.push(Piece::new(mv.color, mv.piece).symbol());
    out.push_str(&mv.from.to_string());
    out.push('-');
    out.push_str(&mv.to.to_string());

    if let Some(promotion) = mv.promotion {
        out.push('=');
        out.push(Piece::new(mv.color, promotion).symbol());
    }

    if mv.is_castling {
        if mv.to.x() == KINGSIDE_KING_TARGET_FILE {
            out.push_str(" (O-O)");
        } else {
            out.push_str(" (O-O-O)");
        }
    }

    out
}

/// Space-separated notation for a sequence of moves.
pub fn moves_to_long_algebraic(moves: &[Move]) -> String {
    moves
        .iter()
        .map(move_to_long_algebraic)
        .collect::<Vec<_>>()
        .join(" ")
}
