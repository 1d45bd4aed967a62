//! Canonical chess-rule constants.
//!
//! Home squares, pawn ranks and the standard starting position. Files and
//! ranks are 1-based grid coordinates.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_HOME_FILE: u8 = 5;
pub const KINGSIDE_ROOK_FILE: u8 = 8;
pub const QUEENSIDE_ROOK_FILE: u8 = 1;

/// King destination files when castling.
pub const KINGSIDE_KING_TARGET_FILE: u8 = 7;
pub const QUEENSIDE_KING_TARGET_FILE: u8 = 3;

/// Rook destination files when castling.
pub const KINGSIDE_ROOK_TARGET_FILE: u8 = 6;
pub const QUEENSIDE_ROOK_TARGET_FILE: u8 = 4;

#[inline]
pub const fn home_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 8,
    }
}

/// Rank from which a pawn may advance two squares.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 2,
        Color::Dark => 7,
    }
}

/// Rank a pawn promotes on when it arrives there.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 8,
        Color::Dark => 1,
    }
}

#[inline]
pub fn king_home(color: Color) -> Square {
    Square::grid(KING_HOME_FILE, home_rank(color))
}

#[inline]
pub fn kingside_rook_home(color: Color) -> Square {
    Square::grid(KINGSIDE_ROOK_FILE, home_rank(color))
}

#[inline]
pub fn queenside_rook_home(color: Color) -> Square {
    Square::grid(QUEENSIDE_ROOK_FILE, home_rank(color))
}
