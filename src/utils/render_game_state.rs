//! Terminal-oriented board renderer.
//!
//! Draws the playable 8x8 area with rank 8 at the top, followed by a status
//! line with side to move, castling rights and the en-passant pawn.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::fen_generator::generate_castling_field;

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (1..=BOARD_SIZE).rev() {
        out.push(char::from(b'0' + rank));
        out.push(' ');

        for file in 1..=BOARD_SIZE {
            match game_state.piece_at(Square::grid(file, rank)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < BOARD_SIZE {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");

    let side = match game_state.side_to_move {
        Color::Light => "white",
        Color::Dark => "black",
    };
    let en_passant = game_state
        .en_passant_square
        .map_or_else(|| "-".to_owned(), |square| square.to_string());
    out.push_str(&format!(
        "{side} to move, castling {}, en passant {en_passant}",
        generate_castling_field(game_state.castling_rights)
    ));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
