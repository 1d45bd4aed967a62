//! The move record shared by generation, board mutation and search.
//!
//! A `Move` is self-describing: besides the squares it names the moving
//! piece, what it captures, what it promotes to, whether it castles or takes
//! en passant, and the castling/en-passant state from immediately before it
//! was made. Undo restores those flags from the snapshot instead of
//! recomputing them.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub undo: UndoState,
}

impl Move {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece == PieceKind::Pawn && self.from.y().abs_diff(self.to.y()) == 2
    }

    /// Square of the pawn removed by an en-passant capture: beside the
    /// source square, on the destination file.
    #[inline]
    pub fn en_passant_victim(&self) -> Square {
        Square::grid(self.to.x(), self.from.y())
    }

    /// Piece standing on the destination once the move is made.
    #[inline]
    pub fn piece_after(&self) -> Piece {
        Piece::new(self.color, self.promotion.unwrap_or(self.piece))
    }
}

/// Builds a move for the side to move, snapshotting the flags it will need
/// on undo.
#[inline]
pub fn build_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: PieceKind,
    captured: Option<PieceKind>,
    promotion: Option<PieceKind>,
) -> Move {
    Move {
        from,
        to,
        color: game_state.side_to_move,
        piece,
        captured,
        promotion,
        is_castling: false,
        is_en_passant: false,
        undo: UndoState::capture(game_state),
    }
}

#[inline]
pub fn build_castling_move(game_state: &GameState, from: Square, to: Square) -> Move {
    Move {
        is_castling: true,
        ..build_move(game_state, from, to, PieceKind::King, None, None)
    }
}

#[inline]
pub fn build_en_passant_move(game_state: &GameState, from: Square, to: Square) -> Move {
    Move {
        is_en_passant: true,
        ..build_move(game_state, from, to, PieceKind::Pawn, Some(PieceKind::Pawn), None)
    }
}
