use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Capture diagonals, toward file-1 first.
pub const PAWN_CAPTURE_FILE_DELTAS: [i8; 2] = [-1, 1];

/// Promotion choices in generation order.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
];

/// Diagonal targets of a pawn of `color` standing on `from`.
#[inline]
pub fn pawn_capture_targets(color: Color, from: Square) -> impl Iterator<Item = Square> {
    PAWN_CAPTURE_FILE_DELTAS
        .into_iter()
        .filter_map(move |dx| from.offset(dx, color.forward()))
}
