use crate::game_state::chess_types::*;

/// Flags that are restored verbatim on undo rather than recomputed from the
/// board. Every `Move` carries the values from immediately before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
}

impl UndoState {
    #[inline]
    pub fn capture(game_state: &GameState) -> Self {
        Self {
            prev_castling_rights: game_state.castling_rights,
            prev_en_passant_square: game_state.en_passant_square,
        }
    }
}
