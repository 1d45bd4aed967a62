use crate::errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_sliding_moves;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) -> ChessResult<()> {
    push_sliding_moves(game_state, from, PieceKind::Bishop, &BISHOP_DIRECTIONS, out)
}
