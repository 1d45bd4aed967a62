use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

/// How much of the legal move list a caller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Every legal move of the side to move.
    #[default]
    All,
    /// Stop after the first legal move; enough to tell "no moves" apart.
    FirstLegal,
}

/// Legal move source for search and perft. The board is borrowed mutably
/// because candidates are tried by applying and undoing them; it is always
/// handed back unchanged.
pub trait MoveGenerator {
    fn generate_moves(&self, game_state: &mut GameState, mode: GenerationMode) -> ChessResult<Vec<Move>>;

    fn generate_legal_moves(&self, game_state: &mut GameState) -> ChessResult<Vec<Move>> {
        self.generate_moves(game_state, GenerationMode::All)
    }

    fn has_legal_move(&self, game_state: &mut GameState) -> ChessResult<bool> {
        Ok(!self.generate_moves(game_state, GenerationMode::FirstLegal)?.is_empty())
    }
}
