use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::king_steps;
use crate::moves::knight_moves::knight_jumps;
use crate::moves::pawn_moves::PAWN_CAPTURE_FILE_DELTAS;
use crate::moves::rook_moves::{ray, ROOK_DIRECTIONS};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state.king_square(color)
}

/// A side without a king is never in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` could capture on `square`,
/// regardless of its own king's safety. Looks outward from the target and
/// stops at the first attacker found.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker = |kind| Some(Piece::new(attacker_color, kind));

    // Attacking pawns stand one rank behind the target, from their side.
    let pawn = attacker(PieceKind::Pawn);
    if PAWN_CAPTURE_FILE_DELTAS
        .into_iter()
        .filter_map(|dx| square.offset(dx, -attacker_color.forward()))
        .any(|from| game_state.piece_at(from) == pawn)
    {
        return true;
    }

    let knight = attacker(PieceKind::Knight);
    if knight_jumps(square).any(|from| game_state.piece_at(from) == knight) {
        return true;
    }

    let king = attacker(PieceKind::King);
    if king_steps(square).any(|from| game_state.piece_at(from) == king) {
        return true;
    }

    let queen = attacker(PieceKind::Queen);
    let rook = attacker(PieceKind::Rook);
    let bishop = attacker(PieceKind::Bishop);
    let first_blocker = |direction| {
        ray(square, direction)
            .map(|sq| game_state.cell(sq))
            .find(|cell| !cell.is_empty())
            .and_then(Cell::piece)
    };

    if ROOK_DIRECTIONS.into_iter().any(|direction| {
        let blocker = first_blocker(direction);
        blocker.is_some() && (blocker == rook || blocker == queen)
    }) {
        return true;
    }

    BISHOP_DIRECTIONS.into_iter().any(|direction| {
        let blocker = first_blocker(direction);
        blocker.is_some() && (blocker == bishop || blocker == queen)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_square_attacked(&game, sq("c4"), Color::Dark));
        assert!(is_square_attacked(&game, sq("e4"), Color::Dark));
        assert!(!is_square_attacked(&game, sq("d4"), Color::Dark));
        assert!(!is_square_attacked(&game, sq("c6"), Color::Dark));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let game = GameState::from_fen("4k3/8/8/8/r2N3K/8/8/8 w - - 0 1").unwrap();
        assert!(is_square_attacked(&game, sq("c4"), Color::Dark));
        assert!(is_square_attacked(&game, sq("a1"), Color::Dark));
        assert!(!is_square_attacked(&game, sq("e4"), Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }

    #[test]
    fn knight_and_king_attacks_near_the_edge() {
        let game = GameState::from_fen("7k/8/8/8/8/8/8/N6K w - - 0 1").unwrap();
        assert!(is_square_attacked(&game, sq("b3"), Color::Light));
        assert!(is_square_attacked(&game, sq("c2"), Color::Light));
        assert!(is_square_attacked(&game, sq("g2"), Color::Light));
        assert!(!is_square_attacked(&game, sq("a2"), Color::Light));
    }

    #[test]
    fn queen_gives_check_on_the_diagonal() {
        let game = GameState::from_fen("7k/8/8/8/8/8/1q6/K7 w - - 0 1").unwrap();
        assert!(is_king_in_check(&game, Color::Light));
        assert!(!is_king_in_check(&game, Color::Dark));
    }
}
