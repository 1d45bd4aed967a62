//! Pawn pushes, captures, en passant and promotions.
//!
//! For a pawn about to promote, every move below is emitted once per
//! promotion choice, the choices forming the outer loop.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::{pawn_start_rank, promotion_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{classify_target, Target};
use crate::moves::move_descriptions::{build_en_passant_move, build_move, Move};
use crate::moves::pawn_moves::{pawn_capture_targets, PROMOTION_CHOICES};

pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) -> ChessResult<()> {
    let side = game_state.side_to_move;
    let forward = side.forward();

    let Some(one_step) = from.offset(0, forward) else {
        return Ok(());
    };
    if !one_step.is_on_board() {
        return Ok(());
    }

    let promotions: Vec<Option<PieceKind>> = if one_step.y() == promotion_rank(side) {
        PROMOTION_CHOICES.into_iter().map(Some).collect()
    } else {
        vec![None]
    };

    for promotion in promotions {
        if game_state.cell(one_step).is_empty() {
            out.push(build_move(game_state, from, one_step, PieceKind::Pawn, None, promotion));

            if from.y() == pawn_start_rank(side) {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if game_state.cell(two_step).is_empty() {
                        out.push(build_move(game_state, from, two_step, PieceKind::Pawn, None, None));
                    }
                }
            }
        }

        for to in pawn_capture_targets(side, from) {
            match classify_target(game_state, from, to)? {
                Target::Capture(captured) => {
                    out.push(build_move(game_state, from, to, PieceKind::Pawn, Some(captured), promotion))
                }
                Target::Empty if is_en_passant_target(game_state, from, to) => {
                    out.push(build_en_passant_move(game_state, from, to))
                }
                Target::Empty | Target::Blocked => {}
            }
        }
    }

    Ok(())
}

/// The pawn that just double-pushed sits beside `from`, on the file of `to`.
fn is_en_passant_target(game_state: &GameState, from: Square, to: Square) -> bool {
    let Some(passed) = game_state.en_passant_square else {
        return false;
    };
    passed.x() == to.x()
        && passed.y() == from.y()
        && game_state.piece_at(passed) == Some(Piece::new(game_state.side_to_move.opposite(), PieceKind::Pawn))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn pawn_moves(game: &GameState, from: &str) -> Vec<Move> {
        let mut out = Vec::new();
        generate_pawn_moves(game, sq(from), &mut out).unwrap();
        out
    }

    #[test]
    fn pawn_on_start_rank_pushes_one_or_two() {
        let game = GameState::new_game();
        let targets: Vec<String> = pawn_moves(&game, "e2").iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(targets, vec!["e3", "e4"]);

        let blocked = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pawn_moves(&blocked, "e2").is_empty());
    }

    #[test]
    fn promotion_yields_exactly_four_moves_per_destination() {
        let game = GameState::from_fen("3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = pawn_moves(&game, "e7");

        // e8 is blocked by the king, d8 holds a rook to capture.
        assert_eq!(moves.len(), 4);
        let promotions: Vec<PieceKind> = moves.iter().filter_map(|mv| mv.promotion).collect();
        assert_eq!(
            promotions,
            vec![PieceKind::Queen, PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop]
        );
        assert!(moves.iter().all(|mv| mv.to == sq("d8") && mv.captured == Some(PieceKind::Rook)));

        let open = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = pawn_moves(&open, "a7");
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.is_promotion() && mv.to == sq("a8")));
    }

    #[test]
    fn en_passant_needs_the_passed_pawn_beside() {
        let mut game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        let push = build_move(&game, sq("d7"), sq("d5"), PieceKind::Pawn, None, None);
        game.apply_move(push, true).unwrap();

        let moves = pawn_moves(&game, "e5");
        assert!(moves.iter().any(|mv| mv.is_en_passant && mv.to == sq("d6")));

        // Any other move drops the right.
        let king_out = build_move(&game, sq("e1"), sq("f1"), PieceKind::King, None, None);
        game.apply_move(king_out, true).unwrap();
        let king_back = build_move(&game, sq("e8"), sq("f8"), PieceKind::King, None, None);
        game.apply_move(king_back, true).unwrap();
        assert!(pawn_moves(&game, "e5").iter().all(|mv| !mv.is_en_passant));
    }
}
