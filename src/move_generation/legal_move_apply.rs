//! In-place move application and reversal.
//!
//! `apply_move` mutates the board and pushes the move onto the undo stack;
//! `undo_move` pops it and restores the previous position exactly, taking the
//! castling rights and en-passant pawn from the move's own snapshot.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{
    kingside_rook_home, promotion_rank, queenside_rook_home, KINGSIDE_KING_TARGET_FILE,
    KINGSIDE_ROOK_FILE, KINGSIDE_ROOK_TARGET_FILE, QUEENSIDE_ROOK_FILE,
    QUEENSIDE_ROOK_TARGET_FILE,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

impl GameState {
    /// Plays `mv`. With `advance_turn == false` the side to move is left
    /// alone, which is how the legality filter probes a candidate.
    pub fn apply_move(&mut self, mv: Move, advance_turn: bool) -> ChessResult<()> {
        self.validate_move(&mv)?;

        self.remove_piece(mv.from);
        if mv.is_en_passant {
            self.remove_piece(mv.en_passant_victim());
        }
        self.put_piece(mv.to, mv.piece_after());

        if mv.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(&mv);
            self.relocate_rook(mv.color, rook_from, rook_to)?;
        }

        self.update_castling_rights(&mv);
        self.en_passant_square = if mv.is_double_pawn_push() {
            Some(mv.to)
        } else {
            None
        };

        self.undo_stack.push(mv);
        if advance_turn {
            self.switch_turn();
        }

        self.verify_king_cache()
    }

    /// Takes back the last applied move. `advance_turn` must match the value
    /// the move was applied with.
    pub fn undo_move(&mut self, advance_turn: bool) -> ChessResult<()> {
        let mv = self.undo_stack.pop().ok_or(ChessError::EmptyUndoStack)?;

        if advance_turn {
            self.switch_turn();
        }

        if mv.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(&mv);
            self.relocate_rook(mv.color, rook_to, rook_from)?;
        }

        self.remove_piece(mv.to);
        self.put_piece(mv.from, Piece::new(mv.color, mv.piece));

        if let Some(captured) = mv.captured {
            let victim = Piece::new(mv.color.opposite(), captured);
            if mv.is_en_passant {
                self.put_piece(mv.en_passant_victim(), victim);
            } else {
                self.put_piece(mv.to, victim);
            }
        }

        self.castling_rights = mv.undo.prev_castling_rights;
        self.en_passant_square = mv.undo.prev_en_passant_square;

        self.verify_king_cache()
    }

    fn validate_move(&self, mv: &Move) -> ChessResult<()> {
        if mv.undo != UndoState::capture(self) {
            return Err(ChessError::StaleMove {
                from: mv.from,
                to: mv.to,
            });
        }

        if self.piece_at(mv.from) != Some(Piece::new(mv.color, mv.piece)) {
            return Err(ChessError::MovingPieceMismatch {
                from: mv.from,
                to: mv.to,
                color: mv.color,
                piece: mv.piece,
            });
        }

        if mv.captured == Some(PieceKind::King) {
            return Err(ChessError::KingCaptureGenerated {
                from: mv.from,
                to: mv.to,
            });
        }

        // Destination content has to match what the move says it captures.
        let expected_target = match (mv.is_en_passant, mv.captured) {
            (false, Some(kind)) => Cell::Occupied(Piece::new(mv.color.opposite(), kind)),
            _ => Cell::Empty,
        };
        if self.cell(mv.to) != expected_target {
            return Err(ChessError::StaleMove {
                from: mv.from,
                to: mv.to,
            });
        }
        if mv.is_en_passant
            && self.piece_at(mv.en_passant_victim())
                != Some(Piece::new(mv.color.opposite(), PieceKind::Pawn))
        {
            return Err(ChessError::StaleMove {
                from: mv.from,
                to: mv.to,
            });
        }

        let reaches_last_rank =
            mv.piece == PieceKind::Pawn && mv.to.y() == promotion_rank(mv.color);
        match mv.promotion {
            Some(promotion) => {
                let valid_choice = !matches!(promotion, PieceKind::King | PieceKind::Pawn);
                if !reaches_last_rank || !valid_choice {
                    return Err(ChessError::InvalidPromotion {
                        from: mv.from,
                        to: mv.to,
                        promotion,
                    });
                }
            }
            None if reaches_last_rank => {
                return Err(ChessError::Internal(format!(
                    "pawn move {}-{} reaches the last rank without promoting",
                    mv.from, mv.to
                )));
            }
            None => {}
        }

        Ok(())
    }

    fn relocate_rook(&mut self, color: Color, from: Square, to: Square) -> ChessResult<()> {
        let rook = Piece::new(color, PieceKind::Rook);
        if self.piece_at(from) != Some(rook) {
            return Err(ChessError::Internal(format!(
                "castling expected a {color:?} rook on {from}"
            )));
        }
        self.remove_piece(from);
        self.put_piece(to, rook);
        Ok(())
    }

    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.piece == PieceKind::King {
            self.castling_rights &= !(kingside_flag(mv.color) | queenside_flag(mv.color));
        }

        // Leaving a corner moves the rook; landing on one captures it.
        for color in [Color::Light, Color::Dark] {
            let kingside = kingside_rook_home(color);
            if mv.from == kingside || mv.to == kingside {
                self.castling_rights &= !kingside_flag(color);
            }
            let queenside = queenside_rook_home(color);
            if mv.from == queenside || mv.to == queenside {
                self.castling_rights &= !queenside_flag(color);
            }
        }
    }
}

/// Rook source and destination for a castling king move.
fn castling_rook_squares(mv: &Move) -> (Square, Square) {
    let rank = mv.from.y();
    if mv.to.x() == KINGSIDE_KING_TARGET_FILE {
        (
            Square::grid(KINGSIDE_ROOK_FILE, rank),
            Square::grid(KINGSIDE_ROOK_TARGET_FILE, rank),
        )
    } else {
        (
            Square::grid(QUEENSIDE_ROOK_FILE, rank),
            Square::grid(QUEENSIDE_ROOK_TARGET_FILE, rank),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{build_castling_move, build_en_passant_move, build_move};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn double_push_sets_and_next_move_clears_en_passant() {
        let mut game = GameState::new_game();
        let before = game.clone();

        let push = build_move(&game, sq("e2"), sq("e4"), PieceKind::Pawn, None, None);
        game.apply_move(push, true).unwrap();
        assert_eq!(game.en_passant_square, Some(sq("e4")));
        assert_eq!(game.side_to_move, Color::Dark);

        let reply = build_move(&game, sq("g8"), sq("f6"), PieceKind::Knight, None, None);
        game.apply_move(reply, true).unwrap();
        assert_eq!(game.en_passant_square, None);

        game.undo_move(true).unwrap();
        game.undo_move(true).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_capture_restores_the_victim_on_its_own_square() {
        let mut game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let before = game.clone();

        let capture = build_en_passant_move(&game, sq("e5"), sq("d6"));
        game.apply_move(capture, true).unwrap();
        assert_eq!(game.piece_at(sq("d5")), None);
        assert_eq!(
            game.piece_at(sq("d6")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );

        game.undo_move(true).unwrap();
        assert_eq!(game, before);
        assert_eq!(
            game.piece_at(sq("d5")),
            Some(Piece::new(Color::Dark, PieceKind::Pawn))
        );
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = game.clone();

        let castle = build_castling_move(&game, sq("e1"), sq("c1"));
        game.apply_move(castle, true).unwrap();
        assert_eq!(
            game.piece_at(sq("d1")),
            Some(Piece::new(Color::Light, PieceKind::Rook))
        );
        assert_eq!(game.piece_at(sq("a1")), None);
        assert_eq!(game.king_square(Color::Light), Some(sq("c1")));
        assert_eq!(game.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);

        game.undo_move(true).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn capturing_a_corner_rook_clears_the_right() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let capture = build_move(&game, sq("a1"), sq("a8"), PieceKind::Rook, Some(PieceKind::Rook), None);
        game.apply_move(capture, true).unwrap();
        assert_eq!(game.castling_rights, CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE);
    }

    #[test]
    fn promotion_and_capture_round_trip() {
        let mut game = GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = game.clone();

        let promote = build_move(
            &game,
            sq("a7"),
            sq("b8"),
            PieceKind::Pawn,
            Some(PieceKind::Knight),
            Some(PieceKind::Queen),
        );
        game.apply_move(promote, true).unwrap();
        assert_eq!(
            game.piece_at(sq("b8")),
            Some(Piece::new(Color::Light, PieceKind::Queen))
        );

        game.undo_move(true).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn malformed_moves_are_rejected() {
        let mut game = GameState::new_game();

        let wrong_piece = build_move(&game, sq("e2"), sq("e4"), PieceKind::Knight, None, None);
        assert!(matches!(
            game.apply_move(wrong_piece, true),
            Err(ChessError::MovingPieceMismatch { .. })
        ));

        let bad_promotion = build_move(&game, sq("e2"), sq("e3"), PieceKind::Pawn, None, Some(PieceKind::Queen));
        assert!(matches!(
            game.apply_move(bad_promotion, true),
            Err(ChessError::InvalidPromotion { .. })
        ));

        let mut stale = build_move(&game, sq("e2"), sq("e4"), PieceKind::Pawn, None, None);
        stale.undo.prev_castling_rights = 0;
        assert!(matches!(
            game.apply_move(stale, true),
            Err(ChessError::StaleMove { .. })
        ));

        assert_eq!(game.undo_move(true), Err(ChessError::EmptyUndoStack));
        assert_eq!(game, GameState::new_game());
    }
}
