//! Helpers shared by the per-piece generators.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{build_move, Move};
use crate::moves::rook_moves::ray;

/// What a piece of the side to move finds on a destination cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Empty,
    Capture(PieceKind),
    Blocked,
}

/// Classifies `to` for a move starting on `from`. Reaching the enemy king
/// means the position is already broken and is reported as an error.
#[inline]
pub fn classify_target(game_state: &GameState, from: Square, to: Square) -> ChessResult<Target> {
    match game_state.cell(to) {
        Cell::OffBoard => Ok(Target::Blocked),
        Cell::Empty => Ok(Target::Empty),
        Cell::Occupied(piece) if piece.color == game_state.side_to_move => Ok(Target::Blocked),
        Cell::Occupied(piece) if piece.kind == PieceKind::King => {
            Err(ChessError::KingCaptureGenerated { from, to })
        }
        Cell::Occupied(piece) => Ok(Target::Capture(piece.kind)),
    }
}

/// Single-step move (king step or knight jump) to `to`, if not blocked.
pub fn push_step_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: PieceKind,
    out: &mut Vec<Move>,
) -> ChessResult<()> {
    match classify_target(game_state, from, to)? {
        Target::Empty => out.push(build_move(game_state, from, to, piece, None, None)),
        Target::Capture(captured) => {
            out.push(build_move(game_state, from, to, piece, Some(captured), None))
        }
        Target::Blocked => {}
    }
    Ok(())
}

/// Slides along each direction until blocked, including a capture of the
/// first enemy piece met.
pub fn push_sliding_moves(
    game_state: &GameState,
    from: Square,
    piece: PieceKind,
    directions: &[(i8, i8)],
    out: &mut Vec<Move>,
) -> ChessResult<()> {
    for &direction in directions {
        for to in ray(from, direction) {
            match classify_target(game_state, from, to)? {
                Target::Empty => out.push(build_move(game_state, from, to, piece, None, None)),
                Target::Capture(captured) => {
                    out.push(build_move(game_state, from, to, piece, Some(captured), None));
                    break;
                }
                Target::Blocked => break,
            }
        }
    }
    Ok(())
}
