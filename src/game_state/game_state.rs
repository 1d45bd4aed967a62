//! Core incremental board state representation.
//!
//! `GameState` owns all mutable game state: the sentinel-bordered grid, side
//! to move, castling rights, en-passant pawn, cached king squares and the undo
//! stack used by `apply_move` / `undo_move`. A single instance lives for a
//! whole search and is mutated and restored in place.

use std::fmt;

use crate::errors::{ChessError, ChessResult, ProblemError};
use crate::game_state::chess_rules::{
    king_home, kingside_rook_home, queenside_rook_home, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [x][y], sentinel ring at 0 and 9.
    pub(crate) cells: [[Cell; GRID_SIZE]; GRID_SIZE],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Pawn that has just advanced two squares and may be taken en passant.
    pub en_passant_square: Option<Square>,

    // [color]
    pub(crate) king_squares: [Option<Square>; 2],

    pub(crate) undo_stack: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for (x, column) in cells.iter_mut().enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == GRID_SIZE - 1 || y == GRID_SIZE - 1 {
                    *cell = Cell::OffBoard;
                }
            }
        }

        Self {
            cells,
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            king_squares: [None; 2],
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, Light to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ProblemError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square.x() as usize][square.y() as usize]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell(square).piece()
    }

    #[inline]
    pub(crate) fn set_cell(&mut self, square: Square, cell: Cell) {
        self.cells[square.x() as usize][square.y() as usize] = cell;
    }

    /// Places a piece during setup, keeping the king cache current.
    /// Rights are not touched; see `derive_castling_rights`.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        if !square.is_on_board() {
            return;
        }
        if let Some(previous) = self.piece_at(square) {
            if previous.kind == PieceKind::King && self.king_squares[previous.color.index()] == Some(square) {
                self.king_squares[previous.color.index()] = None;
            }
        }
        self.set_cell(square, Cell::Occupied(piece));
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = Some(square);
        }
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let removed = self.piece_at(square)?;
        self.set_cell(square, Cell::Empty);
        if removed.kind == PieceKind::King && self.king_squares[removed.color.index()] == Some(square) {
            self.king_squares[removed.color.index()] = None;
        }
        Some(removed)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Number of moves currently applied on top of the loaded position.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Playable squares in generation order: rank 8 down to rank 1, and file
    /// a to h within each rank.
    pub fn scan_order() -> impl Iterator<Item = Square> {
        (1..=BOARD_SIZE)
            .rev()
            .flat_map(|y| (1..=BOARD_SIZE).map(move |x| Square::grid(x, y)))
    }

    /// Every piece on the board, in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Self::scan_order().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// A right is held iff the king is on its home square and the matching
    /// rook on its corner.
    pub fn derive_castling_rights(&mut self) {
        let mut rights = 0;
        for color in [Color::Light, Color::Dark] {
            let king = Some(Piece::new(color, PieceKind::King));
            let rook = Some(Piece::new(color, PieceKind::Rook));
            if self.piece_at(king_home(color)) != king {
                continue;
            }
            if self.piece_at(kingside_rook_home(color)) == rook {
                rights |= kingside_flag(color);
            }
            if self.piece_at(queenside_rook_home(color)) == rook {
                rights |= queenside_flag(color);
            }
        }
        self.castling_rights = rights;
    }

    /// Rebuilds the king cache from the grid. With several kings of one
    /// color the last one in scan order wins.
    pub fn refresh_king_squares(&mut self) {
        let mut kings = [None; 2];
        for (square, piece) in self.pieces() {
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] = Some(square);
            }
        }
        self.king_squares = kings;
    }

    /// Both cached king squares must hold that color's king.
    pub fn verify_king_cache(&self) -> ChessResult<()> {
        for color in [Color::Light, Color::Dark] {
            if let Some(square) = self.king_square(color) {
                if self.piece_at(square) != Some(Piece::new(color, PieceKind::King)) {
                    return Err(ChessError::KingCacheCorrupted(color));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}
