//! Core value types for the mailbox board.
//!
//! Colors, piece kinds, grid cells and squares. Squares address a 10x10 grid
//! whose outer ring is a permanent off-board sentinel, so single steps in any
//! direction from a playable square always land on a valid grid cell.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a pawn push for this color.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind (color is carried separately by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Knight,
    Bishop,
    Pawn,
}

impl PieceKind {
    /// Problem-file code: 1 king, 2 queen, 3 rook, 4 knight, 5 bishop, 6 pawn.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            PieceKind::King => 1,
            PieceKind::Queen => 2,
            PieceKind::Rook => 3,
            PieceKind::Knight => 4,
            PieceKind::Bishop => 5,
            PieceKind::Pawn => 6,
        }
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::King),
            2 => Some(PieceKind::Queen),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Bishop),
            6 => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Uppercase letter used in notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Pawn => 'P',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// `K Q R N B P` for Light, lowercase for Dark.
    #[inline]
    pub const fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::Light => letter,
            Color::Dark => letter.to_ascii_lowercase(),
        }
    }
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    OffBoard,
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Playable board width/height.
pub const BOARD_SIZE: u8 = 8;
/// Grid width/height including the sentinel ring.
pub const GRID_SIZE: usize = BOARD_SIZE as usize + 2;

/// Grid coordinate. `x` is the file and `y` the rank, both in `0..=9`;
/// `1..=8` is the playable board and `(1, 1)` is a1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// Playable square from 1-based file/rank.
    #[inline]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x >= 1 && x <= BOARD_SIZE && y >= 1 && y <= BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Any grid cell, sentinel ring included.
    #[inline]
    pub(crate) const fn grid(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.x >= 1 && self.x <= BOARD_SIZE && self.y >= 1 && self.y <= BOARD_SIZE
    }

    /// Shifted square, or `None` if it falls outside the 10x10 grid.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        let limit = GRID_SIZE as i16;
        if (0..limit).contains(&x) && (0..limit).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Parses `a1`..`h8`.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank)
        {
            return None;
        }
        Self::new(file as u8 - b'a' + 1, rank as u8 - b'0')
    }

    /// Same file, rank mirrored (`y -> 9 - y`).
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            x: self.x,
            y: BOARD_SIZE + 1 - self.y,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", char::from(b'a' + self.x - 1), self.y)
        } else {
            write!(f, "#({},{})", self.x, self.y)
        }
    }
}

/// Compact castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

#[inline]
pub const fn kingside_flag(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_flag(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_QUEENSIDE,
    }
}
