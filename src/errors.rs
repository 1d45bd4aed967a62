//! Errors used throughout the mate solver.
//!
//! Two families exist and they are never mixed:
//! - `ProblemError` covers everything that can go wrong before a search
//!   starts (reading and parsing a problem, FEN or transcript). These are
//!   user-facing and abort the run before any board mutation happens.
//! - `ChessError` covers broken internal invariants detected while the board
//!   is being mutated or searched. They indicate a bug (or an unsupported,
//!   semantically invalid position) and abort the whole computation with a
//!   diagnostic instead of continuing on a corrupted board.

use std::path::PathBuf;

use crate::game_state::chess_types::{Color, PieceKind, Square};

/// Internal invariant violations raised by the board, generator and search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// A move was applied whose source square does not hold the piece the
    /// move claims to be moving.
    #[error("move {from}-{to}: expected {color:?} {piece:?} on the source square")]
    MovingPieceMismatch {
        from: Square,
        to: Square,
        color: Color,
        piece: PieceKind,
    },

    /// A move tried to capture a king. Legal play never reaches this.
    #[error("move {from}-{to} captures a king")]
    KingCaptureGenerated { from: Square, to: Square },

    /// A promotion was attached to something other than a pawn reaching its
    /// last rank.
    #[error("move {from}-{to}: invalid promotion to {promotion:?}")]
    InvalidPromotion {
        from: Square,
        to: Square,
        promotion: PieceKind,
    },

    /// The move's castling/en-passant snapshot does not match the board, so
    /// it was generated for a different position.
    #[error("move {from}-{to} was generated for a different position")]
    StaleMove { from: Square, to: Square },

    /// The cached king square no longer points at that color's king.
    #[error("lost track of the {0:?} king")]
    KingCacheCorrupted(Color),

    /// `undo_move` was called with nothing to undo.
    #[error("undo requested with an empty undo stack")]
    EmptyUndoStack,

    /// A mate search was requested with a zero move budget.
    #[error("mate search needs at least one move, got {0}")]
    InvalidMoveBudget(u8),

    /// A randomized walk found a position that did not restore exactly.
    #[error("board state differs after undoing back to ply {ply}")]
    ReversibilityViolation { ply: usize },

    /// Any other broken invariant, with a free-form diagnostic.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ChessResult<T> = Result<T, ChessError>;

/// Failures while loading a problem, FEN string or move transcript.
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    /// The input file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input ended while more values were required.
    #[error("input ended early: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A token that should be an integer was not one.
    ///
    /// Payload: the offending token and its 1-based position in the input.
    #[error("token #{position} ({token:?}) is not an integer")]
    InvalidInteger { token: String, position: usize },

    /// The number of moves to mate must be at least one.
    #[error("moves to mate must be between 1 and 255, got {0}")]
    InvalidMoveCount(i64),

    /// A piece count was negative or absurdly large.
    #[error("invalid piece count {0}")]
    InvalidPieceCount(i64),

    /// A piece code outside 1..=7 (or a transcript code outside the known
    /// piece codes).
    #[error("piece #{index}: unknown piece code {code}")]
    InvalidPieceCode { code: i64, index: usize },

    /// A transcript record count was negative.
    #[error("invalid record count {0}")]
    InvalidRecordCount(i64),

    /// A coordinate outside 1..=8.
    #[error("piece #{index}: coordinates ({x}, {y}) are off the board")]
    CoordinateOutOfRange { x: i64, y: i64, index: usize },

    /// Extra tokens after the last expected value.
    #[error("unexpected trailing input {0:?}")]
    TrailingInput(String),

    /// A FEN string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}
