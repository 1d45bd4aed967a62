//! Loader for the plain-text problem format.
//!
//! ```text
//! <moves_to_mate> <light_count> <dark_count>
//! <code> <x> <y>        -- light_count times, then dark_count times
//! ```
//!
//! Codes 1..=6 are king, queen, rook, knight, bishop, pawn; 7 is a pawn that
//! has just advanced two squares and may be taken en passant. Coordinates are
//! 1-based with (1, 1) = a1. Light moves first unless the problem is
//! mirrored. Castling rights follow from king and rook placement.

use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::ProblemError;
use crate::game_state::{chess_types::*, game_state::GameState};

const EN_PASSANT_PAWN_CODE: i64 = 7;
const MAX_PIECES_PER_SIDE: i64 = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemOptions {
    /// Flip ranks and swap colors so Dark is the attacker.
    pub mirror: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessProblem {
    pub moves_to_mate: u8,
    pub game_state: GameState,
}

pub fn load_problem(path: impl AsRef<Path>, options: ProblemOptions) -> Result<ChessProblem, ProblemError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_problem(&text, options)
}

pub fn parse_problem(text: &str, options: ProblemOptions) -> Result<ChessProblem, ProblemError> {
    let mut tokens = Tokens::new(text);

    let moves_to_mate = tokens.next_integer("moves to mate")?;
    let moves_to_mate = u8::try_from(moves_to_mate)
        .ok()
        .filter(|&moves| moves >= 1)
        .ok_or(ProblemError::InvalidMoveCount(moves_to_mate))?;

    let light_count = piece_count(tokens.next_integer("light piece count")?)?;
    let dark_count = piece_count(tokens.next_integer("dark piece count")?)?;

    let mut game_state = GameState::new_empty();
    let mut en_passant_pawn = None;

    for index in 0..light_count + dark_count {
        let code = tokens.next_integer("piece code")?;
        let x = tokens.next_integer("piece file")?;
        let y = tokens.next_integer("piece rank")?;

        let kind = match code {
            EN_PASSANT_PAWN_CODE => PieceKind::Pawn,
            _ => u8::try_from(code)
                .ok()
                .and_then(PieceKind::from_code)
                .ok_or(ProblemError::InvalidPieceCode { code, index })?,
        };
        let square = u8::try_from(x)
            .ok()
            .zip(u8::try_from(y).ok())
            .and_then(|(x, y)| Square::new(x, y))
            .ok_or(ProblemError::CoordinateOutOfRange { x, y, index })?;

        let listed_color = if index < light_count {
            Color::Light
        } else {
            Color::Dark
        };
        let (color, square) = if options.mirror {
            (listed_color.opposite(), square.mirrored())
        } else {
            (listed_color, square)
        };

        game_state.put_piece(square, Piece::new(color, kind));
        if code == EN_PASSANT_PAWN_CODE {
            en_passant_pawn = Some(square);
        }
    }

    if let Some(extra) = tokens.next_token() {
        return Err(ProblemError::TrailingInput(extra.to_owned()));
    }

    game_state.side_to_move = if options.mirror {
        Color::Dark
    } else {
        Color::Light
    };
    game_state.en_passant_square = en_passant_pawn;
    game_state.derive_castling_rights();
    game_state.refresh_king_squares();

    debug!(
        "loaded mate-in-{moves_to_mate} problem: {light_count} light, {dark_count} dark pieces, mirror={}",
        options.mirror
    );

    Ok(ChessProblem {
        moves_to_mate,
        game_state,
    })
}

fn piece_count(value: i64) -> Result<usize, ProblemError> {
    if !(0..=MAX_PIECES_PER_SIDE).contains(&value) {
        return Err(ProblemError::InvalidPieceCount(value));
    }
    Ok(value as usize)
}

/// Whitespace-separated integer tokens, counted from 1 for diagnostics.
pub(crate) struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    pub(crate) fn next_token(&mut self) -> Option<&'a str> {
        let token = self.inner.next()?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn next_integer(&mut self, expected: &'static str) -> Result<i64, ProblemError> {
        let token = self
            .next_token()
            .ok_or(ProblemError::UnexpectedEnd { expected })?;
        token.parse::<i64>().map_err(|_| ProblemError::InvalidInteger {
            token: token.to_owned(),
            position: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_generator::generate_fen;

    const MATE_IN_ONE: &str = "1 2 1\n1 7 6\n3 1 1\n1 8 8\n";

    #[test]
    fn parses_the_mate_in_one_problem() {
        let problem = parse_problem(MATE_IN_ONE, ProblemOptions::default()).unwrap();
        assert_eq!(problem.moves_to_mate, 1);
        assert_eq!(generate_fen(&problem.game_state), "7k/8/6K1/8/8/8/8/R7 w - - 0 1");
    }

    #[test]
    fn mirroring_swaps_colors_and_ranks() {
        let options = ProblemOptions { mirror: true };
        let problem = parse_problem(MATE_IN_ONE, options).unwrap();
        assert_eq!(generate_fen(&problem.game_state), "r7/8/8/8/8/6k1/8/7K b - - 0 1");
        assert_eq!(problem.game_state.king_square(Color::Dark), Square::from_algebraic("g3"));
    }

    #[test]
    fn en_passant_pawn_and_castling_rights_are_derived() {
        let text = "2 4 2  1 5 1  3 8 1  3 1 1  6 5 5  1 5 8  7 4 5";
        let problem = parse_problem(text, ProblemOptions::default()).unwrap();
        let game = &problem.game_state;

        assert_eq!(game.en_passant_square, Square::from_algebraic("d5"));
        assert_eq!(
            game.piece_at(Square::from_algebraic("d5").unwrap()),
            Some(Piece::new(Color::Dark, PieceKind::Pawn))
        );
        assert_eq!(game.castling_rights, CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let options = ProblemOptions::default();
        assert!(matches!(
            parse_problem("1 1 1 1 5 1", options),
            Err(ProblemError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_problem("1 1 x", options),
            Err(ProblemError::InvalidInteger { position: 3, .. })
        ));
        assert!(matches!(
            parse_problem("0 1 1 1 5 1 1 5 8", options),
            Err(ProblemError::InvalidMoveCount(0))
        ));
        assert!(matches!(
            parse_problem("1 -1 1", options),
            Err(ProblemError::InvalidPieceCount(-1))
        ));
        assert!(matches!(
            parse_problem("1 1 1 8 5 1 1 5 8", options),
            Err(ProblemError::InvalidPieceCode { code: 8, index: 0 })
        ));
        assert!(matches!(
            parse_problem("1 1 1 1 5 1 1 9 8", options),
            Err(ProblemError::CoordinateOutOfRange { x: 9, y: 8, index: 1 })
        ));
        assert!(matches!(
            parse_problem("1 1 1 1 5 1 1 5 8 42", options),
            Err(ProblemError::TrailingInput(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_problem("/nonexistent/problem.txt", ProblemOptions::default());
        assert!(matches!(result, Err(ProblemError::Io { .. })));
    }
}
