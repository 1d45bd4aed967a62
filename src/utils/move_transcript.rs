//! Recorded move lists used as a regression check on move generation.
//!
//! A transcript is a record count followed by one record per move:
//!
//! ```text
//! <from_x> <from_y> <to_x> <to_y> <captured> <castling> <promotion>
//! ```
//!
//! Piece codes are 1..=6 for Light, 101..=106 for Dark and 0 for none;
//! castling is 0 or 1. Comparing a freshly generated list against a stored
//! one catches any change in legality or generation order.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::ProblemError;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::utils::problem_parser::Tokens;

const DARK_CODE_OFFSET: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub is_castling: bool,
    pub promotion: Option<Piece>,
}

impl TranscriptRecord {
    pub fn from_move(mv: &Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            captured: mv.captured.map(|kind| Piece::new(mv.color.opposite(), kind)),
            is_castling: mv.is_castling,
            promotion: mv.promotion.map(|kind| Piece::new(mv.color, kind)),
        }
    }
}

impl fmt::Display for TranscriptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.from.x(),
            self.from.y(),
            self.to.x(),
            self.to.y(),
            piece_code(self.captured),
            u8::from(self.is_castling),
            piece_code(self.promotion)
        )
    }
}

/// First position where two transcripts disagree. A `None` side means that
/// transcript ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptMismatch {
    pub index: usize,
    pub expected: Option<TranscriptRecord>,
    pub actual: Option<TranscriptRecord>,
}

impl fmt::Display for TranscriptMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |record: Option<TranscriptRecord>| {
            record.map_or_else(|| "<end>".to_owned(), |record| record.to_string())
        };
        write!(
            f,
            "record #{}: expected {}, generated {}",
            self.index + 1,
            show(self.expected),
            show(self.actual)
        )
    }
}

pub fn transcript_from_moves(moves: &[Move]) -> Vec<TranscriptRecord> {
    moves.iter().map(TranscriptRecord::from_move).collect()
}

pub fn write_transcript(records: &[TranscriptRecord]) -> String {
    let mut out = format!("{}\n", records.len());
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

pub fn load_transcript(path: impl AsRef<Path>) -> Result<Vec<TranscriptRecord>, ProblemError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transcript(&text)
}

pub fn parse_transcript(text: &str) -> Result<Vec<TranscriptRecord>, ProblemError> {
    let mut tokens = Tokens::new(text);

    let count = tokens.next_integer("record count")?;
    let count = usize::try_from(count).map_err(|_| ProblemError::InvalidRecordCount(count))?;

    let mut records = Vec::with_capacity(count.min(256));
    for index in 0..count {
        let from = read_square(&mut tokens, index)?;
        let to = read_square(&mut tokens, index)?;
        let captured = decode_piece(tokens.next_integer("captured piece")?, index)?;
        let is_castling = tokens.next_integer("castling flag")? != 0;
        let promotion = decode_piece(tokens.next_integer("promotion piece")?, index)?;

        records.push(TranscriptRecord {
            from,
            to,
            captured,
            is_castling,
            promotion,
        });
    }

    if let Some(extra) = tokens.next_token() {
        return Err(ProblemError::TrailingInput(extra.to_owned()));
    }

    Ok(records)
}

pub fn compare_transcripts(
    expected: &[TranscriptRecord],
    actual: &[TranscriptRecord],
) -> Option<TranscriptMismatch> {
    let longest = expected.len().max(actual.len());
    (0..longest).find_map(|index| {
        let expected = expected.get(index).copied();
        let actual = actual.get(index).copied();
        (expected != actual).then_some(TranscriptMismatch {
            index,
            expected,
            actual,
        })
    })
}

fn read_square(tokens: &mut Tokens<'_>, index: usize) -> Result<Square, ProblemError> {
    let x = tokens.next_integer("file")?;
    let y = tokens.next_integer("rank")?;
    u8::try_from(x)
        .ok()
        .zip(u8::try_from(y).ok())
        .and_then(|(x, y)| Square::new(x, y))
        .ok_or(ProblemError::CoordinateOutOfRange { x, y, index })
}

fn piece_code(piece: Option<Piece>) -> i64 {
    match piece {
        None => 0,
        Some(piece) => {
            let base = i64::from(piece.kind.code());
            match piece.color {
                Color::Light => base,
                Color::Dark => base + DARK_CODE_OFFSET,
            }
        }
    }
}

fn decode_piece(code: i64, index: usize) -> Result<Option<Piece>, ProblemError> {
    if code == 0 {
        return Ok(None);
    }
    let (color, base) = if code > DARK_CODE_OFFSET {
        (Color::Dark, code - DARK_CODE_OFFSET)
    } else {
        (Color::Light, code)
    };
    u8::try_from(base)
        .ok()
        .and_then(PieceKind::from_code)
        .map(|kind| Some(Piece::new(color, kind)))
        .ok_or(ProblemError::InvalidPieceCode { code, index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::utils::problem_parser::{parse_problem, ProblemOptions};

    fn check_problem(problem_text: &str, transcript_text: &str) {
        let mut problem = parse_problem(problem_text, ProblemOptions::default()).unwrap();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&mut problem.game_state)
            .unwrap();
        let generated = transcript_from_moves(&moves);
        let expected = parse_transcript(transcript_text).unwrap();

        if let Some(mismatch) = compare_transcripts(&expected, &generated) {
            panic!("{mismatch}");
        }
    }

    #[test]
    fn mate_in_one_root_moves_match_recording() {
        check_problem(
            include_str!("../../problems/mate_in_one.txt"),
            include_str!("../../problems/mate_in_one_moves.txt"),
        );
    }

    #[test]
    fn mate_in_two_root_moves_match_recording() {
        check_problem(
            include_str!("../../problems/mate_in_two.txt"),
            include_str!("../../problems/mate_in_two_moves.txt"),
        );
    }

    #[test]
    fn castling_and_en_passant_match_recording() {
        check_problem(
            include_str!("../../problems/castling_en_passant.txt"),
            include_str!("../../problems/castling_en_passant_moves.txt"),
        );
    }

    #[test]
    fn promotions_match_recording() {
        check_problem(
            include_str!("../../problems/promotion.txt"),
            include_str!("../../problems/promotion_moves.txt"),
        );
    }

    #[test]
    fn written_transcript_reads_back() {
        let text = include_str!("../../problems/castling_en_passant_moves.txt");
        let records = parse_transcript(text).unwrap();
        assert_eq!(parse_transcript(&write_transcript(&records)).unwrap(), records);
    }

    #[test]
    fn first_difference_is_reported() {
        let records = parse_transcript("2 5 2 5 4 0 0 0 7 1 6 3 0 0 0").unwrap();

        let mismatch = compare_transcripts(&records, &records[..1]).unwrap();
        assert_eq!(mismatch.index, 1);
        assert_eq!(mismatch.actual, None);
        assert_eq!(mismatch.to_string(), "record #2: expected 7 1 6 3 0 0 0, generated <end>");

        assert_eq!(compare_transcripts(&records, &records), None);
    }

    #[test]
    fn malformed_transcripts_are_rejected() {
        assert!(matches!(parse_transcript("-1"), Err(ProblemError::InvalidRecordCount(-1))));
        assert!(matches!(
            parse_transcript("1 5 2 5 4 107 0 0"),
            Err(ProblemError::InvalidPieceCode { code: 107, index: 0 })
        ));
        assert!(matches!(
            parse_transcript("1 5 2 5 4 0 0"),
            Err(ProblemError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_transcript("1 0 2 5 4 0 0 0"),
            Err(ProblemError::CoordinateOutOfRange { x: 0, y: 2, index: 0 })
        ));
    }
}
