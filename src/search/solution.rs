//! Printable records of a solved problem.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::search::mate_search::MateSearchResult;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// One half-move of a winning line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    /// 1-based position within the line.
    pub ply: usize,
    pub color: Color,
    pub piece: PieceKind,
    /// `K Q R N B P`, lowercase for Dark.
    pub symbol: char,
    pub from: Square,
    pub to: Square,
    pub is_castling: bool,
    pub promotion: Option<PieceKind>,
    pub notation: String,
}

impl PlyRecord {
    pub fn from_move(ply: usize, mv: &Move) -> Self {
        Self {
            ply,
            color: mv.color,
            piece: mv.piece,
            symbol: Piece::new(mv.color, mv.piece).symbol(),
            from: mv.from,
            to: mv.to,
            is_castling: mv.is_castling,
            promotion: mv.promotion,
            notation: move_to_long_algebraic(mv),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionLine {
    pub plies: Vec<PlyRecord>,
}

impl SolutionLine {
    pub fn from_moves(moves: &[Move]) -> Self {
        Self {
            plies: moves
                .iter()
                .enumerate()
                .map(|(index, mv)| PlyRecord::from_move(index + 1, mv))
                .collect(),
        }
    }
}

impl fmt::Display for SolutionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, record) in self.plies.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            // Full-move numbers count from the attacker's first move.
            if index % 2 == 0 {
                write!(f, "{}. ", index / 2 + 1)?;
            }
            f.write_str(&record.notation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves_to_mate: u8,
    pub attacker: Color,
    pub lines: Vec<SolutionLine>,
    pub nodes: u64,
}

impl Solution {
    pub fn from_search(moves_to_mate: u8, attacker: Color, result: &MateSearchResult) -> Self {
        Self {
            moves_to_mate,
            attacker,
            lines: result.lines.iter().map(|line| SolutionLine::from_moves(line)).collect(),
            nodes: result.nodes,
        }
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        !self.lines.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_solved() {
            return writeln!(
                f,
                "No forced mate in {} for {:?}.",
                self.moves_to_mate, self.attacker
            );
        }

        writeln!(
            f,
            "{:?} mates in {}: {} line(s)",
            self.attacker,
            self.moves_to_mate,
            self.lines.len()
        )?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
