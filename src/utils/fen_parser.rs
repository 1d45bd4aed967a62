//! FEN-to-GameState parser.
//!
//! Accepts the four mandatory FEN fields; the two clock fields are optional
//! and ignored since the solver never uses them. The en-passant target
//! square is converted to the square of the pawn that just advanced.

use crate::errors::ProblemError;
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn parse_fen(fen: &str) -> Result<GameState, ProblemError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;

    for clock in parts.by_ref().take(2) {
        clock
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid move clock: {clock}")))?;
    }
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, game_state.side_to_move)?;

    Ok(game_state)
}

fn invalid(message: impl Into<String>) -> ProblemError {
    ProblemError::InvalidFen(message.into())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ProblemError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_SIZE as usize {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (rank, rank_str) in (1..=BOARD_SIZE).rev().zip(ranks) {
        let mut file = 1u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > BOARD_SIZE + 1 {
                    return Err(invalid(format!("rank {rank} has too many files")));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            let square = Square::new(file, rank)
                .ok_or_else(|| invalid(format!("rank {rank} has too many files")))?;
            game_state.put_piece(square, piece);
            file += 1;
        }

        if file != BOARD_SIZE + 1 {
            return Err(invalid(format!("rank {rank} does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ProblemError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ProblemError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

/// The pawn sits one rank past the target square, seen from the side that
/// just moved it.
fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> Result<Option<Square>, ProblemError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = Square::from_algebraic(en_passant_part)
        .ok_or_else(|| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
    let pawn = target
        .offset(0, -side_to_move.forward())
        .filter(|square| square.is_on_board())
        .ok_or_else(|| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
    Ok(Some(pawn))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
