use crate::game_state::{chess_types::*, game_state::GameState};

/// FEN for the position. Clocks are not tracked and are written as `0 1`.
pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state.castling_rights);
    let en_passant = generate_en_passant_field(game_state.en_passant_square);

    format!("{board} {side_to_move} {castling} {en_passant} 0 1")
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (1..=BOARD_SIZE).rev() {
        let mut empty_count = 0u8;

        for file in 1..=BOARD_SIZE {
            match game_state.piece_at(Square::grid(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.symbol());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 1 {
            out.push('/');
        }
    }

    out
}

pub fn generate_castling_field(castling_rights: CastlingRights) -> String {
    let mut out = String::new();
    for (flag, ch) in [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ] {
        if castling_rights & flag != 0 {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

/// Target square behind the pawn that just advanced two squares.
fn generate_en_passant_field(en_passant_square: Option<Square>) -> String {
    let Some(pawn) = en_passant_square else {
        return "-".to_owned();
    };
    let behind = if pawn.y() == 4 { 3 } else { 6 };
    Square::grid(pawn.x(), behind).to_string()
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;

    #[test]
    fn round_trips_reference_positions() {
        for fen in [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
            "8/8/8/8/8/8/8/8 b - - 0 1",
        ] {
            let game = GameState::from_fen(fen).unwrap();
            assert_eq!(generate_fen(&game), fen);
        }
    }
}
