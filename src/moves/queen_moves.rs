use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

/// Rook directions first, then bishop directions.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = generate_queen_directions();

const fn generate_queen_directions() -> [(i8, i8); 8] {
    let mut table = [(0i8, 0i8); 8];
    let mut i = 0usize;

    while i < 4 {
        table[i] = ROOK_DIRECTIONS[i];
        table[i + 4] = BISHOP_DIRECTIONS[i];
        i += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::QUEEN_DIRECTIONS;
    use crate::game_state::chess_types::Square;
    use crate::moves::rook_moves::ray;

    #[test]
    fn queen_rays_from_d4_have_twenty_seven_squares() {
        let d4 = Square::new(4, 4).unwrap();
        let count: usize = QUEEN_DIRECTIONS
            .into_iter()
            .map(|direction| ray(d4, direction).filter(|sq| sq.is_on_board()).count())
            .sum();
        assert_eq!(count, 27);
    }

    #[test]
    fn queen_directions_start_with_rook_directions() {
        assert_eq!(QUEEN_DIRECTIONS[0], (0, 1));
        assert_eq!(QUEEN_DIRECTIONS[4], (1, 1));
    }
}
