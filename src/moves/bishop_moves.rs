/// NE, SE, SW, NW.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

#[cfg(test)]
mod tests {
    use super::BISHOP_DIRECTIONS;
    use crate::game_state::chess_types::Square;
    use crate::moves::rook_moves::ray;

    #[test]
    fn bishop_rays_from_d4_have_thirteen_squares() {
        let d4 = Square::new(4, 4).unwrap();
        let count: usize = BISHOP_DIRECTIONS
            .into_iter()
            .map(|direction| ray(d4, direction).filter(|sq| sq.is_on_board()).count())
            .sum();
        assert_eq!(count, 13);
    }
}
