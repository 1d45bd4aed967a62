//! Rook directions and the ray walker shared by all sliding pieces.

use crate::game_state::chess_types::Square;

/// N, E, S, W.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Successive grid cells from `from` (exclusive) in one direction, ending
/// once the sentinel ring has been yielded.
#[inline]
pub fn ray(from: Square, (dx, dy): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(dx, dy), move |current| {
        if current.is_on_board() {
            current.offset(dx, dy)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{ray, ROOK_DIRECTIONS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = Square::new(4, 4).unwrap();
        let count: usize = ROOK_DIRECTIONS
            .into_iter()
            .map(|direction| ray(d4, direction).filter(|sq| sq.is_on_board()).count())
            .sum();
        assert_eq!(count, 14);
    }

    #[test]
    fn ray_ends_on_the_sentinel() {
        let a1 = Square::new(1, 1).unwrap();
        let west: Vec<Square> = ray(a1, (-1, 0)).collect();
        assert_eq!(west.len(), 1);
        assert!(!west[0].is_on_board());
    }
}
