//! King step table.
//!
//! The order here is the order king moves are generated in: N, NE, E, SE, S,
//! SW, W, NW. Castling moves follow the eight steps.

use crate::game_state::chess_types::Square;

pub const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Adjacent grid cells. From a playable square these always exist, though
/// some may be sentinel cells.
#[inline]
pub fn king_steps(from: Square) -> impl Iterator<Item = Square> {
    KING_STEPS
        .into_iter()
        .filter_map(move |(dx, dy)| from.offset(dx, dy))
}
