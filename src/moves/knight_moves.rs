use crate::game_state::chess_types::Square;

/// Knight jumps in generation order, clockwise from "up two, right one".
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Playable knight destinations. A jump can clear the one-cell sentinel ring,
/// so every destination is range-checked rather than relying on the border.
#[inline]
pub fn knight_jumps(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_JUMPS
        .into_iter()
        .filter_map(move |(dx, dy)| from.offset(dx, dy))
        .filter(|square| square.is_on_board())
}

#[cfg(test)]
mod tests {
    use super::knight_jumps;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_jumps_from_d4_has_eight_targets() {
        let d4 = Square::new(4, 4).unwrap();
        assert_eq!(knight_jumps(d4).count(), 8);
    }

    #[test]
    fn knight_jumps_from_corner_stay_on_board() {
        let a1 = Square::new(1, 1).unwrap();
        let targets: Vec<String> = knight_jumps(a1).map(|sq| sq.to_string()).collect();
        assert_eq!(targets, vec!["b3", "c2"]);

        let g7 = Square::new(7, 7).unwrap();
        assert_eq!(knight_jumps(g7).count(), 4);
    }
}
