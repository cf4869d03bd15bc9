use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board coordinate. `x` is the row, `y` is the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    pub fn is_on_board(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// The in-bounds orthogonal neighbors, in the order +x, -x, +y, -y.
    ///
    /// Every adjacency walk in the engine goes through this method so the
    /// visiting order stays the same everywhere.
    pub fn neighbors(&self, size: usize) -> ArrayVec<Position, 4> {
        let Position { x, y } = *self;
        let mut result = ArrayVec::new();
        if x + 1 < size {
            result.push(Position::new(x + 1, y));
        }
        if x > 0 {
            result.push(Position::new(x - 1, y));
        }
        if y + 1 < size {
            result.push(Position::new(x, y + 1));
        }
        if y > 0 {
            result.push(Position::new(x, y - 1));
        }
        result
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_have_two_neighbors() {
        for (x, y) in [(0, 0), (0, 8), (8, 0), (8, 8)] {
            assert_eq!(Position::new(x, y).neighbors(9).len(), 2);
        }
    }

    #[test]
    fn edges_have_three_neighbors() {
        assert_eq!(Position::new(0, 4).neighbors(9).len(), 3);
        assert_eq!(Position::new(4, 8).neighbors(9).len(), 3);
    }

    #[test]
    fn neighbor_counts_over_whole_board() {
        let size = 7;
        for x in 0..size {
            for y in 0..size {
                let count = Position::new(x, y).neighbors(size).len();
                let on_x_edge = x == 0 || x == size - 1;
                let on_y_edge = y == 0 || y == size - 1;
                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 2,
                    (true, false) | (false, true) => 3,
                    (false, false) => 4,
                };
                assert_eq!(count, expected, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn neighbor_order_is_canonical() {
        let n = Position::new(3, 3).neighbors(9);
        assert_eq!(
            n.as_slice(),
            &[
                Position::new(4, 3),
                Position::new(2, 3),
                Position::new(3, 4),
                Position::new(3, 2),
            ]
        );
    }

    #[test]
    fn single_point_board_has_no_neighbors() {
        assert!(Position::new(0, 0).neighbors(1).is_empty());
    }

    #[test]
    fn on_board_check() {
        assert!(Position::new(0, 0).is_on_board(9));
        assert!(Position::new(8, 8).is_on_board(9));
        assert!(!Position::new(9, 0).is_on_board(9));
        assert!(!Position::new(0, 9).is_on_board(9));
    }

    #[test]
    fn display() {
        assert_eq!(Position::new(2, 5).to_string(), "(2, 5)");
    }
}
