use std::collections::HashSet;
use std::fmt;

use crate::Position;
use crate::color::Color;
use crate::error::{IllegalMove, PositionStatus};
use crate::liberty::LibertyTracker;

/// The stones on a square board, stored as a flat row-major array.
///
/// A `Board` can be mutated freely and performs no legality checks; that is
/// `BoardState`'s job. Cloning copies the whole grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    stones: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Board {
            size,
            stones: vec![None; size * size],
        }
    }

    // -- Accessors --

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn color(&self, position: Position) -> Option<Color> {
        self.stones[self.idx(position)]
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.stones.iter().filter(|&&s| s == Some(color)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.stones.iter().all(Option::is_some)
    }

    /// Every point of the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Position::new(x, y)))
    }

    // -- Mutation --

    pub fn place_stone(&mut self, position: Position, color: Color) {
        let i = self.idx(position);
        self.stones[i] = Some(color);
    }

    pub fn remove_stone(&mut self, position: Position) {
        let i = self.idx(position);
        self.stones[i] = None;
    }

    // -- Legality --

    /// All points `next_player` may play on, in row-major order.
    pub(crate) fn all_legal_moves(
        &self,
        ko: Option<Position>,
        tracker: &LibertyTracker,
        next_player: Color,
    ) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.position_status(p, ko, tracker, next_player).is_legal())
            .collect()
    }

    pub(crate) fn position_status(
        &self,
        position: Position,
        ko: Option<Position>,
        tracker: &LibertyTracker,
        next_player: Color,
    ) -> PositionStatus {
        if self.color(position).is_some() {
            return PositionStatus::Illegal(IllegalMove::Occupied);
        }
        if ko == Some(position) {
            return PositionStatus::Illegal(IllegalMove::Ko);
        }
        if self.is_suicidal(position, tracker, next_player) {
            return PositionStatus::Illegal(IllegalMove::Suicide);
        }
        PositionStatus::Legal
    }

    /// Fast suicide test that only looks at the four neighbors.
    ///
    /// An empty neighbor is a direct liberty, and taking the last liberty of
    /// an adjacent opponent group is a capture, which is always legal.
    /// Otherwise the move survives only if the joined friendly groups keep a
    /// liberty other than `position` itself.
    fn is_suicidal(
        &self,
        position: Position,
        tracker: &LibertyTracker,
        next_player: Color,
    ) -> bool {
        let mut possible_liberties = HashSet::new();

        for neighbor in position.neighbors(self.size) {
            let Some(group) = tracker.group(neighbor) else {
                return false;
            };
            if group.color == next_player {
                possible_liberties.extend(group.liberties.iter().copied());
            } else if group.liberties.len() == 1 {
                return false;
            }
        }

        possible_liberties.remove(&position);
        possible_liberties.is_empty()
    }

    /// Whether every neighbor of the empty `position` holds an opponent
    /// stone. Only a candidate for ko: a real ko also needs the move to
    /// capture exactly one stone.
    pub(crate) fn is_koish(&self, position: Position, color: Color) -> bool {
        assert!(
            self.color(position).is_none(),
            "ko-ish test on occupied point {position}"
        );
        let opponent = color.opponent();
        position
            .neighbors(self.size)
            .iter()
            .all(|&n| self.color(n) == Some(opponent))
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, position: Position) -> usize {
        assert!(
            position.is_on_board(self.size),
            "{position} is off a {0}x{0} board",
            self.size
        );
        position.x * self.size + position.y
    }
}

impl fmt::Display for Board {
    /// Renders the grid with `X` for black, `O` for white and `.` for empty.
    /// Rows are `x`, columns are `y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wide = self.size > 10;
        let gap = if wide { "  " } else { " " };

        write!(f, "x/y")?;
        for y in 0..self.size {
            if wide {
                write!(f, " ")?;
            }
            write!(f, "{y:>2}")?;
        }
        writeln!(f)?;

        for x in 0..self.size {
            write!(f, "{x:>3}")?;
            for y in 0..self.size {
                let marker = self
                    .color(Position::new(x, y))
                    .map_or('.', Color::letter);
                write!(f, "{gap}{marker}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
