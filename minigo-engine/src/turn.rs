use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Pass,
    Place(Position),
}

impl Move {
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Move::Pass => None,
            Move::Place(p) => Some(*p),
        }
    }
}

impl From<Position> for Move {
    fn from(position: Position) -> Self {
        Move::Place(position)
    }
}

impl std::str::FromStr for Move {
    type Err = String;

    /// Accepts `pass`, `x,y`, or `-1,-1` (another way to spell pass).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }

        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("invalid move: {s}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid coordinate: {}", v.trim()))
        };
        match (parse(x)?, parse(y)?) {
            (-1, -1) => Ok(Move::Pass),
            (x, y) => match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) => Ok(Move::Place(Position::new(x, y))),
                _ => Err(format!("invalid move: {s}")),
            },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "pass"),
            Move::Place(p) => write!(f, "{},{}", p.x, p.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pass() {
        assert_eq!("pass".parse::<Move>(), Ok(Move::Pass));
        assert_eq!(" PASS ".parse::<Move>(), Ok(Move::Pass));
        assert_eq!("-1,-1".parse::<Move>(), Ok(Move::Pass));
    }

    #[test]
    fn parses_placement() {
        assert_eq!("3,4".parse::<Move>(), Ok(Move::Place(Position::new(3, 4))));
        assert_eq!(" 0 , 12".parse::<Move>(), Ok(Move::Place(Position::new(0, 12))));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Move>().is_err());
        assert!("3".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
        assert!("-1,3".parse::<Move>().is_err());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!("-3,4".parse::<Move>().is_err());
        assert!("4,-2".parse::<Move>().is_err());
        assert!("99999999999999999999,0".parse::<Move>().is_err());
    }

    #[test]
    fn display_parses_back() {
        let m = Move::Place(Position::new(7, 2));
        assert_eq!(m.to_string(), "7,2");
        assert_eq!(m.to_string().parse::<Move>(), Ok(m));
        assert_eq!(Move::Pass.to_string(), "pass");
    }

    #[test]
    fn accessors() {
        assert!(Move::Pass.is_pass());
        assert_eq!(Move::Pass.position(), None);
        let p = Position::new(1, 1);
        assert_eq!(Move::from(p).position(), Some(p));
    }
}
