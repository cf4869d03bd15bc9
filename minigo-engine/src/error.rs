use std::fmt;

/// Why a stone cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    /// The point already holds a stone.
    Occupied,
    /// The point is the one forbidden by the ko rule: playing there would
    /// immediately retake a single stone that was just captured.
    Ko,
    /// The placed stone's group would be left without liberties.
    Suicide,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::Occupied => write!(f, "occupied"),
            IllegalMove::Ko => write!(f, "ko"),
            IllegalMove::Suicide => write!(f, "suicide"),
        }
    }
}

impl std::error::Error for IllegalMove {}

/// Result of checking a single point for the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Legal,
    Illegal(IllegalMove),
}

impl PositionStatus {
    pub fn is_legal(self) -> bool {
        self == PositionStatus::Legal
    }
}
