use std::fmt;

use minigo_engine::{Color, IllegalMove, Move};

#[derive(Debug, Clone, PartialEq)]
pub enum PlayError {
    /// A game needs exactly two participants with distinct names.
    Participants(String),
    /// A policy chose a move the engine rejected.
    IllegalMove {
        participant: String,
        color: Color,
        mv: Move,
        reason: IllegalMove,
    },
    /// The game hit the configured move cap before two consecutive passes.
    MoveLimit(usize),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Participants(msg) => write!(f, "invalid participants: {msg}"),
            PlayError::IllegalMove {
                participant,
                color,
                mv,
                reason,
            } => write!(f, "{participant} ({color}) played illegal move {mv}: {reason}"),
            PlayError::MoveLimit(limit) => write!(f, "game did not end within {limit} moves"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::IllegalMove { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
