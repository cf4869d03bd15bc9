//! Go rules engine: board representation, liberty tracking, move legality,
//! capture, ko and area scoring.
//!
//! The entry point is [`BoardState`], an immutable snapshot. Search or
//! self-play drivers hold a snapshot, read [`BoardState::legal_moves`], and
//! derive new snapshots with [`BoardState::placing_new_stone`] or
//! [`BoardState::passing`].
//!
//! ```
//! use minigo_engine::{BoardState, Color, GameConfiguration, Position};
//!
//! let state = BoardState::new(GameConfiguration::new(9, 7.5));
//! let state = state.placing_new_stone(Position::new(2, 2)).unwrap();
//! assert_eq!(state.next_player_color(), Color::White);
//! assert_eq!(state.stone_count(), 1);
//! ```

pub mod board;
pub mod color;
pub mod config;
pub mod error;
pub mod liberty;
pub mod position;
pub mod state;
pub mod territory;
pub mod turn;

pub use board::Board;
pub use color::Color;
pub use config::GameConfiguration;
pub use error::{IllegalMove, PositionStatus};
pub use liberty::{GroupId, LibertyGroup, LibertyTracker};
pub use position::Position;
pub use state::BoardState;
pub use turn::Move;
