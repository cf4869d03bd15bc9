//! Drivers for the `minigo-engine` rules engine: move-choosing policies and a
//! loop that plays one game between two of them.

pub mod error;
pub mod game;
pub mod human;
pub mod policy;

pub use error::PlayError;
pub use game::{GameRecord, PlayOptions, play_one_game};
pub use human::HumanPolicy;
pub use policy::{Policy, RandomPolicy};
