use std::fmt;

use minigo_engine::{BoardState, Color, GameConfiguration, Move};
use rand::Rng;

use crate::error::PlayError;
use crate::policy::Policy;

#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Stop with `PlayError::MoveLimit` after this many moves.
    pub max_moves: Option<usize>,
}

/// The outcome of a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub black: String,
    pub white: String,
    pub moves: Vec<Move>,
    pub final_state: BoardState,
    pub score_for_black: f32,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Color> {
        if self.score_for_black > 0.0 {
            Some(Color::Black)
        } else if self.score_for_black < 0.0 {
            Some(Color::White)
        } else {
            None
        }
    }
}

impl fmt::Display for GameRecord {
    /// `Black+3.5`, `White+0.5` or `Draw`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{color}+{}", self.score_for_black.abs()),
            None => write!(f, "Draw"),
        }
    }
}

/// Play one game between two participants until both pass in a row.
///
/// Colors are assigned at random. A move rejected by the engine ends the game
/// with an error.
pub fn play_one_game(
    config: GameConfiguration,
    participants: &mut [Box<dyn Policy>],
    options: &PlayOptions,
    rng: &mut impl Rng,
) -> Result<GameRecord, PlayError> {
    let count = participants.len();
    let [first, second] = participants else {
        return Err(PlayError::Participants(format!("expected 2, got {count}")));
    };
    if first.participant_name() == second.participant_name() {
        return Err(PlayError::Participants(format!(
            "both are named {:?}",
            first.participant_name()
        )));
    }

    let (black, white) = if rng.random_bool(0.5) {
        (first, second)
    } else {
        (second, first)
    };
    tracing::info!(
        black = black.participant_name(),
        white = white.participant_name(),
        size = config.size,
        komi = config.komi,
        "game started"
    );

    let verbose = config.is_verbose_debugging_enabled;
    let mut state = BoardState::new(config);
    let mut moves = Vec::new();
    let mut previous = None;
    let mut consecutive_passes = 0;

    loop {
        tracing::debug!("\n{state}");
        if verbose {
            tracing::debug!(
                legal_moves = state.legal_moves().len(),
                stones = state.stone_count(),
                ko = ?state.ko(),
                "position"
            );
        }

        if consecutive_passes >= 2 {
            break;
        }
        if options.max_moves.is_some_and(|limit| moves.len() >= limit) {
            return Err(PlayError::MoveLimit(moves.len()));
        }

        let color = state.next_player_color();
        let policy = match color {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        let mv = policy.next_move(&state, previous);
        tracing::debug!(player = %color, %mv, "move");

        state = state.applying(mv).map_err(|reason| PlayError::IllegalMove {
            participant: policy.participant_name().to_string(),
            color,
            mv,
            reason,
        })?;
        consecutive_passes = if mv.is_pass() { consecutive_passes + 1 } else { 0 };
        moves.push(mv);
        previous = Some(mv);
    }

    let record = GameRecord {
        black: black.participant_name().to_string(),
        white: white.participant_name().to_string(),
        moves,
        score_for_black: state.score(Color::Black),
        final_state: state,
    };
    tracing::info!(
        moves = record.moves.len(),
        score_for_black = record.score_for_black,
        "game over: {record}"
    );
    Ok(record)
}
