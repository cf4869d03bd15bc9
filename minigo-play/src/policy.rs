use minigo_engine::{BoardState, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that picks the next move for the player to move.
pub trait Policy {
    fn participant_name(&self) -> &str;

    /// Choose a move for `state.next_player_color()`. `previous` is the
    /// opponent's last move, or `None` at the start of a game.
    fn next_move(&mut self, state: &BoardState, previous: Option<Move>) -> Move;
}

/// Plays a uniformly random legal move.
///
/// Once the opponent has passed it only plays moves that raise its own score,
/// and passes otherwise, so that two random players end their games.
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        RandomPolicy {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        RandomPolicy {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample legal moves without replacement until one improves the score.
    fn move_without_lowering_score(&mut self, state: &BoardState) -> Move {
        let player = state.next_player_color();
        let current = state.score(player);
        let mut candidates = state.legal_moves().to_vec();

        while !candidates.is_empty() {
            let candidate = candidates.swap_remove(self.rng.random_range(0..candidates.len()));
            let Ok(next) = state.placing_new_stone(candidate) else {
                continue;
            };
            if next.score(player) > current {
                return Move::Place(candidate);
            }
        }
        Move::Pass
    }
}

impl Policy for RandomPolicy {
    fn participant_name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, state: &BoardState, previous: Option<Move>) -> Move {
        let legal = state.legal_moves();
        if legal.is_empty() {
            return Move::Pass;
        }
        if previous == Some(Move::Pass) {
            return self.move_without_lowering_score(state);
        }
        Move::Place(legal[self.rng.random_range(0..legal.len())])
    }
}
