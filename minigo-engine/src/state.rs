use std::fmt;
use std::sync::Arc;

use crate::Position;
use crate::board::Board;
use crate::color::Color;
use crate::config::GameConfiguration;
use crate::error::{IllegalMove, PositionStatus};
use crate::liberty::{LibertyGroup, LibertyTracker};
use crate::turn::Move;

/// An immutable snapshot of a game.
///
/// A `BoardState` is never changed in place: [`passing`](Self::passing) and
/// [`placing_new_stone`](Self::placing_new_stone) build a new snapshot from
/// private copies of the board and liberty tracker, so snapshots can be
/// shared between threads and sibling search branches freely.
///
/// Whether the game is over (for example two passes in a row) is for the
/// caller to decide. The snapshot only answers which moves are legal and what
/// the score is.
#[derive(Debug, Clone)]
pub struct BoardState {
    config: Arc<GameConfiguration>,
    next_player_color: Color,
    ko: Option<Position>,
    legal_moves: Vec<Position>,
    board: Board,
    /// Previous boards, most recent first, at most `max_history_count` long.
    history: Vec<Board>,
    played_move_count: usize,
    stone_count: usize,
    liberty_tracker: LibertyTracker,
}

impl BoardState {
    /// The empty board with black to move.
    pub fn new(config: impl Into<Arc<GameConfiguration>>) -> Self {
        let config = config.into();
        let board = Board::new(config.size);
        let liberty_tracker = LibertyTracker::new(&config);
        Self::from_parts(config, Color::Black, 0, 0, None, Vec::new(), board, liberty_tracker)
    }

    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        config: Arc<GameConfiguration>,
        next_player_color: Color,
        played_move_count: usize,
        stone_count: usize,
        ko: Option<Position>,
        history: Vec<Board>,
        board: Board,
        liberty_tracker: LibertyTracker,
    ) -> Self {
        assert_eq!(board.size(), config.size, "board does not match configuration");
        debug_assert!(history.len() <= config.max_history_count);

        let legal_moves = if board.is_full() {
            Vec::new()
        } else {
            board.all_legal_moves(ko, &liberty_tracker, next_player_color)
        };

        BoardState {
            config,
            next_player_color,
            ko,
            legal_moves,
            board,
            history,
            played_move_count,
            stone_count,
            liberty_tracker,
        }
    }

    // -- Accessors --

    pub fn game_configuration(&self) -> &GameConfiguration {
        &self.config
    }

    pub fn next_player_color(&self) -> Color {
        self.next_player_color
    }

    /// The point forbidden by the ko rule for the player to move.
    pub fn ko(&self) -> Option<Position> {
        self.ko
    }

    /// Every point the player to move may play on, in row-major order.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn played_move_count(&self) -> usize {
        self.played_move_count
    }

    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    /// The group occupying `position`, if any.
    pub fn group_at(&self, position: Position) -> Option<&LibertyGroup> {
        self.liberty_tracker.group(position)
    }

    pub fn position_status(&self, position: Position) -> PositionStatus {
        self.board.position_status(
            position,
            self.ko,
            &self.liberty_tracker,
            self.next_player_color,
        )
    }

    pub fn is_legal(&self, position: Position) -> bool {
        self.position_status(position).is_legal()
    }

    // -- Transitions --

    pub fn passing(&self) -> BoardState {
        if self.config.is_verbose_debugging_enabled {
            tracing::debug!(player = %self.next_player_color, "pass");
        }
        Self::from_parts(
            self.config.clone(),
            self.next_player_color.opponent(),
            self.played_move_count + 1,
            self.stone_count,
            None,
            self.history_with_current(),
            self.board.clone(),
            self.liberty_tracker.clone(),
        )
    }

    /// The state after the player to move places a stone at `position`.
    ///
    /// Fails without side effects if the point is occupied, is the ko point,
    /// or the stone would have no liberties after captures.
    pub fn placing_new_stone(&self, position: Position) -> Result<BoardState, IllegalMove> {
        if let PositionStatus::Illegal(reason) = self.position_status(position) {
            return Err(reason);
        }

        let color = self.next_player_color;
        let is_potential_ko = self.board.is_koish(position, color);

        let mut liberty_tracker = self.liberty_tracker.clone();
        let captured = liberty_tracker.add_stone(position, color)?;

        let mut board = self.board.clone();
        board.place_stone(position, color);
        for &stone in &captured {
            board.remove_stone(stone);
        }

        let stone_count = self.stone_count + 1 - captured.len();

        let ko = match captured.iter().next() {
            Some(&stone) if captured.len() == 1 && is_potential_ko => Some(stone),
            _ => None,
        };

        if self.config.is_verbose_debugging_enabled {
            tracing::debug!(
                player = %color,
                %position,
                captured = captured.len(),
                stone_count,
                ?ko,
                "stone placed"
            );
        }

        Ok(Self::from_parts(
            self.config.clone(),
            color.opponent(),
            self.played_move_count + 1,
            stone_count,
            ko,
            self.history_with_current(),
            board,
            liberty_tracker,
        ))
    }

    pub fn applying(&self, mv: Move) -> Result<BoardState, IllegalMove> {
        match mv {
            Move::Pass => Ok(self.passing()),
            Move::Place(position) => self.placing_new_stone(position),
        }
    }

    /// Area score for `player`, komi included.
    pub fn score(&self, player: Color) -> f32 {
        let black = self.board.score_for_black_player(self.config.komi);
        match player {
            Color::Black => black,
            Color::White => -black,
        }
    }

    fn history_with_current(&self) -> Vec<Board> {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.push(self.board.clone());
        history.extend(self.history.iter().cloned());
        history.truncate(self.config.max_history_count);
        history
    }
}

/// Two states are equal when their boards, player to move, ko point and
/// history agree. The liberty tracker is derived data and is not compared.
impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.next_player_color == other.next_player_color
            && self.ko == other.ko
            && self.history == other.history
    }
}

impl Eq for BoardState {}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
