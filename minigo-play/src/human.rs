use std::fmt;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use minigo_engine::{BoardState, Move, Position};

use crate::policy::Policy;

#[derive(Debug)]
enum InputError {
    Empty,
    Invalid(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "empty input is not allowed"),
            InputError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

/// Asks a person for each move, one coordinate per line. Entering `-1` for
/// both coordinates passes.
pub struct HumanPolicy<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanPolicy<StdinLock<'static>, Stdout> {
    pub fn stdio(name: impl Into<String>) -> Self {
        HumanPolicy::new(name, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPolicy<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        HumanPolicy {
            name: name.into(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompt until a legal move or a pass is entered. `None` means the input
    /// is exhausted.
    fn prompt_move(&mut self, state: &BoardState) -> io::Result<Option<Move>> {
        loop {
            writeln!(self.output, "Your input (x: -1, y: -1) means `pass`:")?;
            let x = match self.read_coordinate("x")? {
                Some(x) => x,
                None => return Ok(None),
            };
            let y = match self.read_coordinate("y")? {
                Some(y) => y,
                None => return Ok(None),
            };

            match Self::validate(state, x, y) {
                Ok(mv) => return Ok(Some(mv)),
                Err(e) => {
                    writeln!(self.output, "The input is invalid: {e}")?;
                    writeln!(self.output, "Please try again!")?;
                }
            }
        }
    }

    fn read_coordinate(&mut self, axis: &str) -> io::Result<Option<Result<i64, InputError>>> {
        write!(self.output, "{axis}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(Err(InputError::Empty)));
        }
        Ok(Some(line.parse::<i64>().map_err(|_| {
            InputError::Invalid(format!("coordinate must be an integer, got {line:?}"))
        })))
    }

    fn validate(
        state: &BoardState,
        x: Result<i64, InputError>,
        y: Result<i64, InputError>,
    ) -> Result<Move, InputError> {
        let (x, y) = (x?, y?);
        if (x, y) == (-1, -1) {
            return Ok(Move::Pass);
        }
        let position = usize::try_from(x)
            .ok()
            .zip(usize::try_from(y).ok())
            .map(|(x, y)| Position::new(x, y))
            .ok_or_else(|| InputError::Invalid(format!("({x}, {y}) is not on the board")))?;
        if !state.legal_moves().contains(&position) {
            return Err(InputError::Invalid("the move is not legal".to_string()));
        }
        Ok(Move::Place(position))
    }
}

impl<R: BufRead, W: Write> Policy for HumanPolicy<R, W> {
    fn participant_name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, state: &BoardState, _previous: Option<Move>) -> Move {
        if state.legal_moves().is_empty() {
            return Move::Pass;
        }
        match self.prompt_move(state) {
            Ok(Some(mv)) => mv,
            Ok(None) => {
                tracing::info!(participant = %self.name, "input closed, passing");
                Move::Pass
            }
            Err(e) => {
                tracing::warn!(participant = %self.name, "failed to read move: {e}");
                Move::Pass
            }
        }
    }
}
