//! Play Go games on the `minigo-engine` rules engine from the terminal.
//!
//! - `minigo-play` - one 9x9 game between two random players
//! - `minigo-play --first human` - play against a random player; colors are
//!   assigned at random
//! - `minigo-play --games 10 --seed 1` - reproducible batch of random games

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use minigo_engine::GameConfiguration;
use minigo_play::{HumanPolicy, PlayOptions, Policy, RandomPolicy, play_one_game};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyKind {
    Random,
    Human,
}

/// Self-play driver for the MiniGo rules engine
#[derive(Parser)]
#[command(name = "minigo-play")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board edge length
    #[arg(long, default_value_t = 9)]
    size: usize,
    /// Points added to white's score
    #[arg(long, default_value_t = 7.5)]
    komi: f32,
    /// Previous boards kept in each snapshot
    #[arg(long, default_value_t = minigo_engine::config::DEFAULT_MAX_HISTORY_COUNT)]
    max_history: usize,
    /// Log engine internals (groups, captures, liberty index)
    #[arg(long)]
    verbose: bool,
    /// JSON game configuration; overrides the board flags above
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for color assignment and random players
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Give up on a game after this many moves
    #[arg(long)]
    max_moves: Option<usize>,
    /// Policy of the first participant
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    first: PolicyKind,
    /// Policy of the second participant
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    second: PolicyKind,
}

impl Cli {
    fn game_configuration(&self) -> anyhow::Result<GameConfiguration> {
        anyhow::ensure!(self.size > 0, "board size must be positive");
        let config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                GameConfiguration::from_json(&json)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => GameConfiguration::new(self.size, self.komi)
                .with_max_history_count(self.max_history)
                .with_verbose_debugging(self.verbose),
        };
        anyhow::ensure!(config.size > 0, "board size must be positive");
        Ok(config)
    }
}

fn participant_name(slot: &str, kind: PolicyKind) -> String {
    format!("{slot}-{kind:?}").to_lowercase()
}

fn make_policy(kind: PolicyKind, name: String, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::with_seed(name, seed)),
        PolicyKind::Human => Box::new(HumanPolicy::stdio(name)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "minigo_play=debug,minigo_engine=trace"
    } else {
        "minigo_play=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = cli.game_configuration()?;
    // Both would contend for the stdin lock.
    anyhow::ensure!(
        !(cli.first == PolicyKind::Human && cli.second == PolicyKind::Human),
        "at most one participant can be human"
    );
    let seed = cli.seed.unwrap_or_else(|| rand::rng().next_u64());
    tracing::info!(seed, "starting {} game(s)", cli.games);

    let options = PlayOptions {
        max_moves: cli.max_moves,
    };
    let mut black_wins = 0;
    for game in 0..cli.games {
        let game_seed = seed.wrapping_add(game as u64);
        let mut rng = StdRng::seed_from_u64(game_seed);
        let mut participants = [
            make_policy(cli.first, participant_name("first", cli.first), rng.next_u64()),
            make_policy(cli.second, participant_name("second", cli.second), rng.next_u64()),
        ];

        let record = play_one_game(config.clone(), &mut participants, &options, &mut rng)
            .with_context(|| format!("game {} (seed {game_seed}) failed", game + 1))?;
        if record.winner() == Some(minigo_engine::Color::Black) {
            black_wins += 1;
        }

        println!("{}", record.final_state);
        println!(
            "Game {}: {} (black: {}, white: {}, {} moves)",
            game + 1,
            record,
            record.black,
            record.white,
            record.moves.len()
        );
    }

    if cli.games > 1 {
        println!("Black won {black_wins} of {} games", cli.games);
    }
    Ok(())
}
