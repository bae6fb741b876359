//! Command-line front end for playing Qirkat.
//!
//! The board engine and the search engines live in their own crates; this
//! binary only parses arguments, merges them with an optional config
//! file, and runs the interactive command loop.

mod game;
mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qirkat_core::{SearchLimits, DEFAULT_DEPTH};
use settings::{PlayerKind, Settings};

/// Play Qirkat against the engine or watch engines play each other.
#[derive(Debug, Parser)]
#[command(name = "qirkat", version, about)]
struct Args {
    /// Maximum search depth in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Wall-clock budget per engine move, in milliseconds
    #[arg(long)]
    move_time_ms: Option<u64>,

    /// Move source for White
    #[arg(long, value_enum)]
    white: Option<PlayerKind>,

    /// Move source for Black
    #[arg(long, value_enum)]
    black: Option<PlayerKind>,

    /// Seed for the random engine
    #[arg(long)]
    seed: Option<u64>,

    /// Read defaults from a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print row and column legends around displayed boards
    #[arg(long)]
    legend: bool,

    /// Reprint the board after every change
    #[arg(long)]
    show_board: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    // Flags win over the config file, the file over built-in defaults.
    let depth = args.depth.or(file.depth).unwrap_or(DEFAULT_DEPTH);
    let move_time = args
        .move_time_ms
        .or(file.move_time_ms)
        .map(Duration::from_millis);
    let white = args.white.or(file.white).unwrap_or(PlayerKind::Manual);
    let black = args.black.or(file.black).unwrap_or(PlayerKind::Minimax);
    let seed = args.seed.or(file.seed);
    let legend = args.legend || file.legend.unwrap_or(false);
    let show_board = args.show_board || file.show_board.unwrap_or(false);

    let limits = match move_time {
        Some(time) => SearchLimits::depth_and_time(depth, time),
        None => SearchLimits::depth(depth),
    };

    let mut game = game::Game::new(white, black, limits, seed, legend, show_board);
    game.run()
}
