use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Which move source drives a side.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves are typed at the prompt
    Manual,
    /// Alpha-beta search engine
    Minimax,
    /// Uniformly random legal moves
    Random,
}

/// Defaults read from a TOML config file. Command-line flags override
/// these; these override the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub depth: Option<u8>,
    pub move_time_ms: Option<u64>,
    pub white: Option<PlayerKind>,
    pub black: Option<PlayerKind>,
    pub seed: Option<u64>,
    pub legend: Option<bool>,
    pub show_board: Option<bool>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod settings_tests;
