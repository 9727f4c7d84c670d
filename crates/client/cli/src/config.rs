//! CLI-specific configuration: where files go, and the command line.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use runtime::SaveSlot;
use thiserror::Error;

use crate::scenario::MAX_PLAYERS;

/// Paths used by the terminal client.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KINGDOMS_SAVE_DIR` - Save game directory (default: platform data dir)
    /// - `KINGDOMS_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        let dirs = ProjectDirs::from("org", "kingdoms", "kingdoms");
        let fallback = || PathBuf::from(".kingdoms");

        let save_dir = env::var_os("KINGDOMS_SAVE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|dirs| dirs.data_dir().join("saves")))
            .unwrap_or_else(|| fallback().join("saves"));
        let log_dir = env::var_os("KINGDOMS_LOG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|dirs| dirs.cache_dir().join("logs")))
            .unwrap_or_else(|| fallback().join("logs"));

        Self { save_dir, log_dir }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown argument `{0}`")]
    Unknown(String),

    #[error("`{0}` needs a value")]
    MissingValue(&'static str),

    #[error("player count must be between 1 and {MAX_PLAYERS}, got `{0}`")]
    InvalidPlayers(String),

    #[error("unknown save slot `{0}`; expected `autosave` or `quick`")]
    InvalidSlot(String),
}

/// Parsed command line.
///
/// ```text
/// kingdoms [--players N] [--resume [autosave|quick]]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub players: usize,
    /// Slot to continue from instead of starting a new game.
    pub resume: Option<SaveSlot>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            players: 1,
            resume: None,
        }
    }
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--players" | "-p" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--players"))?;
                    parsed.players = value
                        .parse()
                        .ok()
                        .filter(|count| (1..=MAX_PLAYERS).contains(count))
                        .ok_or(ArgsError::InvalidPlayers(value))?;
                }
                "--resume" | "-r" => {
                    let slot = match args.next_if(|next| !next.starts_with('-')) {
                        Some(value) => value
                            .parse::<SaveSlot>()
                            .map_err(|_| ArgsError::InvalidSlot(value))?,
                        None => SaveSlot::Autosave,
                    };
                    parsed.resume = Some(slot);
                }
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }

        Ok(parsed)
    }
}
