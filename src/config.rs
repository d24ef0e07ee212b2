//! Engine configuration loaded from TOML.

use crate::games::tictactoe::{ControllerSettings, Difficulty, Mark};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the computer plays `computer_mark`.
    #[serde(default = "default_opponent_enabled")]
    opponent_enabled: bool,

    /// Computer strength (`easy` or `hard`).
    #[serde(default)]
    difficulty: Difficulty,

    /// Mark the computer plays.
    #[serde(default = "default_computer_mark")]
    computer_mark: Mark,

    /// Mark that opens the first round.
    #[serde(default = "default_starting_mark")]
    starting_mark: Mark,

    /// Pause before a computer move lands, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Seed for the easy opponent's random picks.
    #[serde(default)]
    seed: Option<u64>,

    /// Display name for X.
    #[serde(default = "default_player_x_name")]
    player_x_name: String,

    /// Display name for O.
    #[serde(default = "default_player_o_name")]
    player_o_name: String,
}

fn default_opponent_enabled() -> bool {
    true
}

fn default_computer_mark() -> Mark {
    Mark::O
}

fn default_starting_mark() -> Mark {
    Mark::X
}

fn default_computer_delay_ms() -> u64 {
    480
}

fn default_player_x_name() -> String {
    "X".to_string()
}

fn default_player_o_name() -> String {
    "O".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opponent_enabled: default_opponent_enabled(),
            difficulty: Difficulty::default(),
            computer_mark: default_computer_mark(),
            starting_mark: default_starting_mark(),
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
            player_x_name: default_player_x_name(),
            player_o_name: default_player_o_name(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(difficulty = %config.difficulty, opponent = config.opponent_enabled, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.computer_delay_ms > 60_000 {
            return Err(ConfigError::new(format!(
                "computer_delay_ms must be at most 60000, got {}",
                self.computer_delay_ms
            )));
        }
        Ok(())
    }

    /// Overrides the opponent toggle.
    pub fn with_opponent_enabled(mut self, enabled: bool) -> Self {
        self.opponent_enabled = enabled;
        self
    }

    /// Overrides the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the computer's mark.
    pub fn with_computer_mark(mut self, mark: Mark) -> Self {
        self.computer_mark = mark;
        self
    }

    /// Overrides the delay before computer moves.
    pub fn with_computer_delay_ms(mut self, delay_ms: u64) -> Self {
        self.computer_delay_ms = delay_ms;
        self
    }

    /// Overrides the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Display name for `mark`.
    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.player_x_name,
            Mark::O => &self.player_o_name,
        }
    }

    /// Settings for a new round controller.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            opponent_enabled: self.opponent_enabled,
            difficulty: self.difficulty,
            computer_mark: self.computer_mark,
            starting_mark: self.starting_mark,
            computer_delay: Duration::from_millis(self.computer_delay_ms),
            seed: self.seed,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
