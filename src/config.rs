use std::path::Path;

use crate::error::ConfigError;
use crate::game::{is_valid_name, Mark, Seat};

/// Which front end drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Full-screen terminal UI
    Tui,
    /// Line-by-line prompts on stdin/stdout
    Text,
}

/// Default player setup. The text console asks for these interactively; the
/// terminal UI uses them as-is.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub one: String,
    pub two: String,
    /// Mark used by player one; player two gets the other
    pub one_mark: Mark,
    pub first: Seat,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            one: "Player 1".to_string(),
            two: "Player 2".to_string(),
            one_mark: Mark::X,
            first: Seat::One,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub mode: UiMode,
    /// Offer the tutorial before a text-mode game
    pub tutorial: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            mode: UiMode::Tui,
            tutorial: true,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_name(&self.players.one) {
            return Err(ConfigError::Validation(format!(
                "players.one '{}' is not a valid name",
                self.players.one
            )));
        }
        if !is_valid_name(&self.players.two) {
            return Err(ConfigError::Validation(format!(
                "players.two '{}' is not a valid name",
                self.players.two
            )));
        }
        if self.players.one.trim().eq_ignore_ascii_case(self.players.two.trim()) {
            return Err(ConfigError::Validation(
                "players.one and players.two must differ".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
