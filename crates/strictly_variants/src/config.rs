//! Session configuration loaded from TOML.

use crate::games::{DEFAULT_DROP_SPEED, Player, Variant};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Rule set to play.
    #[serde(default)]
    variant: Variant,

    /// Whether one side is played by the bot.
    #[serde(default = "default_vs_bot")]
    vs_bot: bool,

    /// Side the bot plays.
    #[serde(default = "default_bot_player")]
    bot_player: Player,

    /// Delay before the bot moves, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    bot_delay_ms: u64,

    /// Gravity fall speed in rows per second.
    #[serde(default = "default_drop_speed")]
    drop_speed: f32,

    /// Seed for the bot's random choices; the OS seeds it when unset.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_vs_bot() -> bool {
    true
}

fn default_bot_player() -> Player {
    Player::O
}

fn default_bot_delay_ms() -> u64 {
    1000
}

fn default_drop_speed() -> f32 {
    DEFAULT_DROP_SPEED
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            vs_bot: default_vs_bot(),
            bot_player: default_bot_player(),
            bot_delay_ms: default_bot_delay_ms(),
            drop_speed: default_drop_speed(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Default settings for `variant`.
    #[instrument]
    pub fn new(variant: Variant, vs_bot: bool) -> Self {
        Self {
            variant,
            vs_bot,
            ..Self::default()
        }
    }

    /// Replaces the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Turns the bot on or off.
    pub fn with_vs_bot(mut self, vs_bot: bool) -> Self {
        self.vs_bot = vs_bot;
        self
    }

    /// Replaces the bot seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the bot delay.
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.bot_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Bot delay as a duration.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(variant = %config.variant, vs_bot = config.vs_bot, "Config loaded successfully");
        Ok(config)
    }

    /// Rejects settings the session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.drop_speed.is_finite() && self.drop_speed > 0.0) {
            return Err(ConfigError::new(format!(
                "drop_speed must be positive, got {}",
                self.drop_speed
            )));
        }
        Ok(())
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
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(*config.variant(), Variant::Classic);
        assert!(*config.vs_bot());
        assert_eq!(*config.bot_player(), Player::O);
        assert_eq!(config.bot_delay(), Duration::from_secs(1));
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: SessionConfig = toml::from_str("variant = \"ultimate\"\nseed = 9\n").unwrap();
        assert_eq!(*config.variant(), Variant::Ultimate);
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.bot_delay_ms(), 1000);
    }

    #[test]
    fn test_non_positive_drop_speed_rejected() {
        let config: SessionConfig = toml::from_str("drop_speed = 0.0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("drop_speed"));
        assert!(err.file.ends_with("config.rs"));
    }
}
