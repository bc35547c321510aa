//! Session configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Timing parameters for quiz and adventure sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long an adventure outcome stays on screen before the story moves on.
    pub adventure_reveal_ms: u64,

    /// How long quiz feedback stays on screen before the next question.
    pub quiz_reveal_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            adventure_reveal_ms: 6000,
            quiz_reveal_ms: 3000,
        }
    }
}

impl SessionConfig {
    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Both reveal windows must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adventure_reveal_ms == 0 {
            return Err(ConfigError::ZeroRevealDelay("adventure_reveal_ms"));
        }
        if self.quiz_reveal_ms == 0 {
            return Err(ConfigError::ZeroRevealDelay("quiz_reveal_ms"));
        }
        Ok(())
    }

    pub fn adventure_reveal(&self) -> Duration {
        Duration::from_millis(self.adventure_reveal_ms)
    }

    pub fn quiz_reveal(&self) -> Duration {
        Duration::from_millis(self.quiz_reveal_ms)
    }
}
