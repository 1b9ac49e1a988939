//! Game configuration.
//!
//! Settings can be built in code, loaded from `HOLDEM_*` environment
//! variables, or read from a JSON document. All three paths run the same
//! validation.

use serde::{Deserialize, Serialize};

use crate::game::{
    constants::{
        DEFAULT_BIG_BLIND, DEFAULT_CHIP_UNIT, DEFAULT_MAX_HANDS, DEFAULT_MAX_PLAYERS,
        DEFAULT_MIN_PLAYERS, DEFAULT_SMALL_BLIND, MAX_PLAYERS,
    },
    entities::{Blinds, Chips, SeatIndex},
};

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GameSettings {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Fewest funded seats needed to keep dealing hands
    pub min_players: usize,
    /// Number of seats at the table
    pub max_players: usize,
    /// Game ends after this many hands
    pub max_hands: u32,
    /// Smallest chip denomination; split pots are truncated to it
    pub chip_unit: Chips,
    /// Seat holding the button for the first hand. Chosen at random among
    /// funded seats when unset.
    pub first_button: Option<SeatIndex>,
    /// Seed for shuffling and button placement. Seeded games replay
    /// identically.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            max_hands: DEFAULT_MAX_HANDS,
            chip_unit: DEFAULT_CHIP_UNIT,
            first_button: None,
            seed: None,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind,
            big: self.big_blind,
        }
    }

    /// Load settings from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting settings fail validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = Self {
            small_blind: parse_env_or("HOLDEM_SMALL_BLIND", DEFAULT_SMALL_BLIND),
            big_blind: parse_env_or("HOLDEM_BIG_BLIND", DEFAULT_BIG_BLIND),
            min_players: parse_env_or("HOLDEM_MIN_PLAYERS", DEFAULT_MIN_PLAYERS),
            max_players: parse_env_or("HOLDEM_MAX_PLAYERS", DEFAULT_MAX_PLAYERS),
            max_hands: parse_env_or("HOLDEM_MAX_HANDS", DEFAULT_MAX_HANDS),
            chip_unit: parse_env_or("HOLDEM_CHIP_UNIT", DEFAULT_CHIP_UNIT),
            first_button: parse_env("HOLDEM_FIRST_BUTTON"),
            seed: parse_env("HOLDEM_SEED"),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the document is malformed or the settings fail
    /// validation
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 {
            return Err(ConfigError::Invalid {
                var: "small_blind".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.big_blind <= self.small_blind {
            return Err(ConfigError::Invalid {
                var: "big_blind".to_string(),
                reason: format!("Must be greater than small blind ({})", self.small_blind),
            });
        }

        if self.chip_unit == 0 {
            return Err(ConfigError::Invalid {
                var: "chip_unit".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.small_blind % self.chip_unit != 0 || self.big_blind % self.chip_unit != 0 {
            return Err(ConfigError::Invalid {
                var: "chip_unit".to_string(),
                reason: format!("Blinds must be multiples of {}", self.chip_unit),
            });
        }

        if self.min_players < 2 {
            return Err(ConfigError::Invalid {
                var: "min_players".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.max_players < self.min_players {
            return Err(ConfigError::Invalid {
                var: "max_players".to_string(),
                reason: format!("Must be at least min players ({})", self.min_players),
            });
        }

        if self.max_players > MAX_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "max_players".to_string(),
                reason: format!("Must be at most {MAX_PLAYERS} (max players with 52-card deck)"),
            });
        }

        if self.max_hands == 0 {
            return Err(ConfigError::Invalid {
                var: "max_hands".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if let Some(seat) = self.first_button.filter(|&seat| seat >= self.max_players) {
            return Err(ConfigError::Invalid {
                var: "first_button".to_string(),
                reason: format!("Seat {seat} is past the last seat ({})", self.max_players - 1),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Malformed configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    parse_env(key).unwrap_or(default)
}

fn parse_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
