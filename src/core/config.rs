//! Game configuration.
//!
//! `GameConfig` fixes the table setup a starting state is built from: seats,
//! life totals, opening hand size, and whether the game keeps a history log.
//! It is plain data (`serde`), so scenarios can be loaded from JSON.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Table setup for a new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (1 for goldfishing).
    pub player_count: usize,

    /// Life each player starts with.
    pub starting_life: i64,

    /// Cards drawn into the opening hand when a deck is dealt.
    pub opening_hand_size: usize,

    /// The starting player skips the draw step of their first turn.
    pub skip_first_draw: bool,

    /// Append an `ActionRecord` to the state for every action taken.
    pub track_history: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 1,
            starting_life: 20,
            opening_hand_size: 7,
            skip_first_draw: true,
            track_history: false,
        }
    }
}

impl GameConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Enable or disable the history log.
    #[must_use]
    pub fn with_history(mut self, track: bool) -> Self {
        self.track_history = track;
        self
    }

    /// Check the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(EngineError::InvalidConfig(format!(
                "player_count must be in 1..=255, got {}",
                self.player_count
            )));
        }
        if self.starting_life <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "starting_life must be positive, got {}",
                self.starting_life
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 1);
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.opening_hand_size, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_players(2)
            .with_starting_life(30)
            .with_history(true);

        assert_eq!(config.player_count, 2);
        assert_eq!(config.starting_life, 30);
        assert!(config.track_history);
    }

    #[test]
    fn test_invalid_config() {
        let config = GameConfig::default().with_players(0);
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"starting_life": 10}"#).unwrap();
        assert_eq!(config.starting_life, 10);
        assert_eq!(config.player_count, 1);
    }
}
