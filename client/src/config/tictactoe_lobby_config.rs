use common::config::Validate;
use common::games::tictactoe::Difficulty;
use serde::{Deserialize, Serialize};

pub const MAX_THINK_DELAY_MS: u64 = 5_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct TicTacToeLobbyConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Pause before the computer answers.
    pub think_delay_ms: u64,
}

impl Validate for TicTacToeLobbyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.think_delay_ms > MAX_THINK_DELAY_MS {
            return Err(format!(
                "think_delay_ms must not exceed {}",
                MAX_THINK_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for TicTacToeLobbyConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            think_delay_ms: 500,
        }
    }
}
