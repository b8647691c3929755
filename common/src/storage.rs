//! Saved game setup, running score and the in-progress round.
//!
//! The engine never touches these files; the front end loads and saves
//! them around each round.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigError, ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use crate::games::tictactoe::{Board, Difficulty, GameMode, GameStatus, Mark, Player};
use crate::log;

pub const GAME_CONFIG_FILE_NAME: &str = "tictactoe_game_config.yaml";
pub const GAME_STATE_FILE_NAME: &str = "tictactoe_game_state.yaml";
pub const COMPUTER_NAME: &str = "Computer";
pub const COMPUTER_INITIALS: &str = "CPU";

const MAX_NAME_LEN: usize = 32;

/// First letters of the first two words, uppercased.
pub fn player_initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub ties: u32,
}

impl GameStats {
    /// X wins count for player one, O wins for player two.
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Mark::X) => self.player1_wins += 1,
            GameStatus::Won(Mark::O) => self.player2_wins += 1,
            GameStatus::Draw => self.ties += 1,
            GameStatus::InProgress => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub player1: String,
    pub player2: String,
    pub player1_initials: String,
    pub player2_initials: String,
    #[serde(flatten)]
    pub stats: GameStats,
    pub last_starter: Option<Player>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub fn vs_cpu(player_name: &str, difficulty: Difficulty) -> Self {
        let player1 = Self::name_or(player_name, "Player");
        Self {
            mode: GameMode::Cpu,
            player1_initials: player_initials(&player1),
            player1,
            player2: COMPUTER_NAME.to_string(),
            player2_initials: COMPUTER_INITIALS.to_string(),
            stats: GameStats::default(),
            last_starter: None,
            difficulty,
        }
    }

    pub fn vs_player(player1_name: &str, player2_name: &str) -> Self {
        let player1 = Self::name_or(player1_name, "Player 1");
        let player2 = Self::name_or(player2_name, "Player 2");
        Self {
            mode: GameMode::Pvp,
            player1_initials: player_initials(&player1),
            player2_initials: player_initials(&player2),
            player1,
            player2,
            stats: GameStats::default(),
            last_starter: None,
            difficulty: Difficulty::default(),
        }
    }

    fn name_or(name: &str, fallback: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }

    /// Picks who opens the next round and remembers it.
    pub fn advance_starter(&mut self) -> Player {
        let starter = Player::next_starter(self.last_starter);
        self.last_starter = Some(starter);
        starter
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        for name in [&self.player1, &self.player2] {
            if name.trim().is_empty() {
                return Err("Player names must not be empty".to_string());
            }
            if name.chars().count() > MAX_NAME_LEN {
                return Err(format!(
                    "Player names must be at most {} characters",
                    MAX_NAME_LEN
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Board,
    pub current_mark: Mark,
}

impl Validate for SavedGame {
    fn validate(&self) -> Result<(), String> {
        let x_count = self.board.cells().iter().filter(|c| **c == Some(Mark::X)).count();
        let o_count = self.board.cells().iter().filter(|c| **c == Some(Mark::O)).count();
        if x_count.abs_diff(o_count) > 1 {
            return Err(format!(
                "Saved board is not reachable: {} X marks and {} O marks",
                x_count, o_count
            ));
        }
        Ok(())
    }
}

type Manager<T> = ConfigManager<FileContentConfigProvider, T, YamlConfigSerializer>;

pub struct GameStore {
    config: Manager<GameConfig>,
    state: Manager<SavedGame>,
}

impl GameStore {
    pub fn new(config: Manager<GameConfig>, state: Manager<SavedGame>) -> Self {
        Self { config, state }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            ConfigManager::from_yaml_file(dir.join(GAME_CONFIG_FILE_NAME)),
            ConfigManager::from_yaml_file(dir.join(GAME_STATE_FILE_NAME)),
        )
    }

    pub fn save_config(&self, config: &GameConfig) -> Result<(), ConfigError> {
        self.config.set_config(config)
    }

    pub fn load_config(&self) -> Result<Option<GameConfig>, ConfigError> {
        self.config.load_config()
    }

    pub fn save_state(&self, state: &SavedGame) -> Result<(), ConfigError> {
        self.state.set_config(state)
    }

    pub fn load_state(&self) -> Result<Option<SavedGame>, ConfigError> {
        self.state.load_config()
    }

    /// Drops the round but keeps the players and their score.
    pub fn clear_state(&self) -> Result<(), ConfigError> {
        self.state.clear_config()
    }

    pub fn clear_all(&self) -> Result<(), ConfigError> {
        self.config.clear_config()?;
        self.state.clear_config()?;
        log!("Cleared saved game data");
        Ok(())
    }

    pub fn has_game_in_progress(&self) -> bool {
        self.config.has_config()
    }

    pub fn stats(&self) -> Result<GameStats, ConfigError> {
        Ok(self
            .load_config()?
            .map(|config| config.stats)
            .unwrap_or_default())
    }

    /// Records a finished round. Returns the updated config, or `None` when no
    /// game has been set up.
    pub fn update_stats(&self, status: GameStatus) -> Result<Option<GameConfig>, ConfigError> {
        let Some(mut config) = self.load_config()? else {
            return Ok(None);
        };
        config.stats.record(status);
        self.save_config(&config)?;
        log!(
            "Score {} {} - {} {} ({} ties)",
            config.player1_initials,
            config.stats.player1_wins,
            config.stats.player2_wins,
            config.player2_initials,
            config.stats.ties
        );
        Ok(Some(config))
    }
}
