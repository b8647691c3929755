use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::TicTacToeLobbyConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";
const DEFAULT_DATA_DIR: &str = "tictactoe_data";

fn exe_dir() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    exe_path.parent().map(PathBuf::from)
}

fn get_config_path() -> PathBuf {
    match exe_dir() {
        Some(dir) => dir.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager() -> ClientConfigManager {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub tictactoe: TicTacToeLobbyConfig,
    /// Saved games and score. Relative paths resolve next to the executable.
    pub data_dir: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    pub fn resolved_data_dir(&self) -> PathBuf {
        let data_dir = PathBuf::from(&self.data_dir);
        if data_dir.is_absolute() {
            return data_dir;
        }
        match exe_dir() {
            Some(dir) => dir.join(data_dir),
            None => data_dir,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.data_dir.trim().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }
        if let Some(log_file) = &self.log_file
            && log_file.trim().is_empty()
        {
            return Err("log_file must not be empty if provided".to_string());
        }
        self.tictactoe.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tictactoe: TicTacToeLobbyConfig::default(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            log_file: None,
        }
    }
}
