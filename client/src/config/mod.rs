mod config;
mod tictactoe_lobby_config;

pub use config::{Config, get_config_manager};
pub use tictactoe_lobby_config::{MAX_THINK_DELAY_MS, TicTacToeLobbyConfig};
