mod board;
mod bot_controller;
mod error;
mod game_state;
mod minimax;
mod types;
mod win_detector;

pub use board::{Board, get_available_moves};
pub use bot_controller::{BotInput, calculate_move};
pub use error::{GameError, MoveError};
pub use game_state::TicTacToeGameState;
pub use minimax::{evaluate_board, find_best_move, minimax};
pub use types::{
    BOARD_SIZE, CELL_COUNT, CENTER, CORNERS, Difficulty, GameMode, GameStatus, Mark, Player,
    Position, WinningLine,
};
pub use win_detector::{
    WIN_LINES, check_win, check_win_with_line, game_status, is_terminal, is_tie,
    status_description,
};
