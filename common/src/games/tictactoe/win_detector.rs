use super::board::Board;
use super::types::{GameStatus, Mark, WinningLine};

/// Rows, then columns, then diagonals. Scan order is fixed.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for cells in WIN_LINES {
        let [a, b, c] = cells;
        if let Some(mark) = board.get(a)
            && board.get(b) == Some(mark)
            && board.get(c) == Some(mark)
        {
            return Some(WinningLine::new(mark, cells));
        }
    }
    None
}

pub fn is_tie(board: &Board) -> bool {
    board.is_full() && check_win(board).is_none()
}

pub fn is_terminal(board: &Board) -> bool {
    check_win(board).is_some() || is_tie(board)
}

pub fn game_status(board: &Board) -> GameStatus {
    match check_win(board) {
        Some(mark) => GameStatus::Won(mark),
        None if board.is_full() => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}

pub fn status_description(board: &Board) -> String {
    match game_status(board) {
        GameStatus::Won(mark) => format!("Winner: {}", mark),
        GameStatus::Draw => "Tie".to_string(),
        GameStatus::InProgress => {
            format!("Available moves: {}", board.available_moves().len())
        }
    }
}
