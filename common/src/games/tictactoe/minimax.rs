use super::board::Board;
use super::types::Mark;
use super::win_detector::check_win;

pub const WIN_SCORE: i32 = 10;

pub fn evaluate_board(board: &Board, mark: Mark) -> i32 {
    match check_win(board) {
        Some(winner) if winner == mark => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

/// Full-depth minimax from `mark`'s point of view.
///
/// Wins score `10 - depth` and losses `-10 + depth`, so the search prefers
/// quick wins and drawn-out losses.
pub fn minimax(board: &Board, depth: i32, is_maximizing: bool, mark: Mark) -> i32 {
    let score = evaluate_board(board, mark);
    if score == WIN_SCORE {
        return score - depth;
    }
    if score == -WIN_SCORE {
        return score + depth;
    }

    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            let Ok(child) = board.apply_move(index, mark) else {
                continue;
            };
            max_eval = max_eval.max(minimax(&child, depth + 1, false, mark));
        }
        max_eval
    } else {
        let opponent_mark = mark.opponent();
        let mut min_eval = i32::MAX;
        for index in moves {
            let Ok(child) = board.apply_move(index, opponent_mark) else {
                continue;
            };
            min_eval = min_eval.min(minimax(&child, depth + 1, true, mark));
        }
        min_eval
    }
}

/// Best cell for `mark`, or `None` when the board has no empty cell.
///
/// Ties keep the lowest index.
pub fn find_best_move(board: &Board, mark: Mark) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in board.available_moves() {
        let Ok(child) = board.apply_move(index, mark) else {
            continue;
        };
        let score = minimax(&child, 0, false, mark);

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}
