use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::minimax::find_best_move;
use super::types::{CENTER, CORNERS, Difficulty, Mark};
use super::win_detector::check_win;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, current_mark: Mark) -> Self {
        Self { board, current_mark }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board,
            current_mark: state.current_mark,
        }
    }
}

/// Picks a cell for `input.current_mark`, or `None` when the board is full.
pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    let available_moves = input.board.available_moves();
    if available_moves.is_empty() {
        return None;
    }

    let chosen = match difficulty {
        Difficulty::Easy => calculate_random_move(&available_moves, rng),
        Difficulty::Medium => calculate_heuristic_move(input, &available_moves, rng),
        Difficulty::Hard => find_best_move(&input.board, input.current_mark),
    };

    if let Some(index) = chosen {
        log!(
            "Bot ({}) plays {} at cell {}",
            difficulty,
            input.current_mark,
            index
        );
    }
    chosen
}

fn calculate_random_move(available_moves: &[usize], rng: &mut SessionRng) -> Option<usize> {
    rng.choose(available_moves)
}

/// Win, block, center, a free corner, then anything.
fn calculate_heuristic_move(
    input: &BotInput,
    available_moves: &[usize],
    rng: &mut SessionRng,
) -> Option<usize> {
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent();

    if let Some(index) = find_winning_move(&input.board, bot_mark, available_moves) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(&input.board, opponent_mark, available_moves) {
        return Some(index);
    }

    if input.board.is_empty_cell(CENTER) {
        return Some(CENTER);
    }

    let free_corners: Vec<usize> = CORNERS
        .into_iter()
        .filter(|&corner| input.board.is_empty_cell(corner))
        .collect();
    if let Some(corner) = rng.choose(&free_corners) {
        return Some(corner);
    }

    calculate_random_move(available_moves, rng)
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves.iter().copied().find(|&index| {
        board
            .apply_move(index, mark)
            .is_ok_and(|child| check_win(&child) == Some(mark))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::all_boards;

    fn input(s: &str, mark: Mark) -> BotInput {
        BotInput::new(s.parse().unwrap(), mark)
    }

    #[test]
    fn full_board_returns_none_for_every_tier() {
        let full = input("XOX|XOO|OXX", Mark::X);
        let mut rng = SessionRng::new(1);
        for difficulty in Difficulty::ALL {
            assert_eq!(calculate_move(difficulty, &full, &mut rng), None);
        }
    }

    #[test]
    fn easy_picks_an_available_cell() {
        let b = input("XOX|.O.|OX.", Mark::X);
        let mut rng = SessionRng::new(3);
        for _ in 0..50 {
            let index = calculate_move(Difficulty::Easy, &b, &mut rng).unwrap();
            assert!([3, 5, 8].contains(&index));
        }
    }

    #[test]
    fn easy_is_reproducible_with_same_seed() {
        let b = input(".........", Mark::X);
        let picks = |seed| {
            let mut rng = SessionRng::new(seed);
            (0..10)
                .map(|_| calculate_move(Difficulty::Easy, &b, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(11), picks(11));
    }

    #[test]
    fn medium_and_hard_take_the_win() {
        let b = input("OO.|XX.|...", Mark::X);
        let mut rng = SessionRng::new(0);
        assert_eq!(calculate_move(Difficulty::Medium, &b, &mut rng), Some(5));
        assert_eq!(calculate_move(Difficulty::Hard, &b, &mut rng), Some(5));
    }

    #[test]
    fn medium_and_hard_block() {
        let b = input("XX.|O..|...", Mark::O);
        let mut rng = SessionRng::new(0);
        assert_eq!(calculate_move(Difficulty::Medium, &b, &mut rng), Some(2));
        assert_eq!(calculate_move(Difficulty::Hard, &b, &mut rng), Some(2));
    }

    #[test]
    fn medium_prefers_win_over_block() {
        // O can win at 5 and must not block X at 2.
        let b = input("XX.|OO.|X..", Mark::O);
        let mut rng = SessionRng::new(0);
        assert_eq!(calculate_move(Difficulty::Medium, &b, &mut rng), Some(5));
    }

    #[test]
    fn medium_opens_in_the_center() {
        let b = input(".........", Mark::X);
        let mut rng = SessionRng::new(9);
        assert_eq!(calculate_move(Difficulty::Medium, &b, &mut rng), Some(CENTER));
    }

    #[test]
    fn medium_takes_a_free_corner_when_center_is_taken() {
        let b = input("X...O....", Mark::X);
        for seed in 0..20 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(Difficulty::Medium, &b, &mut rng).unwrap();
            assert!([2, 6, 8].contains(&index), "got {}", index);
        }
    }

    #[test]
    fn medium_falls_back_to_any_cell_without_corners() {
        let b = input("X.O|OOX|X.O", Mark::X);
        let mut rng = SessionRng::new(4);
        let index = calculate_move(Difficulty::Medium, &b, &mut rng).unwrap();
        assert!([1, 7].contains(&index));
    }

    #[test]
    fn hard_matches_search() {
        let b = input("X...O...X", Mark::O);
        let mut rng = SessionRng::new(0);
        assert_eq!(
            calculate_move(Difficulty::Hard, &b, &mut rng),
            find_best_move(&b.board, Mark::O)
        );
    }

    #[test]
    fn every_tier_picks_a_free_cell_on_reachable_boards() {
        let mut rng = SessionRng::new(11);
        for b in all_boards() {
            let x_count = b.cells().iter().filter(|c| **c == Some(Mark::X)).count();
            let o_count = b.marked_count() - x_count;
            let mark = match x_count.checked_sub(o_count) {
                Some(0) => Mark::X,
                Some(1) => Mark::O,
                _ => continue,
            };
            let input = BotInput::new(b, mark);
            for difficulty in Difficulty::ALL {
                match calculate_move(difficulty, &input, &mut rng) {
                    Some(index) => assert!(
                        b.is_empty_cell(index),
                        "{} chose taken cell {} on {}",
                        difficulty,
                        index,
                        b.to_compact()
                    ),
                    None => assert!(b.is_full(), "{} gave up on {}", difficulty, b.to_compact()),
                }
            }
        }
    }
}
