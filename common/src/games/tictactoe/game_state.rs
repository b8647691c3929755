use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::error::GameError;
use super::types::{Difficulty, GameMode, GameStatus, Mark, Player, WinningLine};
use super::win_detector::{check_win_with_line, game_status};

/// One round: the board, whose turn it is and how it ended.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode, starter: Player) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_mark: starter.mark(),
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    /// Rebuilds a round from a saved board; the status is recomputed.
    pub fn resume(mode: GameMode, board: Board, current_mark: Mark) -> Self {
        Self {
            board,
            mode,
            current_mark,
            status: game_status(&board),
            last_move: None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.mode.is_computer(self.current_mark)
    }

    /// Human move. Rejected while the computer is to move.
    pub fn place_mark(&mut self, index: usize) -> Result<GameStatus, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.mode.is_computer(self.current_mark) {
            return Err(GameError::NotYourTurn);
        }
        self.apply(index)
    }

    /// Lets the bot move for the side to play. `Ok(None)` means it found no cell.
    pub fn play_bot_move(
        &mut self,
        difficulty: Difficulty,
        rng: &mut SessionRng,
    ) -> Result<Option<usize>, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let Some(index) = calculate_move(difficulty, &BotInput::from_game_state(self), rng) else {
            return Ok(None);
        };
        self.apply(index)?;
        Ok(Some(index))
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    fn apply(&mut self, index: usize) -> Result<GameStatus, GameError> {
        self.board = self.board.apply_move(index, self.current_mark)?;
        self.last_move = Some(index);
        self.status = game_status(&self.board);

        if self.status == GameStatus::InProgress {
            self.current_mark = self.current_mark.opponent();
        }

        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::MoveError;

    #[test]
    fn turns_alternate_until_win() {
        let mut state = TicTacToeGameState::new(GameMode::Pvp, Player::Player1);
        for index in [0, 3, 1, 4] {
            assert_eq!(state.place_mark(index), Ok(GameStatus::InProgress));
        }
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.place_mark(2), Ok(GameStatus::Won(Mark::X)));
        assert_eq!(state.winning_line().unwrap().cells, [0, 1, 2]);
        assert_eq!(state.last_move, Some(2));
        assert_eq!(state.place_mark(5), Err(GameError::GameOver));
    }

    #[test]
    fn occupied_cell_is_rejected_without_changing_turn() {
        let mut state = TicTacToeGameState::new(GameMode::Pvp, Player::Player2);
        assert_eq!(state.current_mark, Mark::O);
        state.place_mark(4).unwrap();
        assert_eq!(
            state.place_mark(4),
            Err(GameError::Move(MoveError::InvalidMove { index: 4 }))
        );
        assert_eq!(state.current_mark, Mark::X);
    }

    #[test]
    fn human_cannot_move_for_the_computer() {
        let mut state = TicTacToeGameState::new(GameMode::Cpu, Player::Player2);
        assert!(state.is_computer_turn());
        assert_eq!(state.place_mark(0), Err(GameError::NotYourTurn));

        let mut rng = SessionRng::new(1);
        let index = state.play_bot_move(Difficulty::Medium, &mut rng).unwrap();
        assert_eq!(index, Some(4));
        assert!(!state.is_computer_turn());
        assert_eq!(state.current_mark, Mark::X);
    }

    #[test]
    fn hard_bot_never_loses_against_easy_bot() {
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            let mut state = TicTacToeGameState::new(GameMode::Pvp, Player::Player1);
            while !state.status.is_over() {
                let difficulty = if state.current_mark == Mark::O {
                    Difficulty::Hard
                } else {
                    Difficulty::Easy
                };
                state.play_bot_move(difficulty, &mut rng).unwrap();
            }
            assert_ne!(state.status, GameStatus::Won(Mark::X), "seed {}", seed);
        }
    }

    #[test]
    fn resume_recomputes_status() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        let state = TicTacToeGameState::resume(GameMode::Cpu, board, Mark::O);
        assert_eq!(state.status, GameStatus::Won(Mark::X));
        assert!(!state.is_computer_turn());
    }
}
