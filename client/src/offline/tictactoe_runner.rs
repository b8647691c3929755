use std::error::Error;
use std::io::{BufRead, Write};
use std::time::Duration;

use common::games::SessionRng;
use common::games::tictactoe::{
    Board, CELL_COUNT, Difficulty, GameMode, GameStatus, Player, Position, TicTacToeGameState,
    status_description,
};
use common::log;
use common::storage::{GameConfig, GameStore, SavedGame};

use crate::input::{Command, HELP_TEXT, parse_command};

pub struct RunnerSettings {
    pub difficulty: Difficulty,
    pub think_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundEnd {
    Finished(GameStatus),
    Restart,
    Save,
    Quit,
}

pub struct TicTacToeRunner<'a, R: BufRead, W: Write> {
    store: &'a GameStore,
    config: GameConfig,
    settings: RunnerSettings,
    rng: SessionRng,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> TicTacToeRunner<'a, R, W> {
    pub fn new(
        store: &'a GameStore,
        config: GameConfig,
        settings: RunnerSettings,
        rng: SessionRng,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            config,
            settings,
            rng,
            input,
            output,
        }
    }

    /// Plays rounds until the user saves, quits or declines a rematch.
    pub fn run(mut self, resume: Option<SavedGame>) -> Result<(), Box<dyn Error>> {
        log!(
            "Starting {:?} game: {} vs {} (difficulty {}, seed {})",
            self.config.mode,
            self.config.player1,
            self.config.player2,
            self.settings.difficulty,
            self.rng.seed()
        );
        self.store.save_config(&self.config)?;

        let mut resume = resume;
        loop {
            let mut state = match resume.take() {
                Some(saved) => {
                    writeln!(self.output, "Resuming saved game.")?;
                    TicTacToeGameState::resume(self.config.mode, saved.board, saved.current_mark)
                }
                None => self.start_round()?,
            };

            match self.play_round(&mut state)? {
                RoundEnd::Finished(status) => {
                    self.finish_round(&state, status)?;
                    if !self.ask_rematch()? {
                        return Ok(());
                    }
                }
                RoundEnd::Restart => {
                    writeln!(self.output, "Round restarted.")?;
                }
                RoundEnd::Save => {
                    self.save_round(&state)?;
                    writeln!(self.output, "Game saved.")?;
                    return Ok(());
                }
                RoundEnd::Quit => {
                    self.store.clear_all()?;
                    writeln!(self.output, "Game discarded.")?;
                    return Ok(());
                }
            }
        }
    }

    fn start_round(&mut self) -> Result<TicTacToeGameState, Box<dyn Error>> {
        let starter = self.config.advance_starter();
        self.store.save_config(&self.config)?;
        self.store.clear_state()?;
        writeln!(
            self.output,
            "New round. {} ({}) starts.",
            self.config.player_name(starter),
            starter.mark()
        )?;
        Ok(TicTacToeGameState::new(self.config.mode, starter))
    }

    fn play_round(&mut self, state: &mut TicTacToeGameState) -> Result<RoundEnd, Box<dyn Error>> {
        loop {
            self.render(state)?;

            if state.status.is_over() {
                return Ok(RoundEnd::Finished(state.status));
            }

            if state.is_computer_turn() {
                writeln!(
                    self.output,
                    "{} ({}) is thinking...",
                    self.config.player2,
                    GameMode::COMPUTER_MARK
                )?;
                self.output.flush()?;
                if !self.settings.think_delay.is_zero() {
                    std::thread::sleep(self.settings.think_delay);
                }
                match state.play_bot_move(self.settings.difficulty, &mut self.rng)? {
                    Some(index) => {
                        let pos = Position::from_index(index)?;
                        writeln!(
                            self.output,
                            "Computer plays {} (row {}, column {}).",
                            index + 1,
                            pos.row + 1,
                            pos.col + 1
                        )?;
                    }
                    None => return Ok(RoundEnd::Finished(state.status)),
                }
                self.save_round(state)?;
                continue;
            }

            let player = Player::from_mark(state.current_mark);
            write!(
                self.output,
                "{} ({})> ",
                self.config.player_name(player),
                state.current_mark
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(RoundEnd::Save);
            };

            match parse_command(&line) {
                Ok(Command::Place(index)) => match state.place_mark(index) {
                    Ok(_) => self.save_round(state)?,
                    Err(e) => writeln!(self.output, "{}", e)?,
                },
                Ok(Command::Restart) => return Ok(RoundEnd::Restart),
                Ok(Command::Save) => return Ok(RoundEnd::Save),
                Ok(Command::Quit) => return Ok(RoundEnd::Quit),
                Ok(Command::Help) => writeln!(self.output, "{}", HELP_TEXT)?,
                Err(e) => writeln!(self.output, "{} (type 'help' for commands)", e)?,
            }
        }
    }

    fn finish_round(
        &mut self,
        state: &TicTacToeGameState,
        status: GameStatus,
    ) -> Result<(), Box<dyn Error>> {
        match status {
            GameStatus::Won(mark) => {
                let winner = Player::from_mark(mark);
                if state.mode.is_computer(mark) {
                    writeln!(self.output, "You lost! {} wins.", self.config.player2)?;
                } else {
                    writeln!(
                        self.output,
                        "Victory! {} wins.",
                        self.config.player_name(winner)
                    )?;
                }
                if let Some(line) = state.winning_line() {
                    let cells: Vec<String> =
                        line.cells.iter().map(|c| (c + 1).to_string()).collect();
                    writeln!(self.output, "Winning line: {}", cells.join(", "))?;
                }
            }
            GameStatus::Draw => writeln!(self.output, "It's a tie!")?,
            GameStatus::InProgress => {}
        }
        log!("Round finished: {:?}", status);

        if let Some(updated) = self.store.update_stats(status)? {
            self.config.stats = updated.stats;
        }
        self.store.clear_state()?;
        self.render_score()?;
        Ok(())
    }

    fn ask_rematch(&mut self) -> Result<bool, Box<dyn Error>> {
        write!(self.output, "Next round? [y/n] ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes" | ""))
    }

    fn save_round(&mut self, state: &TicTacToeGameState) -> Result<(), Box<dyn Error>> {
        if state.status.is_over() {
            return Ok(());
        }
        self.store.save_state(&SavedGame {
            board: state.board,
            current_mark: state.current_mark,
        })?;
        log!("Saved round after {} moves", state.board.marked_count());
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, Box<dyn Error>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn render(&mut self, state: &TicTacToeGameState) -> Result<(), Box<dyn Error>> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", render_board(&state.board))?;
        writeln!(self.output, "{}", status_description(&state.board))?;
        writeln!(self.output)?;
        Ok(())
    }

    fn render_score(&mut self) -> Result<(), Box<dyn Error>> {
        let stats = self.config.stats;
        writeln!(
            self.output,
            "{}: {} wins | {}: {} wins | {} ties",
            self.config.player1_initials,
            stats.player1_wins,
            self.config.player2_initials,
            stats.player2_wins,
            stats.ties
        )?;
        Ok(())
    }
}

/// Like the board's own rendering, but empty cells show their number.
pub fn render_board(board: &Board) -> String {
    let cells: Vec<String> = (0..CELL_COUNT)
        .map(|index| match board.get(index) {
            Some(mark) => mark.to_string(),
            None => (index + 1).to_string(),
        })
        .collect();

    cells
        .chunks(3)
        .map(|row| format!(" {} ", row.join(" | ")))
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::Mark;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn get_temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_runner_{}", random_number));
        path
    }

    fn settings(difficulty: Difficulty) -> RunnerSettings {
        RunnerSettings {
            difficulty,
            think_delay: Duration::ZERO,
        }
    }

    fn run_script(
        store: &GameStore,
        config: GameConfig,
        difficulty: Difficulty,
        resume: Option<SavedGame>,
        script: &str,
    ) -> String {
        let mut output = Vec::new();
        TicTacToeRunner::new(
            store,
            config,
            settings(difficulty),
            SessionRng::new(1),
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
        )
        .run(resume)
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn render_board_numbers_empty_cells() {
        let board: Board = "X..|.O.|...".parse().unwrap();
        assert_eq!(
            render_board(&board),
            " X | 2 | 3 \n---+---+---\n 4 | O | 6 \n---+---+---\n 7 | 8 | 9 "
        );
    }

    #[test]
    fn pvp_win_updates_score() {
        let dir = get_temp_dir();
        let store = GameStore::in_dir(&dir);
        let out = run_script(
            &store,
            GameConfig::vs_player("Ana", "Bob"),
            Difficulty::Medium,
            None,
            "1\n4\n2\n5\n3\nn\n",
        );
        assert!(out.contains("Victory! Ana wins."), "{}", out);
        assert!(out.contains("Winning line: 1, 2, 3"), "{}", out);
        assert!(out.contains("Available moves: 9"), "{}", out);
        assert!(out.contains("Winner: X"), "{}", out);
        assert_eq!(store.stats().unwrap().player1_wins, 1);
        assert_eq!(store.load_state().unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn occupied_cell_is_reported() {
        let dir = get_temp_dir();
        let store = GameStore::in_dir(&dir);
        let out = run_script(
            &store,
            GameConfig::vs_player("Ana", "Bob"),
            Difficulty::Medium,
            None,
            "5\n5\nsave\n",
        );
        assert!(out.contains("invalid move"), "{}", out);
        let saved = store.load_state().unwrap().unwrap();
        assert_eq!(saved.board.get(4), Some(Mark::X));
        assert_eq!(saved.current_mark, Mark::O);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn quit_discards_everything() {
        let dir = get_temp_dir();
        let store = GameStore::in_dir(&dir);
        run_script(
            &store,
            GameConfig::vs_player("Ana", "Bob"),
            Difficulty::Medium,
            None,
            "1\nquit\n",
        );
        assert!(!store.has_game_in_progress());
        assert_eq!(store.load_state().unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn hard_computer_blocks_and_never_loses() {
        let dir = get_temp_dir();
        let store = GameStore::in_dir(&dir);
        // Human plays 1, 2 and then whatever is left; input runs out mid-round at worst.
        let out = run_script(
            &store,
            GameConfig::vs_cpu("Ana", Difficulty::Hard),
            Difficulty::Hard,
            None,
            "1\n2\n4\n6\n8\n9\nn\n",
        );
        assert!(out.contains("Computer plays"), "{}", out);
        assert!(!out.contains("Victory! Ana wins."), "{}", out);
        assert_eq!(store.stats().unwrap().player1_wins, 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resumes_saved_game_with_computer_to_move() {
        let dir = get_temp_dir();
        let store = GameStore::in_dir(&dir);
        let saved = SavedGame {
            board: "XX.|...|...".parse().unwrap(),
            current_mark: Mark::O,
        };
        let out = run_script(
            &store,
            GameConfig::vs_cpu("Ana", Difficulty::Medium),
            Difficulty::Medium,
            Some(saved),
            "save\n",
        );
        assert!(out.contains("Resuming saved game."), "{}", out);
        assert!(out.contains("Computer (O) is thinking..."), "{}", out);
        assert!(out.contains("Computer plays 3 (row 1, column 3)."), "{}", out);
        let saved = store.load_state().unwrap().unwrap();
        assert_eq!(saved.board.get(2), Some(Mark::O));
        assert_eq!(saved.current_mark, Mark::X);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
