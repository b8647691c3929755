use common::games::tictactoe::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Zero-based cell index.
    Place(usize),
    Restart,
    Save,
    Quit,
    Help,
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9        place a mark (cells numbered left to right, top to bottom)
  <row> <col> place a mark by row and column, both 1-3
  restart    start the round over
  save       save the game and quit
  quit       quit without saving
  help       show this message";

/// Parses one line of user input.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim().to_ascii_lowercase();
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        ["r" | "restart"] => Ok(Command::Restart),
        ["s" | "save"] => Ok(Command::Save),
        ["q" | "quit" | "exit"] => Ok(Command::Quit),
        ["h" | "help" | "?"] => Ok(Command::Help),
        [cell] => {
            let number: usize = cell
                .parse()
                .map_err(|_| format!("Unknown command: {}", cell))?;
            if !(1..=9).contains(&number) {
                return Err("Cell must be between 1 and 9".to_string());
            }
            Ok(Command::Place(number - 1))
        }
        [row, col] => {
            let row: usize = row.parse().map_err(|_| format!("Invalid row: {}", row))?;
            let col: usize = col.parse().map_err(|_| format!("Invalid column: {}", col))?;
            if row == 0 || col == 0 {
                return Err("Rows and columns are numbered 1 to 3".to_string());
            }
            let position = Position::new(row - 1, col - 1).map_err(|e| e.to_string())?;
            Ok(Command::Place(position.to_index()))
        }
        [] => Err("Empty input".to_string()),
        _ => Err(format!("Unknown command: {}", line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_numbers() {
        assert_eq!(parse_command("1"), Ok(Command::Place(0)));
        assert_eq!(parse_command(" 9 \n"), Ok(Command::Place(8)));
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
    }

    #[test]
    fn parses_row_and_column() {
        assert_eq!(parse_command("2 3"), Ok(Command::Place(5)));
        assert_eq!(parse_command("3 1"), Ok(Command::Place(6)));
        assert!(parse_command("4 1").is_err());
        assert!(parse_command("0 1").is_err());
        assert!(parse_command("a b").is_err());
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("Restart"), Ok(Command::Restart));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("save"), Ok(Command::Save));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert!(parse_command("").is_err());
        assert!(parse_command("place it somewhere").is_err());
    }
}
