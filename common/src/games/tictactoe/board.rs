use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::MoveError;
use super::types::{BOARD_SIZE, CELL_COUNT, Mark};

const EMPTY_SYMBOL: char = '.';

/// A 3x3 board stored row-major. Cells hold `None` until marked.
///
/// Boards are plain values: [`Board::apply_move`] returns a new board and
/// leaves `self` untouched, so search code can branch freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Returns `None` for empty cells and for indices past the board.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        self.is_empty_cell(index)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Empty cells in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        get_available_moves(self)
    }

    pub fn apply_move(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        if !self.is_valid_move(index) {
            return Err(MoveError::InvalidMove { index });
        }
        let mut next = *self;
        next.cells[index] = Some(mark);
        Ok(next)
    }

    /// Compact one-line form, e.g. `"XO.X....."`.
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or(EMPTY_SYMBOL, Mark::symbol))
            .collect()
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .map(|(index, _)| index)
        .collect()
}

/// Every assignment of empty, X or O to the nine cells.
#[cfg(test)]
pub(crate) fn all_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(CELL_COUNT as u32)).map(|mut code| {
        let mut cells = [None; CELL_COUNT];
        for cell in cells.iter_mut() {
            *cell = match code % 3 {
                0 => None,
                1 => Some(Mark::X),
                _ => Some(Mark::O),
            };
            code /= 3;
        }
        Board::from_cells(cells)
    })
}

impl FromStr for Board {
    type Err = String;

    /// Accepts the compact form; whitespace and `|` separators are ignored so
    /// boards can be written as `"XX. | O.. | ..."` in tests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();

        if symbols.len() != CELL_COUNT {
            return Err(format!(
                "Board must have {} cells, got {}",
                CELL_COUNT,
                symbols.len()
            ));
        }

        let mut cells = [None; CELL_COUNT];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol {
                EMPTY_SYMBOL | '_' | '-' => None,
                other => Some(
                    Mark::from_symbol(other)
                        .ok_or_else(|| format!("Unexpected board symbol: {}", other))?,
                ),
            };
        }
        Ok(Self { cells })
    }
}

impl TryFrom<String> for Board {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.to_compact()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = self.cells[row * BOARD_SIZE + col].map_or(' ', Mark::symbol);
                write!(f, " {} ", symbol)?;
                if col < BOARD_SIZE - 1 {
                    f.write_str("|")?;
                }
            }
            if row < BOARD_SIZE - 1 {
                f.write_str("\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}
