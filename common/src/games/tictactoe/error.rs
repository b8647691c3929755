use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move: cell {index} is out of range or already marked")]
    InvalidMove { index: usize },
    #[error("invalid coordinates ({row}, {col}): row and column must be between 0 and 2")]
    InvalidCoordinates { row: usize, col: usize },
    #[error("invalid index {index}: must be between 0 and 8")]
    InvalidIndex { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
    #[error(transparent)]
    Move(#[from] MoveError),
}
