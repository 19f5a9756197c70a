use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not running, no moves are accepted")]
    NotRunning,
    #[error("Unknown speed preset")]
    UnknownSpeed,
    #[error("Snake body must be non-empty, in bounds and without repeated cells")]
    InvalidSnake,
    #[error("Food must be in bounds and off the snake")]
    InvalidFood,
}

pub type Result<T> = core::result::Result<T, GameError>;
