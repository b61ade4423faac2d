use crate::{Contradiction, Position};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Board must have at least one row and one column and fit the coordinate range")]
    InvalidDimensions,
    #[error("Too many mines ({mines}) for board size {height}x{width}")]
    TooManyMines { height: u32, width: u32, mines: u32 },
    #[error("Cannot make a move in current game state")]
    InvalidGameState,
    #[error("Observed count {count} at {cell} contradicts current knowledge")]
    InconsistentObservation { cell: Position, count: u8 },
    #[error(transparent)]
    Contradiction(#[from] Contradiction),
}
