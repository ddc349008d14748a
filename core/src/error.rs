use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Mine layout puts a mine under the first revealed cell")]
    StartCellMined,
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
