use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use results::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod results;
mod session;
mod types;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checks that the board is non-empty and leaves at least one safe cell, the
    /// precondition that keeps mine placement terminating.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}
