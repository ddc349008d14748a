use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position and everything the engine knows about it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the up-to-8 neighbors, only meaningful when `is_mine` is false.
    pub adjacent_mines: u8,
    pub row: Coord,
    pub col: Coord,
}

impl Cell {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
            row,
            col,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Neither revealed nor flagged.
    pub const fn is_covered(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// Display value of a cell as handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "lowercase")]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed with no adjacent mines.
    Blank,
    /// Revealed with `1..=8` adjacent mines.
    Number(u8),
    /// Mine shown after the game was lost.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// Flag placed on a safe cell, shown after the game was lost.
    Misflagged,
}

impl CellView {
    /// View of a revealed cell.
    pub const fn revealed(cell: &Cell) -> Self {
        match (cell.is_mine, cell.adjacent_mines) {
            (true, _) => Self::Exploded,
            (false, 0) => Self::Blank,
            (false, count) => Self::Number(count),
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
