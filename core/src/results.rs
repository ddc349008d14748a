use serde::{Deserialize, Serialize};

use crate::*;

/// Why an action left the game untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The session already ended in a win or a loss.
    GameOver,
    OutOfBounds,
    AlreadyRevealed,
    /// Flagged cells cannot be revealed.
    Flagged,
    /// The mine generator rejected the board, a configuration bug.
    PlacementFailed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum ActionStatus {
    Applied,
    Ignored(IgnoreReason),
}

impl ActionStatus {
    /// Whether this status could have caused an update to the game
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Terminal outcome of a reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    None,
    Win,
    Loss,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: Coord,
    pub col: Coord,
    pub view: CellView,
}

impl CellUpdate {
    pub const fn new((row, col): Coord2, view: CellView) -> Self {
        Self { row, col, view }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResult {
    pub status: ActionStatus,
    /// Cells newly revealed by this call, in reveal order.
    pub updates: Vec<CellUpdate>,
    /// Cells that were not revealed but whose view changed because the game was lost:
    /// the remaining mines and the misplaced flags.
    pub exposed: Vec<CellUpdate>,
    pub outcome: Outcome,
}

impl RevealResult {
    pub fn ignored(reason: IgnoreReason) -> Self {
        Self {
            status: ActionStatus::Ignored(reason),
            updates: Vec::new(),
            exposed: Vec::new(),
            outcome: Outcome::None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    pub status: ActionStatus,
    /// Flag state of the targeted cell after the call.
    pub flagged: bool,
    pub flag_count: CellCount,
}

/// Immutable render state of a whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub total_mines: CellCount,
    pub flag_count: CellCount,
    pub active: bool,
    pub outcome: Outcome,
    /// Row-major cell views, `cells[row][col]`.
    pub cells: Vec<Vec<CellView>>,
}

impl Snapshot {
    pub fn view_at(&self, (row, col): Coord2) -> Option<CellView> {
        self.cells
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(col)))
            .copied()
    }
}
