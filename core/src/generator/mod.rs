use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where the mines of a board go once the first cell is known.
pub trait MineGenerator {
    /// Places the mines for `config` on `board`, never under `exclude`.
    fn place(&mut self, board: &mut Board, config: GameConfig, exclude: Coord2) -> Result<()>;
}
