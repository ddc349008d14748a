use super::*;

/// Places a predetermined layout, for replays and scripted boards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place(&mut self, board: &mut Board, config: GameConfig, exclude: Coord2) -> Result<()> {
        board.validate_coords(exclude)?;
        if self.mines.contains(&exclude) {
            return Err(GameError::StartCellMined);
        }
        board.place_mines_at(&self.mines)?;
        if board.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} mines but the game expects {}",
                board.mine_count(),
                config.mines
            );
        }
        Ok(())
    }
}
