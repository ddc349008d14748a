use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, owned exclusively by its session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
}

impl Board {
    /// Allocates a fully covered `rows × cols` grid without mines.
    pub fn create(config: GameConfig) -> Self {
        let cells = Array2::from_shape_fn(config.size.to_nd_index(), |(row, col)| {
            Cell::new(row as Coord, col as Coord)
        });
        Self {
            cells,
            mine_count: 0,
            mines_placed: false,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    /// Mines actually on the board, zero until placement.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells().filter(|cell| cell.is_mine).map(Cell::coords)
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Scans the neighbors of `coords` and counts the mines among them.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos].is_mine).count() as u8
    }

    /// Places `mine_count` mines uniformly at random, never on `exclude`.
    ///
    /// Draws a random cell and retries on the excluded cell or on an existing mine until
    /// every mine is placed. Requiring `mine_count < rows * cols` keeps at least one cell
    /// free, so the loop terminates; the expected number of draws per mine is
    /// `total / (total - placed - 1)`, which stays small for the preset densities.
    pub fn place_mines<R: Rng>(
        &mut self,
        exclude: Coord2,
        mine_count: CellCount,
        rng: &mut R,
    ) -> Result<()> {
        let exclude = self.validate_coords(exclude)?;
        self.check_unplaced()?;
        if mine_count >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }

        let (rows, cols) = self.size();
        let mut placed = 0;
        let mut draws = 0u32;
        while placed < mine_count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;
            if coords == exclude || self[coords].is_mine {
                continue;
            }
            self.cell_mut(coords).is_mine = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines in {} draws, excluding {:?}",
            mine_count,
            draws,
            exclude
        );
        self.finish_placement(mine_count);
        Ok(())
    }

    /// Places mines on exactly the given cells. Duplicate coordinates count once.
    pub fn place_mines_at(&mut self, mine_coords: &[Coord2]) -> Result<()> {
        self.check_unplaced()?;

        let mut mask: Array2<bool> = Array2::default(self.cells.dim());
        for &coords in mine_coords {
            mask[self.validate_coords(coords)?.to_nd_index()] = true;
        }
        let mine_count = mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if mine_count >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }

        for (cell, &is_mine) in self.cells.iter_mut().zip(mask.iter()) {
            cell.is_mine = is_mine;
        }
        log::debug!("Placed {} mines from a fixed layout", mine_count);
        self.finish_placement(mine_count);
        Ok(())
    }

    fn check_unplaced(&self) -> Result<()> {
        if self.mines_placed {
            Err(GameError::MinesAlreadyPlaced)
        } else {
            Ok(())
        }
    }

    fn finish_placement(&mut self, mine_count: CellCount) {
        self.mine_count = mine_count;
        self.mines_placed = true;
        self.compute_adjacency();
    }

    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !self[coords].is_mine {
                    let count = self.count_adjacent_mines(coords);
                    self.cell_mut(coords).adjacent_mines = count;
                }
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
