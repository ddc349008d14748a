use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement that only keeps the first revealed cell safe.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place(&mut self, board: &mut Board, config: GameConfig, exclude: Coord2) -> Result<()> {
        board.place_mines(exclude, config.mines, &mut self.rng)
    }
}
