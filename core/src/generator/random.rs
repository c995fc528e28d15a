use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement that keeps the first revealed cell and its neighbors free of mines.
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
}

impl MineGenerator for RandomMineGenerator {
    fn plant(&mut self, grid: &mut Grid, safe_center: Coord2) {
        grid.plant_mines(safe_center, &mut self.rng);
    }
}
