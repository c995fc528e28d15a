use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::*;

/// Predetermined layout, ignores the first revealed cell.
///
/// Useful for puzzles and for reproducing a board in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    /// Checks that every mine is inside the board and that the distinct mines match `config.mines`.
    pub fn new(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        let (width, height) = config.size;
        if mines.iter().any(|&(x, y)| x >= width || y >= height) {
            return Err(GameError::InvalidCoords);
        }

        let mines: BTreeSet<Coord2> = mines.iter().copied().collect();
        let actual = mines.len() as CellCount;
        if actual != config.mines {
            return Err(GameError::MineCountMismatch {
                expected: config.mines,
                actual,
            });
        }

        Ok(Self {
            mines: mines.into_iter().collect(),
        })
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MineGenerator for FixedMineGenerator {
    fn plant(&mut self, grid: &mut Grid, _safe_center: Coord2) {
        for &coords in &self.mines {
            if let Err(err) = grid.place_mine(coords) {
                log::warn!("Skipping mine at {:?}: {}", coords, err);
            }
        }
        log::debug!("Placed fixed layout of {} mines", self.mines.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new((3, 3), 2).unwrap()
    }

    #[test]
    fn rejects_out_of_bounds_mine() {
        assert_eq!(
            FixedMineGenerator::new(config(), &[(0, 0), (3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn duplicates_count_once() {
        assert_eq!(
            FixedMineGenerator::new(config(), &[(1, 1), (1, 1)]),
            Err(GameError::MineCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn plants_exact_layout() {
        let mut generator = FixedMineGenerator::new(config(), &[(2, 2), (0, 1)]).unwrap();
        let mut grid = Grid::new(config());

        generator.plant(&mut grid, (0, 0));

        assert_eq!(generator.mines(), [(0, 1), (2, 2)]);
        assert!(grid[(0, 1)].is_mine && grid[(2, 2)].is_mine);
        assert_eq!(grid.iter_cells().filter(|cell| cell.is_mine).count(), 2);
    }
}
