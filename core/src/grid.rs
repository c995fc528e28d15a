use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dense `width × height` board of cells, indexed `[x, y]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    config: GameConfig,
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds an empty board, failing with [`GameError::InvalidDimensions`] on bad parameters.
    pub fn create(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        GameConfig::new((width, height), mine_count).map(Self::new)
    }

    pub fn new(config: GameConfig) -> Self {
        let cells = Array2::from_shape_fn(config.size.to_nd_index(), |(x, y)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self { config, cells }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cell_count()
    }

    pub fn is_in_bounds(&self, (x, y): Coord2) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// Copy of the cell at `coords`, panics when out of bounds.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    /// All cells in memory order, column by column.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Number of cells the 3×3 block around `center` covers once clamped to the board.
    pub fn safe_zone_size(&self, center: Coord2) -> CellCount {
        1 + self.iter_neighbors(center).count() as CellCount
    }

    /// Places the configured number of mines uniformly at random, keeping the 3×3 block around `safe_center` clear.
    ///
    /// Draws coordinates and retries on collisions or safe-zone hits. When the board is too crowded for the full
    /// safe zone, only `safe_center` itself is kept clear, which always leaves room since `mines < total_cells`.
    pub fn plant_mines<R: Rng>(&mut self, safe_center: Coord2, rng: &mut R) {
        let mines = self.mine_count();
        let full_zone = mines <= self.total_cells() - self.safe_zone_size(safe_center);
        if !full_zone {
            log::warn!(
                "Cannot keep neighbors of {:?} clear with {} mines, fallback to clearing the cell only",
                safe_center,
                mines
            );
        }

        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
        }

        let (width, height) = self.size();
        let mut planted = 0;
        while planted < mines {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            let in_safe_zone = if full_zone {
                is_within_one(coords, safe_center)
            } else {
                coords == safe_center
            };

            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.is_mine || in_safe_zone {
                continue;
            }
            cell.is_mine = true;
            planted += 1;
        }
        log::debug!("Planted {} mines, safe center {:?}", planted, safe_center);
    }

    /// Marks a single cell as a mine, the caller keeps the total consistent with the config.
    pub fn place_mine(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()].is_mine = true;
        Ok(())
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as u8
    }

    pub fn compute_adjacency(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if self[coords].is_mine {
                    continue;
                }
                let count = self.count_adjacent_mines(coords);
                self.cells[coords.to_nd_index()].adjacent_mines = count;
            }
        }
    }

    /// Reveals one covered cell without cascading, returning its new state.
    pub fn reveal(&mut self, coords: Coord2) -> Option<Cell> {
        let cell = self.cells.get_mut(coords.to_nd_index())?;
        if !cell.is_covered() {
            return None;
        }
        cell.is_revealed = true;
        Some(*cell)
    }

    /// Reveals `start` and cascades through connected zero cells and their numbered border.
    ///
    /// Mines, flagged and revealed cells stop the cascade. Returns every coordinate that changed, in visit order.
    pub fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut opened = Vec::new();
        if !self.is_in_bounds(start) {
            return opened;
        }

        let mut to_visit = VecDeque::from([start]);
        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_covered() || cell.is_mine {
                continue;
            }

            cell.is_revealed = true;
            opened.push(coords);
            log::trace!(
                "Flood opened cell at {:?}, adjacent mines: {}",
                coords,
                cell.adjacent_mines
            );

            if cell.is_open_zero() {
                to_visit.extend(
                    self.iter_neighbors(coords)
                        .filter(|&pos| self[pos].is_covered()),
                );
            }
        }
        opened
    }

    /// Flips the flag of an unrevealed cell, returning its new state.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Option<Cell> {
        let cell = self.cells.get_mut(coords.to_nd_index())?;
        if cell.is_revealed {
            return None;
        }
        cell.is_flagged = !cell.is_flagged;
        Some(*cell)
    }

    /// Reveals every hidden mine for display, flags are left as they are.
    pub fn reveal_mines(&mut self) -> Vec<Coord2> {
        self.cells
            .iter_mut()
            .filter(|cell| cell.is_mine && !cell.is_revealed)
            .map(|cell| {
                cell.is_revealed = true;
                cell.coords
            })
            .collect()
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| !cell.is_mine)
            .all(|cell| cell.is_revealed)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
