use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One square of the board, addressed by its own coordinates.
///
/// The presentation layer keys whatever it renders by `coords`; a cell never holds a view handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines in the Moore neighborhood, only meaningful when `is_mine` is false.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mines: 0,
        }
    }

    /// Hidden and not flagged, so a reveal would act on it.
    pub const fn is_covered(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Revealed safe cell with no mine around it, the seed of a flood fill.
    pub const fn is_open_zero(self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mines == 0
    }
}
