#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use observer::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod observer;
mod session;
mod timer;
mod types;

/// Validated board parameters: `size` is `(width, height)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Largest accepted width or height.
    pub const MAX_SIDE: Coord = 50;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Accepts `1..=MAX_SIDE` on both axes and `0 < mines < width * height`.
    pub fn new((width, height): Coord2, mines: CellCount) -> Result<Self> {
        let side_ok = |side: Coord| (1..=Self::MAX_SIDE).contains(&side);
        if !side_ok(width) || !side_ok(height) || mines == 0 || mines >= mult(width, height) {
            return Err(GameError::InvalidDimensions {
                width,
                height,
                mines,
            });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            Exploded => true,
            Won => true,
        }
    }
}
