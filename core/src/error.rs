use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid dimensions: {width}x{height} board with {mines} mines")]
    InvalidDimensions {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout has {actual} mines but {expected} were declared")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
