use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where the mines go once the first cell has been chosen.
pub trait MineGenerator {
    /// Fills `grid` with exactly its configured number of mines, `safe_center` being the first revealed cell.
    fn plant(&mut self, grid: &mut Grid, safe_center: Coord2);
}
