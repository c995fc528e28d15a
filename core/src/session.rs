use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state, moves are accepted
    #[default]
    Playing,
    /// Every safe cell was revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to the end, replaced wholesale for a new game.
///
/// Mines are planted lazily by `G` on the first reveal, so the first revealed cell is never a mine when the
/// generator honors the safe zone.
#[derive(Clone, Debug)]
pub struct Session<G = RandomMineGenerator> {
    grid: Grid,
    generator: G,
    state: GameState,
    mines_remaining: i32,
    cells_revealed: CellCount,
    first_click_taken: bool,
    timer: GameTimer,
}

impl Session<RandomMineGenerator> {
    /// Validates the parameters and starts a randomly generated game.
    pub fn new_game(
        width: Coord,
        height: Coord,
        mine_count: CellCount,
        seed: u64,
    ) -> Result<Self> {
        let config = GameConfig::new((width, height), mine_count)?;
        Ok(Self::new(config, RandomMineGenerator::new(seed)))
    }
}

impl Session<FixedMineGenerator> {
    /// Starts a game whose mines are exactly `mines`, wherever the first click lands.
    pub fn with_mine_layout(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        let generator = FixedMineGenerator::new(config, mines)?;
        Ok(Self::new(config, generator))
    }
}

impl<G: MineGenerator> Session<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        log::debug!(
            "new game {}x{} with {} mines",
            config.width(),
            config.height(),
            config.mines
        );
        Self {
            grid: Grid::new(config),
            generator,
            state: Default::default(),
            mines_remaining: i32::from(config.mines),
            cells_revealed: 0,
            first_click_taken: false,
            timer: GameTimer::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    /// Total mines minus placed flags, negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    /// Safe cells revealed so far.
    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    pub fn first_click_taken(&self) -> bool {
        self.first_click_taken
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Reveals a covered cell, cascading through zero cells.
    ///
    /// Terminal games, out-of-bounds coordinates, revealed and flagged cells are all no-ops.
    pub fn reveal_cell(
        &mut self,
        coords: Coord2,
        observer: &mut impl SessionObserver,
    ) -> RevealOutcome {
        use RevealOutcome::*;

        if self.state.is_final() {
            return NoChange;
        }
        if !self.grid.get(coords).is_some_and(|cell| cell.is_covered()) {
            return NoChange;
        }

        if !self.first_click_taken {
            self.take_first_click(coords);
        }

        if self.grid[coords].is_mine {
            if let Some(cell) = self.grid.reveal(coords) {
                observer.on_cell_changed(&cell);
            }
            log::debug!("mine hit at {:?}", coords);
            self.end_game(false, observer);
            return Exploded;
        }

        let opened = self.grid.flood_reveal(coords);
        self.cells_revealed += opened.len() as CellCount;
        log::debug!("revealed {} cells from {:?}", opened.len(), coords);
        for &pos in &opened {
            observer.on_cell_changed(&self.grid[pos]);
        }

        if self.cells_revealed == self.grid.safe_cell_count() {
            debug_assert!(self.grid.is_cleared());
            self.end_game(true, observer);
            Won
        } else {
            Safe
        }
    }

    /// Flags or unflags a hidden cell, only once mines exist.
    pub fn toggle_flag(
        &mut self,
        coords: Coord2,
        observer: &mut impl SessionObserver,
    ) -> FlagOutcome {
        if self.state.is_final() || !self.first_click_taken {
            return FlagOutcome::NoChange;
        }
        let Some(cell) = self.grid.toggle_flag(coords) else {
            return FlagOutcome::NoChange;
        };

        self.mines_remaining += if cell.is_flagged { -1 } else { 1 };
        log::trace!(
            "flag at {:?}: {}, mines remaining: {}",
            coords,
            cell.is_flagged,
            self.mines_remaining
        );
        observer.on_counters_changed(self.mines_remaining);
        observer.on_cell_changed(&cell);
        FlagOutcome::Changed
    }

    /// Advances the clock by one second, meant to be called once per second by the view.
    pub fn tick(&mut self, observer: &mut impl SessionObserver) -> bool {
        if self.state.is_final() {
            return false;
        }
        match self.timer.tick() {
            Some(elapsed_secs) => {
                observer.on_timer_tick(elapsed_secs);
                true
            }
            None => false,
        }
    }

    fn take_first_click(&mut self, coords: Coord2) {
        self.generator.plant(&mut self.grid, coords);
        self.grid.compute_adjacency();
        self.timer.start();
        self.first_click_taken = true;
    }

    fn end_game(&mut self, won: bool, observer: &mut impl SessionObserver) {
        self.state = if won { GameState::Won } else { GameState::Lost };
        self.timer.stop();
        for pos in self.grid.reveal_mines() {
            observer.on_cell_changed(&self.grid[pos]);
        }
        log::debug!(
            "game ended, won: {}, elapsed: {}s",
            won,
            self.timer.elapsed_secs()
        );
        observer.on_game_ended(won);
    }
}
