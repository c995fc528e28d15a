use std::collections::BTreeSet;

use sweeper_core::*;

fn fixed_session(size: Coord2, mines: &[Coord2]) -> Session<FixedMineGenerator> {
    let config = GameConfig::new(size, mines.len() as CellCount).unwrap();
    Session::with_mine_layout(config, mines).unwrap()
}

fn revealed(session: &Session<impl MineGenerator>) -> BTreeSet<Coord2> {
    session
        .grid()
        .iter_cells()
        .filter(|cell| cell.is_revealed)
        .map(|cell| cell.coords)
        .collect()
}

/// Reference closure of a reveal: the connected zero region plus its numbered ring, computed without the grid's
/// own flood fill.
fn expected_closure(grid: &Grid, start: Coord2) -> BTreeSet<Coord2> {
    let mut closure = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(coords) = stack.pop() {
        if !closure.insert(coords) {
            continue;
        }
        if grid[coords].adjacent_mines == 0 {
            stack.extend(grid.iter_neighbors(coords).filter(|&pos| !grid[pos].is_mine));
        }
    }
    closure
}

#[test]
fn forced_corner_mine_wins_from_opposite_corner() {
    let mut session = fixed_session((3, 3), &[(2, 2)]);
    let mut events = Vec::new();

    let outcome = session.reveal_cell((0, 0), &mut events);

    assert_eq!(outcome, RevealOutcome::Won);
    assert_eq!(session.state(), GameState::Won);
    assert_eq!(session.cells_revealed(), 8);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, SessionEvent::CellChanged(cell) if !cell.is_mine))
            .count(),
        8
    );
    assert_eq!(events.last(), Some(&SessionEvent::GameEnded { won: true }));
}

#[test]
fn single_cell_board_without_mines_is_rejected() {
    assert!(matches!(
        Session::new_game(1, 1, 0, 0),
        Err(GameError::InvalidDimensions {
            width: 1,
            height: 1,
            mines: 0
        })
    ));
}

#[test]
fn random_layouts_keep_safe_zone_clear() {
    for seed in 0..32 {
        let mut session = Session::new_game(16, 16, 40, seed).unwrap();
        let start = ((seed * 5 % 16) as Coord, (seed * 3 % 16) as Coord);

        let outcome = session.reveal_cell(start, &mut ());

        assert_ne!(outcome, RevealOutcome::Exploded);
        let mines: Vec<_> = session.grid().iter_cells().filter(|cell| cell.is_mine).collect();
        assert_eq!(mines.len(), 40);
        assert!(mines.iter().all(|cell| !is_within_one(cell.coords, start)));
    }
}

#[test]
fn adjacency_is_exact_for_every_safe_cell() {
    let mut session = Session::new_game(20, 13, 60, 99).unwrap();
    session.reveal_cell((10, 6), &mut ());
    let grid = session.grid();

    for cell in grid.iter_cells().filter(|cell| !cell.is_mine) {
        let expected = grid
            .iter_neighbors(cell.coords)
            .filter(|&pos| grid[pos].is_mine)
            .count();
        assert_eq!(usize::from(cell.adjacent_mines), expected);
    }
}

#[test]
fn zero_reveal_opens_exactly_its_closure() {
    for seed in 0..16 {
        let mut session = Session::new_game(30, 16, 60, seed).unwrap();
        let start = (15, 8);

        session.reveal_cell(start, &mut ());

        if session.state() == GameState::Won {
            continue;
        }
        // the safe zone guarantees the first cell is a zero
        assert_eq!(session.cell_at(start).adjacent_mines, 0);
        assert_eq!(revealed(&session), expected_closure(session.grid(), start));
    }
}

#[test]
fn won_exactly_when_all_safe_cells_revealed() {
    let mut session = fixed_session((4, 4), &[(0, 0), (3, 3)]);
    let safe: Vec<Coord2> = (0..4)
        .flat_map(|x| (0..4).map(move |y| (x, y)))
        .filter(|&coords| coords != (0, 0) && coords != (3, 3))
        .collect();

    for coords in safe {
        session.reveal_cell(coords, &mut ());
        let all_safe_revealed = session.cells_revealed() == 16 - 2;
        assert_eq!(all_safe_revealed, session.state() == GameState::Won);
    }
    assert_eq!(session.state(), GameState::Won);
}

#[test]
fn revealing_a_mine_loses_and_shows_all_mines() {
    let mines = [(0, 0), (4, 0), (2, 4)];
    let mut session = fixed_session((5, 5), &mines);
    assert_eq!(session.reveal_cell((1, 0), &mut ()), RevealOutcome::Safe);

    let outcome = session.reveal_cell((4, 0), &mut ());

    assert_eq!(outcome, RevealOutcome::Exploded);
    assert_eq!(session.state(), GameState::Lost);
    assert!(mines.iter().all(|&coords| session.cell_at(coords).is_revealed));
}

#[test]
fn flag_round_trip_restores_counter() {
    let mut session = fixed_session((4, 1), &[(3, 0)]);
    session.reveal_cell((2, 0), &mut ());
    let before = session.mines_remaining();

    assert_eq!(session.toggle_flag((0, 0), &mut ()), FlagOutcome::Changed);
    assert_eq!(session.mines_remaining(), before - 1);
    assert_eq!(session.toggle_flag((0, 0), &mut ()), FlagOutcome::Changed);
    assert_eq!(session.mines_remaining(), before);
}

#[test]
fn flagging_revealed_cell_is_noop() {
    let mut session = fixed_session((4, 1), &[(3, 0)]);
    session.reveal_cell((2, 0), &mut ());
    let mut events = Vec::new();

    assert_eq!(session.toggle_flag((2, 0), &mut events), FlagOutcome::NoChange);
    assert!(events.is_empty());
    assert!(!session.cell_at((2, 0)).is_flagged);
}

#[test]
fn over_flagging_goes_negative() {
    let mut session = fixed_session((5, 1), &[(4, 0)]);
    session.reveal_cell((3, 0), &mut ());

    for x in [0, 1, 2, 4] {
        session.toggle_flag((x, 0), &mut ());
    }

    assert_eq!(session.mines_remaining(), -3);
}

#[test]
fn flagged_cell_is_not_revealed() {
    let mut session = fixed_session((5, 1), &[(4, 0)]);
    session.reveal_cell((3, 0), &mut ());
    session.toggle_flag((1, 0), &mut ());

    assert_eq!(session.reveal_cell((1, 0), &mut ()), RevealOutcome::NoChange);
    // cascade from the left edge stops at the flag
    session.reveal_cell((0, 0), &mut ());
    assert!(!session.cell_at((2, 0)).is_revealed);
}

#[test]
fn out_of_bounds_actions_are_noops() {
    let mut session = fixed_session((3, 3), &[(2, 2)]);
    let mut events = Vec::new();

    assert_eq!(session.reveal_cell((3, 0), &mut events), RevealOutcome::NoChange);
    assert!(!session.first_click_taken());
    session.reveal_cell((1, 1), &mut events);
    events.clear();

    assert_eq!(session.toggle_flag((0, 9), &mut events), FlagOutcome::NoChange);
    assert!(events.is_empty());
}

#[test]
fn finished_game_ignores_every_action() {
    let mut session = fixed_session((3, 3), &[(1, 1)]);
    session.reveal_cell((0, 0), &mut ());
    session.reveal_cell((1, 1), &mut ());
    assert_eq!(session.state(), GameState::Lost);

    let snapshot = session.grid().clone();
    let counters = (session.mines_remaining(), session.cells_revealed(), session.elapsed_secs());
    let mut events = Vec::new();

    assert_eq!(session.reveal_cell((2, 2), &mut events), RevealOutcome::NoChange);
    assert_eq!(session.toggle_flag((2, 0), &mut events), FlagOutcome::NoChange);
    assert!(!session.tick(&mut events));

    assert!(events.is_empty());
    assert_eq!(session.grid(), &snapshot);
    assert_eq!(
        (session.mines_remaining(), session.cells_revealed(), session.elapsed_secs()),
        counters
    );
}

#[test]
fn won_game_ignores_every_action() {
    let mut session = fixed_session((3, 3), &[(2, 2)]);
    assert_eq!(session.reveal_cell((0, 0), &mut ()), RevealOutcome::Won);
    assert!(session.cell_at((2, 2)).is_revealed);

    let snapshot = session.grid().clone();
    let counters = (session.mines_remaining(), session.cells_revealed(), session.elapsed_secs());
    let mut events = Vec::new();

    assert_eq!(session.reveal_cell((2, 2), &mut events), RevealOutcome::NoChange);
    assert_eq!(session.toggle_flag((2, 2), &mut events), FlagOutcome::NoChange);
    assert!(!session.tick(&mut events));

    assert!(events.is_empty());
    assert_eq!(session.state(), GameState::Won);
    assert_eq!(session.grid(), &snapshot);
    assert_eq!(
        (session.mines_remaining(), session.cells_revealed(), session.elapsed_secs()),
        counters
    );
}

#[test]
fn full_board_flood_does_not_overflow_stack() {
    let mut session = fixed_session((50, 50), &[(49, 49)]);

    let outcome = session.reveal_cell((0, 0), &mut ());

    assert_eq!(outcome, RevealOutcome::Won);
    assert_eq!(session.cells_revealed(), 2499);
}
