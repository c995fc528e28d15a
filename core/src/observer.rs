use alloc::vec::Vec;

use crate::Cell;

/// Receives change notifications from a [`Session`](crate::Session) so a view can redraw what changed.
pub trait SessionObserver {
    fn on_cell_changed(&mut self, _cell: &Cell) {}

    fn on_counters_changed(&mut self, _mines_remaining: i32) {}

    fn on_timer_tick(&mut self, _elapsed_secs: u32) {}

    fn on_game_ended(&mut self, _won: bool) {}
}

/// Discards every notification.
impl SessionObserver for () {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    CellChanged(Cell),
    CountersChanged { mines_remaining: i32 },
    TimerTick { elapsed_secs: u32 },
    GameEnded { won: bool },
}

/// Records notifications in order.
impl SessionObserver for Vec<SessionEvent> {
    fn on_cell_changed(&mut self, cell: &Cell) {
        self.push(SessionEvent::CellChanged(*cell));
    }

    fn on_counters_changed(&mut self, mines_remaining: i32) {
        self.push(SessionEvent::CountersChanged { mines_remaining });
    }

    fn on_timer_tick(&mut self, elapsed_secs: u32) {
        self.push(SessionEvent::TimerTick { elapsed_secs });
    }

    fn on_game_ended(&mut self, won: bool) {
        self.push(SessionEvent::GameEnded { won });
    }
}
