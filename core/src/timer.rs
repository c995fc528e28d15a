use serde::{Deserialize, Serialize};

/// Valid transitions:
/// - Idle -> Running
/// - Running -> Stopped
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Whole-second game clock advanced by an external driver calling [`GameTimer::tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimer {
    state: TimerState,
    elapsed_secs: u32,
}

impl GameTimer {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0,
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Returns whether the timer actually started, a timer only ever starts once.
    pub fn start(&mut self) -> bool {
        if matches!(self.state, TimerState::Idle) {
            self.state = TimerState::Running;
            log::debug!("timer started");
            true
        } else {
            false
        }
    }

    /// Advances one second while running, returning the new elapsed time.
    pub fn tick(&mut self) -> Option<u32> {
        if self.is_running() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            Some(self.elapsed_secs)
        } else {
            None
        }
    }

    /// Freezes the clock, returns `true` only for the call that stopped it.
    pub fn stop(&mut self) -> bool {
        if self.is_running() {
            self.state = TimerState::Stopped;
            log::debug!("timer stopped at {}s", self.elapsed_secs);
            true
        } else {
            false
        }
    }
}
