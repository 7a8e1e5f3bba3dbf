use std::sync::atomic::{AtomicU8, Ordering};

/// Run-loop state of a dispatcher.
///
/// ```text
/// NotRunning ──run_loop()──► Running ──quit observed, calls left──► Quitting
///     ▲                        │                                      │
///     └──── run_loop_for ──────┤                                      │
///           timed out          └──── queue empty && quit ──► Stopped ◄┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// No loop is active.
    NotRunning,
    /// A loop is waiting for or running calls.
    Running,
    /// Quit has been observed; the loop is draining the remaining calls.
    Quitting,
    /// The last loop observed quit with an empty queue and returned.
    Stopped,
}

impl LoopState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => LoopState::Running,
            2 => LoopState::Quitting,
            3 => LoopState::Stopped,
            _ => LoopState::NotRunning,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LoopState::NotRunning => 0,
            LoopState::Running => 1,
            LoopState::Quitting => 2,
            LoopState::Stopped => 3,
        }
    }
}

/// Atomic cell holding a [`LoopState`].
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(LoopState::NotRunning.as_u8()))
    }

    pub(crate) fn get(&self) -> LoopState {
        LoopState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: LoopState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

/// How a run loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// Quit was observed and the queue drained.
    Quit,
    /// `run_loop_for` deadline passed with nothing to do.
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_roundtrips_every_state() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), LoopState::NotRunning);
        for s in [
            LoopState::Running,
            LoopState::Quitting,
            LoopState::Stopped,
            LoopState::NotRunning,
        ] {
            cell.set(s);
            assert_eq!(cell.get(), s);
        }
    }
}
