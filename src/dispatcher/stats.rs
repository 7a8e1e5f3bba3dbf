use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a dispatcher's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Handlers invoked in-line by `emit` on their owner thread.
    pub sync_calls: u64,
    /// Calls pushed to the pending queue for another thread.
    pub deferred_calls: u64,
    /// Deferred calls executed by a run loop.
    pub executed_calls: u64,
    /// Deferred calls that panicked under `PanicPolicy::Isolate`.
    pub isolated_panics: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    sync_calls: AtomicU64,
    deferred_calls: AtomicU64,
    executed_calls: AtomicU64,
    isolated_panics: AtomicU64,
}

impl Counters {
    pub(crate) fn sync_call(&self) {
        self.sync_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn deferred_call(&self) {
        self.deferred_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn executed_call(&self) {
        self.executed_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn isolated_panic(&self) {
        self.isolated_panics.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> Stats {
        Stats {
            sync_calls: self.sync_calls.load(Ordering::Relaxed),
            deferred_calls: self.deferred_calls.load(Ordering::Relaxed),
            executed_calls: self.executed_calls.load(Ordering::Relaxed),
            isolated_panics: self.isolated_panics.load(Ordering::Relaxed),
        }
    }
}
