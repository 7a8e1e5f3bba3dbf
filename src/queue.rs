//! # Pending-call queue: deferred invocations for owner threads.
//!
//! A single FIFO shared by every emitting thread. Emitters push boxed calls;
//! the thread running [`Dispatcher::run_loop`](crate::Dispatcher::run_loop)
//! pops and runs them one at a time.
//!
//! ## Diagram
//! ```text
//!  emit() on T2 ──┐
//!  emit() on T3 ──┼──► push ──► [ call | call | call ] ──► wait_pop ──► call() on T1
//!  emit() on T4 ──┘      │            (Mutex)                 ▲
//!                        └──────── notify_one ─── Condvar ────┘
//!  quit() ───────────────────────── notify_all ──────────────┘
//! ```
//!
//! ## What it guarantees
//! - Global FIFO across all pushing threads.
//! - `push` never waits for execution.
//! - The lock covers only the push/pop itself; calls run with it released.
//! - No lost wake-ups: quit is checked under the lock and `wake_all` takes it.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use tokio_util::sync::CancellationToken;

/// Fully bound, zero-argument deferred invocation.
pub(crate) struct PendingCall {
    event: Arc<str>,
    call: Box<dyn FnOnce() + Send + 'static>,
}

impl PendingCall {
    pub(crate) fn new(event: Arc<str>, call: impl FnOnce() + Send + 'static) -> Self {
        Self {
            event,
            call: Box::new(call),
        }
    }

    /// Event name the call was emitted under.
    pub(crate) fn event(&self) -> &Arc<str> {
        &self.event
    }

    pub(crate) fn run(self) {
        (self.call)()
    }
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

/// Outcome of one [`PendingQueue::wait_pop`] cycle.
#[derive(Debug)]
pub(crate) enum Popped {
    /// Next call in FIFO order; `quitting` reports whether quit was already set.
    Call { call: PendingCall, quitting: bool },
    /// Quit is set and the queue is empty.
    Drained,
    /// Deadline passed with the queue empty and quit unset.
    TimedOut,
}

/// Shared FIFO of pending calls with blocking pop.
pub(crate) struct PendingQueue {
    calls: Mutex<VecDeque<PendingCall>>,
    ready: Condvar,
}

impl PendingQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            calls: Mutex::new(VecDeque::with_capacity(capacity)),
            ready: Condvar::new(),
        }
    }

    /// Appends `call` and wakes one waiting loop. Returns the new queue length.
    pub(crate) fn push(&self, call: PendingCall) -> usize {
        let len = {
            let mut calls = self.calls.lock();
            calls.push_back(call);
            calls.len()
        };
        self.ready.notify_one();
        len
    }

    /// Pops the oldest call without waiting.
    pub(crate) fn try_pop(&self) -> Option<PendingCall> {
        self.calls.lock().pop_front()
    }

    /// Blocks until a call is available, `quit` is cancelled with the queue
    /// empty, or `deadline` (if any) passes.
    ///
    /// Queued calls are always handed out before `Drained` is reported.
    pub(crate) fn wait_pop(&self, quit: &CancellationToken, deadline: Option<Instant>) -> Popped {
        let mut calls = self.calls.lock();
        loop {
            if let Some(call) = calls.pop_front() {
                return Popped::Call {
                    call,
                    quitting: quit.is_cancelled(),
                };
            }
            if quit.is_cancelled() {
                return Popped::Drained;
            }
            match deadline {
                Some(at) => {
                    if self.ready.wait_until(&mut calls, at).timed_out()
                        && calls.is_empty()
                        && !quit.is_cancelled()
                    {
                        return Popped::TimedOut;
                    }
                }
                None => self.ready.wait(&mut calls),
            }
        }
    }

    /// Wakes every waiter so it re-checks the quit flag.
    pub(crate) fn wake_all(&self) {
        // Taking the lock orders this wake after any waiter's quit check.
        drop(self.calls.lock());
        self.ready.notify_all();
    }

    pub(crate) fn len(&self) -> usize {
        self.calls.lock().len()
    }
}
