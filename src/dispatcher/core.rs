//! # Dispatcher: thread-aware emission and the owner-thread run loop.
//!
//! The [`Dispatcher`] owns the event [`Registry`], the shared
//! [`PendingQueue`], the quit token and the loop exclusivity lock.
//!
//! ## Emission routing
//! ```text
//! emit(name, args)
//!   ├─► registry.snapshot(name) ── None ──► Ok(()) (unknown event, no-op)
//!   └─► for slot in slots (registration order):
//!         ├─ slot.attempt_as::<A>() ── None ──► Err(InvalidArgumentSignature)
//!         │                                     (earlier handlers already ran)
//!         ├─ owner == current thread ──► handler(args.clone())       (in-line)
//!         └─ owner != current thread ──► queue.push(move || handler(args))
//! ```
//!
//! ## Run loop
//! ```text
//! run_loop()
//!   ├─► LoopReentered if this thread already runs the loop
//!   ├─► lock loop_lock (second caller blocks here)   state = Running
//!   └─► loop {
//!         queue.wait_pop(quit, deadline)
//!           ├─ Call     ─► (quit seen → Quitting) ─► execute(call)
//!           ├─ Drained  ─► state = Stopped, return Quit
//!           └─ TimedOut ─► state = NotRunning, return TimedOut
//!       }
//! ```
//!
//! ## Rules
//! - No lock is held while a handler runs (handlers may register, emit, quit)
//! - `emit` never waits for another thread's progress
//! - The run loop executes whatever was queued; it does not check ownership
//! - Quit is best effort: calls pushed around the time quit is observed may
//!   or may not run

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, MutexGuard};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::{debug, error, trace, warn};

use super::builder::DispatcherBuilder;
use super::state::{LoopExit, LoopState, StateCell};
use super::stats::{Counters, Stats};
use crate::config::Config;
use crate::error::DispatchError;
use crate::handler::{HandlerSlot, IntoHandler};
use crate::policies::PanicPolicy;
use crate::queue::{PendingCall, PendingQueue, Popped};
use crate::registry::Registry;
use crate::signature::Args;
use crate::thread::ThreadToken;

/// Thread-aware registry of named event handlers with a run loop.
///
/// Not `Clone`: share it by reference or through an `Arc`.
pub struct Dispatcher {
    cfg: Config,
    registry: Registry,
    queue: PendingQueue,
    quit: CancellationToken,
    loop_lock: Mutex<()>,
    loop_thread: Mutex<Option<ThreadToken>>,
    state: StateCell,
    counters: Counters,
}

impl Dispatcher {
    /// Creates a dispatcher with [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a dispatcher with the given configuration.
    #[must_use]
    pub fn with_config(cfg: Config) -> Self {
        let queue = PendingQueue::with_capacity(cfg.queue_capacity);
        Self {
            cfg,
            registry: Registry::new(),
            queue,
            quit: CancellationToken::new(),
            loop_lock: Mutex::new(()),
            loop_thread: Mutex::new(None),
            state: StateCell::new(),
            counters: Counters::default(),
        }
    }

    /// Starts a [`DispatcherBuilder`] with the default configuration.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new(Config::default())
    }

    /// Configuration this dispatcher was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Registers `handler` under `name`, bound to the calling thread.
    ///
    /// Handlers accumulate: every registration appends, and handlers run in
    /// registration order.
    ///
    /// # Example
    /// ```
    /// use looper::Dispatcher;
    ///
    /// let d = Dispatcher::new();
    /// d.register("add", |a: i32, b: i32| println!("{}", a + b));
    /// d.emit("add", (1, 2)).unwrap();
    /// ```
    pub fn register<A, H>(&self, name: &str, handler: H)
    where
        A: Args,
        H: IntoHandler<A>,
    {
        let slot = HandlerSlot::new(handler);
        let owner = slot.owner();
        let arity = slot.signature().arity();
        let handlers = self.registry.register(name, slot);
        debug!(
            dispatcher = self.cfg.label(),
            event = name,
            arity,
            handlers,
            owner = ?owner,
            "handler registered"
        );
    }

    /// Drops every handler registered under `name`; returns how many were removed.
    pub fn unregister(&self, name: &str) -> usize {
        let removed = self.registry.unregister(name);
        debug!(
            dispatcher = self.cfg.label(),
            event = name,
            removed,
            "event unregistered"
        );
        removed
    }

    /// Fires `name` with the argument tuple `args`.
    ///
    /// Handlers owned by the calling thread run before this returns; handlers
    /// owned by other threads are queued for their run loop. Emitting an
    /// unknown event is a no-op.
    ///
    /// # Errors
    /// [`DispatchError::InvalidArgumentSignature`] at the first handler that
    /// does not accept `A`. Handlers before it have already run or been
    /// queued; handlers after it are skipped.
    pub fn emit<A: Args>(&self, name: &str, args: A) -> Result<(), DispatchError> {
        let Some(slots) = self.registry.snapshot(name) else {
            trace!(dispatcher = self.cfg.label(), event = name, "no handlers; emit ignored");
            return Ok(());
        };

        let mut event: Option<Arc<str>> = None;
        for slot in &slots {
            let Some(handler) = slot.attempt_as::<A>() else {
                let err = DispatchError::InvalidArgumentSignature {
                    event: name.to_owned(),
                    expected: slot.signature().clone(),
                    actual: A::signature(),
                };
                warn!(dispatcher = self.cfg.label(), error = %err, "emit aborted");
                return Err(err);
            };

            if slot.is_owned_by_current_thread() {
                self.counters.sync_call();
                handler(args.clone());
            } else {
                let event = event.get_or_insert_with(|| Arc::from(name));
                let args = args.clone();
                self.counters.deferred_call();
                let pending = self
                    .queue
                    .push(PendingCall::new(Arc::clone(event), move || handler(args)));
                trace!(
                    dispatcher = self.cfg.label(),
                    event = name,
                    owner = ?slot.owner(),
                    pending,
                    "call deferred to owner thread"
                );
            }
        }
        Ok(())
    }

    /// Runs deferred calls on the calling thread until [`quit`](Self::quit)
    /// is observed and the queue is empty.
    ///
    /// Only one loop runs per dispatcher at a time; a concurrent caller on
    /// another thread blocks until the active loop returns.
    ///
    /// The queue is always drained before the loop stops. This holds even
    /// when `quit` was called before the loop started: calls already queued
    /// still run, and only an empty queue makes the loop return at once.
    ///
    /// # Errors
    /// [`DispatchError::LoopReentered`] when called from a handler that this
    /// thread's loop is currently running.
    pub fn run_loop(&self) -> Result<LoopExit, DispatchError> {
        self.drive(None)
    }

    /// Like [`run_loop`](Self::run_loop), but returns
    /// [`LoopExit::TimedOut`] once `timeout` elapses with nothing to run.
    ///
    /// The deadline is checked only while idle; a running call is never cut short.
    pub fn run_loop_for(&self, timeout: Duration) -> Result<LoopExit, DispatchError> {
        self.drive(Instant::now().checked_add(timeout))
    }

    /// Runs the calls queued right now without waiting for new ones.
    ///
    /// Returns the number of calls executed.
    pub fn run_pending(&self) -> Result<usize, DispatchError> {
        let mut guard = self.enter()?;
        self.state.set(LoopState::Running);
        let batch = self.queue.len();
        let mut executed = 0;
        while executed < batch {
            let Some(call) = self.queue.try_pop() else {
                break;
            };
            self.execute(call);
            executed += 1;
        }
        guard.exit_as(LoopState::NotRunning);
        Ok(executed)
    }

    /// Requests the run loop to stop once the queue is drained.
    ///
    /// Non-blocking and idempotent. It does not cancel or inspect queued
    /// calls; calls racing with it are not guaranteed to run.
    pub fn quit(&self) {
        if !self.quit.is_cancelled() {
            debug!(dispatcher = self.cfg.label(), "quit requested");
        }
        self.quit.cancel();
        self.queue.wake_all();
    }

    /// True once [`quit`](Self::quit) has been called.
    #[inline]
    pub fn is_quit(&self) -> bool {
        self.quit.is_cancelled()
    }

    /// Completes once [`quit`](Self::quit) has been called.
    ///
    /// For async callers that need to wait for shutdown without polling.
    pub fn quitted(&self) -> WaitForCancellationFuture<'_> {
        self.quit.cancelled()
    }

    /// Current run-loop state.
    #[inline]
    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    /// Number of deferred calls waiting for a run loop.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot of call counters.
    pub fn stats(&self) -> Stats {
        self.counters.snapshot()
    }

    /// Number of handlers registered under `name`.
    pub fn handler_count(&self, name: &str) -> usize {
        self.registry.handler_count(name)
    }

    /// True if at least one handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Sorted list of event names with registered handlers.
    pub fn event_names(&self) -> Vec<String> {
        self.registry.names()
    }

    fn drive(&self, deadline: Option<Instant>) -> Result<LoopExit, DispatchError> {
        let mut guard = self.enter()?;
        self.state.set(LoopState::Running);
        debug!(dispatcher = self.cfg.label(), "run loop started");

        loop {
            match self.queue.wait_pop(&self.quit, deadline) {
                Popped::Call { call, quitting } => {
                    if quitting && self.state.get() == LoopState::Running {
                        self.state.set(LoopState::Quitting);
                        debug!(
                            dispatcher = self.cfg.label(),
                            pending = self.queue.len() + 1,
                            "quit observed; draining queue"
                        );
                    }
                    self.execute(call);
                }
                Popped::Drained => {
                    guard.exit_as(LoopState::Stopped);
                    debug!(dispatcher = self.cfg.label(), "run loop stopped");
                    return Ok(LoopExit::Quit);
                }
                Popped::TimedOut => {
                    guard.exit_as(LoopState::NotRunning);
                    trace!(dispatcher = self.cfg.label(), "run loop timed out");
                    return Ok(LoopExit::TimedOut);
                }
            }
        }
    }

    /// Takes the loop exclusivity lock for the calling thread.
    fn enter(&self) -> Result<LoopGuard<'_>, DispatchError> {
        let me = ThreadToken::current();
        if *self.loop_thread.lock() == Some(me) {
            return Err(DispatchError::LoopReentered);
        }
        let lock = self.loop_lock.lock();
        *self.loop_thread.lock() = Some(me);
        Ok(LoopGuard {
            owner: self,
            exit: LoopState::Stopped,
            _lock: lock,
        })
    }

    fn execute(&self, call: PendingCall) {
        match self.cfg.panic_policy {
            PanicPolicy::Propagate => call.run(),
            PanicPolicy::Isolate => {
                let event = Arc::clone(call.event());
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| call.run())) {
                    self.counters.isolated_panic();
                    error!(
                        dispatcher = self.cfg.label(),
                        event = &*event,
                        panic = panic_message(&*payload),
                        "deferred handler panicked"
                    );
                }
            }
        }
        self.counters.executed_call();
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the loop lock; publishes the final state and clears the loop owner
/// on drop, including during unwinding.
struct LoopGuard<'a> {
    owner: &'a Dispatcher,
    exit: LoopState,
    _lock: MutexGuard<'a, ()>,
}

impl LoopGuard<'_> {
    fn exit_as(&mut self, state: LoopState) {
        self.exit = state;
    }
}

impl Drop for LoopGuard<'_> {
    fn drop(&mut self) {
        self.owner.state.set(self.exit);
        *self.owner.loop_thread.lock() = None;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[test]
    fn test_same_thread_emit_is_synchronous() {
        let d = Dispatcher::new();
        let hits = counter();
        let h = Arc::clone(&hits);
        d.register("ping", move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        d.emit("ping", ()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(d.pending(), 0);
        assert_eq!(d.stats().sync_calls, 1);
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let d = Dispatcher::new();
        assert!(d.emit("nobody", (1_u8,)).is_ok());
        assert_eq!(d.stats(), Stats::default());
    }

    #[test]
    fn test_mismatch_stops_after_earlier_handlers_ran() {
        let d = Dispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let (l1, l3) = (Arc::clone(&log), Arc::clone(&log));
        d.register("ev", move |x: i32| l1.lock().push(x));
        d.register("ev", |_: String| {});
        d.register("ev", move |x: i32| l3.lock().push(x * 10));

        let err = d.emit("ev", (4_i32,)).unwrap_err();
        assert_eq!(err.as_label(), "invalid_argument_signature");
        assert_eq!(*log.lock(), vec![4]);
    }

    #[test]
    fn test_foreign_handler_is_deferred_until_run_pending() {
        let d = Arc::new(Dispatcher::new());
        let hits = counter();

        let h = Arc::clone(&hits);
        let remote = Arc::clone(&d);
        thread::spawn(move || {
            remote.register("ping", move || {
                h.fetch_add(1, Ordering::SeqCst);
            });
        })
        .join()
        .unwrap();

        d.emit("ping", ()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(d.pending(), 1);

        assert_eq!(d.run_pending().unwrap(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(d.state(), LoopState::NotRunning);
    }

    #[test]
    fn test_quit_before_loop_returns_immediately() {
        let d = Dispatcher::new();
        d.quit();
        d.quit();
        assert!(d.is_quit());
        assert_eq!(d.run_loop().unwrap(), LoopExit::Quit);
        assert_eq!(d.state(), LoopState::Stopped);
    }

    #[test]
    fn test_loop_reports_quitting_while_draining() {
        let d = Arc::new(Dispatcher::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (remote, weak, s) = (Arc::clone(&d), Arc::downgrade(&d), Arc::clone(&seen));
        thread::spawn(move || {
            remote.register("drain", move || {
                if let Some(d) = weak.upgrade() {
                    s.lock().push(d.state());
                }
            });
        })
        .join()
        .unwrap();

        d.emit("drain", ()).unwrap();
        d.emit("drain", ()).unwrap();
        d.quit();

        assert_eq!(d.run_loop().unwrap(), LoopExit::Quit);
        assert_eq!(*seen.lock(), vec![LoopState::Quitting, LoopState::Quitting]);
        assert_eq!(d.state(), LoopState::Stopped);
    }

    #[test]
    fn test_run_pending_leaves_calls_queued_during_batch() {
        let d = Arc::new(Dispatcher::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let (remote, weak, l) = (Arc::clone(&d), Arc::downgrade(&d), Arc::clone(&log));
        thread::spawn(move || {
            remote.register("n", move |n: usize| {
                l.lock().push(n);
                if let Some(d) = weak.upgrade().filter(|_| n < 10) {
                    d.emit("n", (n + 10,)).unwrap();
                }
            });
        })
        .join()
        .unwrap();

        for n in 0..3_usize {
            d.emit("n", (n,)).unwrap();
        }

        assert_eq!(d.run_pending().unwrap(), 3);
        assert_eq!(*log.lock(), vec![0, 1, 2]);
        assert_eq!(d.pending(), 3);

        assert_eq!(d.run_pending().unwrap(), 3);
        assert_eq!(*log.lock(), vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(d.pending(), 0);
    }

    #[tokio::test]
    async fn test_quitted_resolves_after_quit() {
        let d = Arc::new(Dispatcher::new());
        let waiter = {
            let d = Arc::clone(&d);
            tokio::spawn(async move { d.quitted().await })
        };
        d.quit();
        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(d.is_quit());
    }

    #[test]
    fn test_run_loop_for_times_out() {
        let d = Dispatcher::new();
        let exit = d.run_loop_for(Duration::from_millis(20)).unwrap();
        assert_eq!(exit, LoopExit::TimedOut);
        assert_eq!(d.state(), LoopState::NotRunning);
    }

    #[test]
    fn test_panic_message_extracts_strings() {
        let a: Box<dyn Any + Send> = Box::new("static");
        let b: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let c: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(a.as_ref()), "static");
        assert_eq!(panic_message(b.as_ref()), "owned");
        assert_eq!(panic_message(c.as_ref()), "non-string panic payload");
    }
}
