//! # Panic policy for deferred calls.
//!
//! [`PanicPolicy`] decides what happens when a handler panics while the run
//! loop is executing it on behalf of another thread's emission.
//!
//! - [`PanicPolicy::Propagate`] the panic unwinds out of `run_loop` (default).
//! - [`PanicPolicy::Isolate`] the panic is caught, logged and counted; the loop keeps going.
//!
//! Synchronous invocations (emitter is the owner thread) are never guarded:
//! a panic there always reaches the `emit` caller.
//!
//! ```text
//! run_loop ─► pop call ─► call()
//!                           ├─ Ok
//!                           └─ panic ─► Propagate → unwind, state = Stopped
//!                                       Isolate   → error!(..), stats.isolated_panics += 1, continue
//! ```

/// Policy controlling how the run loop reacts to a panicking deferred call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanicPolicy {
    /// Let the panic unwind out of the run loop (default).
    #[default]
    Propagate,
    /// Catch the panic, log it, and continue with the next call.
    Isolate,
}
