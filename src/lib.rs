//! # looper
//!
//! **looper** is a thread-aware named event dispatcher.
//!
//! Handlers are registered under an event name and bound to the thread that
//! registered them. Emitting an event runs a handler in-line when the emitter
//! is its owner thread, and otherwise queues the call for the owner thread's
//! run loop.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   Thread T1 (owner)                         Thread T2 (emitter)
//!   ─────────────────                         ───────────────────
//!   register("key", |c: char| ..)             emit("key", ('a',))
//!            │                                        │
//!            ▼                                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                       │
//! │  - Registry   (RwLock<name → [HandlerSlot{owner, ErasedHandler}]>)│
//! │  - PendingQueue (Mutex<VecDeque> + Condvar, global FIFO)          │
//! │  - quit token, loop lock, LoopState, Stats                        │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        │ owner == emitter                             │ owner != emitter
//!        ▼                                              ▼
//!   handler(args) in-line                   queue.push(move || handler(args))
//!                                                       │
//!                                                       ▼
//!                                      T1: run_loop() pops and runs, FIFO
//! ```
//!
//! ### Run loop lifecycle
//! ```text
//! NotRunning ──► Running ──(quit seen, calls left)──► Quitting ──► Stopped
//!                   └────────(quit seen, queue empty)────────────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Dispatch**      | Register, emit, run loop, quit.                              | [`Dispatcher`], [`DispatcherBuilder`]     |
//! | **Handlers**      | Closures of any arity up to 8, type-checked at emit time.    | [`IntoHandler`], [`ErasedHandler`]        |
//! | **Signatures**    | Runtime-comparable parameter-type lists.                     | [`Signature`], [`Args`]                   |
//! | **Policies**      | Reaction to panicking deferred calls.                        | [`PanicPolicy`]                           |
//! | **Errors**        | Typed errors for emission and loop misuse.                   | [`DispatchError`]                         |
//! | **Configuration** | Centralize dispatcher settings.                              | [`Config`]                                |
//!
//! ## Optional features
//! - `signals`: [`shutdown::quit_on_signal`] quits a dispatcher on SIGINT/SIGTERM/SIGQUIT.
//!
//! ## Logging
//! The crate emits [`tracing`] records (target `looper`) and never installs a
//! subscriber itself.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::mpsc;
//! use std::thread;
//!
//! use looper::{Dispatcher, LoopExit};
//!
//! let dispatcher = Dispatcher::builder().name("worker").build();
//! let hits = Arc::new(AtomicUsize::new(0));
//! let (ready_tx, ready_rx) = mpsc::channel();
//!
//! // The worker thread owns the handler and runs the loop.
//! let worker = {
//!     let d = Arc::clone(&dispatcher);
//!     let hits = Arc::clone(&hits);
//!     thread::spawn(move || {
//!         d.register("ping", move || {
//!             hits.fetch_add(1, Ordering::SeqCst);
//!         });
//!         ready_tx.send(()).unwrap();
//!         d.run_loop()
//!     })
//! };
//!
//! ready_rx.recv().unwrap();
//! dispatcher.emit("ping", ()).unwrap(); // queued for the worker
//! dispatcher.quit();
//!
//! assert_eq!(worker.join().unwrap().unwrap(), LoopExit::Quit);
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```
mod config;
mod dispatcher;
mod error;
mod handler;
mod policies;
mod queue;
mod registry;
mod signature;
mod thread;

#[cfg(feature = "signals")]
pub mod shutdown;

// ---- Public re-exports ----

pub use config::Config;
pub use dispatcher::{Dispatcher, DispatcherBuilder, LoopExit, LoopState, Stats};
pub use error::DispatchError;
pub use handler::{ErasedHandler, HandlerFn, HandlerSlot, IntoHandler};
pub use policies::PanicPolicy;
pub use signature::{ArgType, Args, Signature};
pub use thread::ThreadToken;
