//! Dispatcher: registration, emission routing and the run loop.
//!
//! - `core`: the [`Dispatcher`] itself;
//! - `builder`: [`DispatcherBuilder`] for shared (`Arc`) construction;
//! - `state`: [`LoopState`] machine and [`LoopExit`];
//! - `stats`: [`Stats`] counters snapshot.

mod builder;
mod core;
mod state;
mod stats;

pub use builder::DispatcherBuilder;
pub use self::core::Dispatcher;
pub use state::{LoopExit, LoopState};
pub use stats::Stats;
