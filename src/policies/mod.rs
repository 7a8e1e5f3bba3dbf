//! Run-loop policies.
//!
//! ## Contents
//! - [`PanicPolicy`] what the run loop does when a deferred call panics
//!
//! ## Defaults
//! - `PanicPolicy::Propagate`: a panicking deferred call ends the loop.

mod panic;

pub use panic::PanicPolicy;
