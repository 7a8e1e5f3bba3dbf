//! # Dispatcher configuration.
//!
//! Provides [`Config`], the settings a [`Dispatcher`](crate::Dispatcher) is
//! built with.
//!
//! Config is used in two ways:
//! 1. **Direct creation**: `Dispatcher::with_config(config)`
//! 2. **Builder**: `Dispatcher::builder().config(config).build()`
//!
//! ## Sentinel values
//! - `name = ""` → logs use `"dispatcher"`
//! - `queue_capacity = 0` → queue grows from empty (no preallocation)

use std::borrow::Cow;

use crate::policies::PanicPolicy;

/// Configuration for a dispatcher.
///
/// ## Field semantics
/// - `name`: Label attached to every log record of this dispatcher
/// - `panic_policy`: Reaction to a panicking deferred call
/// - `queue_capacity`: Initial capacity of the pending-call queue (the queue is unbounded)
#[derive(Clone, Debug)]
pub struct Config {
    /// Label used in log records.
    pub name: Cow<'static, str>,

    /// What the run loop does when a deferred call panics.
    ///
    /// Synchronous calls are unaffected; their panics reach the `emit` caller.
    pub panic_policy: PanicPolicy,

    /// Number of pending calls preallocated in the queue.
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the log label, substituting `"dispatcher"` for an empty name.
    #[inline]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            "dispatcher"
        } else {
            self.name.as_ref()
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "dispatcher"`
    /// - `panic_policy = PanicPolicy::Propagate`
    /// - `queue_capacity = 64`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("dispatcher"),
            panic_policy: PanicPolicy::default(),
            queue_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_falls_back() {
        let cfg = Config {
            name: Cow::Borrowed(""),
            ..Config::default()
        };
        assert_eq!(cfg.label(), "dispatcher");
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.label(), "dispatcher");
        assert_eq!(cfg.panic_policy, PanicPolicy::Propagate);
        assert_eq!(cfg.queue_capacity, 64);
    }
}
