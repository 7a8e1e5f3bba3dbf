use std::borrow::Cow;
use std::sync::Arc;

use super::core::Dispatcher;
use crate::config::Config;
use crate::policies::PanicPolicy;

/// Builder for constructing a shared [`Dispatcher`].
pub struct DispatcherBuilder {
    cfg: Config,
}

impl DispatcherBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the label used in log records.
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Sets how the run loop reacts to panicking deferred calls.
    pub fn panic_policy(mut self, policy: PanicPolicy) -> Self {
        self.cfg.panic_policy = policy;
        self
    }

    /// Sets the number of pending calls preallocated in the queue.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.cfg.queue_capacity = capacity;
        self
    }

    /// Builds the dispatcher behind an `Arc`, ready to hand to other threads.
    pub fn build(self) -> Arc<Dispatcher> {
        Arc::new(Dispatcher::with_config(self.cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_applies_settings() {
        let d = Dispatcher::builder()
            .name("ui")
            .panic_policy(PanicPolicy::Isolate)
            .queue_capacity(8)
            .build();

        assert_eq!(d.config().label(), "ui");
        assert_eq!(d.config().panic_policy, PanicPolicy::Isolate);
        assert_eq!(d.config().queue_capacity, 8);
    }
}
