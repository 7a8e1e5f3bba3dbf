//! # Event registry - named, ordered handler lists.
//!
//! Maps an event name to the handler slots registered under it, in
//! registration order.
//!
//! ## Architecture
//! ```text
//! register(name, slot)  ─► write lock ─► events[name].push(slot)
//! unregister(name)      ─► write lock ─► events.remove(name)
//! emit(name, ..)        ─► read lock  ─► snapshot(name) ─► (lock released) ─► invoke/defer
//! ```
//!
//! ## Rules
//! - Registry is fully synchronized; any thread may register, unregister or emit
//! - Emission works on a snapshot: slots added during an emission are not
//!   called by it, and slots removed during it still are
//! - The lock is never held while a handler runs
//! - No per-handler removal; `unregister` drops the whole list

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::handler::HandlerSlot;

/// Thread-safe registry of handler slots keyed by event name.
#[derive(Default)]
pub(crate) struct Registry {
    events: RwLock<HashMap<String, Vec<HandlerSlot>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `slot` to the list for `name`, creating the list if absent.
    ///
    /// Returns the number of slots now registered under `name`.
    pub(crate) fn register(&self, name: &str, slot: HandlerSlot) -> usize {
        let mut events = self.events.write();
        let slots = events.entry(name.to_owned()).or_default();
        slots.push(slot);
        slots.len()
    }

    /// Removes every slot registered under `name`; returns how many were dropped.
    pub(crate) fn unregister(&self, name: &str) -> usize {
        // Slots (and possibly their closures) drop after the lock is released.
        let removed = self.events.write().remove(name);
        removed.map_or(0, |slots| slots.len())
    }

    /// Clones the slot list for `name`, or `None` for an unknown event.
    pub(crate) fn snapshot(&self, name: &str) -> Option<Vec<HandlerSlot>> {
        self.events.read().get(name).cloned()
    }

    pub(crate) fn handler_count(&self, name: &str) -> usize {
        self.events.read().get(name).map_or(0, Vec::len)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.events.read().contains_key(name)
    }

    /// Returns sorted list of registered event names.
    pub(crate) fn names(&self) -> Vec<String> {
        let events = self.events.read();
        let mut names: Vec<String> = events.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_preserves_order() {
        let reg = Registry::new();
        assert_eq!(reg.register("ev", HandlerSlot::new(|| {})), 1);
        assert_eq!(reg.register("ev", HandlerSlot::new(|_: i32| {})), 2);

        let slots = reg.snapshot("ev").unwrap();
        assert_eq!(slots[0].signature().arity(), 0);
        assert_eq!(slots[1].signature().arity(), 1);
    }

    #[test]
    fn test_unknown_event_has_no_snapshot() {
        let reg = Registry::new();
        assert!(reg.snapshot("missing").is_none());
        assert_eq!(reg.handler_count("missing"), 0);
        assert!(!reg.contains("missing"));
    }

    #[test]
    fn test_unregister_drops_whole_list() {
        let reg = Registry::new();
        reg.register("ev", HandlerSlot::new(|| {}));
        reg.register("ev", HandlerSlot::new(|| {}));
        reg.register("other", HandlerSlot::new(|| {}));

        assert_eq!(reg.unregister("ev"), 2);
        assert_eq!(reg.unregister("ev"), 0);
        assert!(reg.snapshot("ev").is_none());
        assert_eq!(reg.names(), vec!["other".to_string()]);
    }

    #[test]
    fn test_names_are_case_sensitive_and_sorted() {
        let reg = Registry::new();
        reg.register("b", HandlerSlot::new(|| {}));
        reg.register("a", HandlerSlot::new(|| {}));
        reg.register("A", HandlerSlot::new(|| {}));

        assert_eq!(reg.names(), vec!["A", "a", "b"]);
        assert!(!reg.contains("B"));
    }
}
