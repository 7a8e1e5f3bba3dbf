//! Opaque owner-thread identity.

use std::fmt;
use std::thread::{self, ThreadId};

/// Identity of the thread that registered a handler.
///
/// Emission compares the caller's token against the slot's token to choose
/// between in-line invocation and deferral to the owner's run loop.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadToken(ThreadId);

impl ThreadToken {
    /// Token of the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self(thread::current().id())
    }

    /// True when called from the thread this token identifies.
    #[inline]
    pub fn is_current(&self) -> bool {
        *self == Self::current()
    }
}

impl fmt::Debug for ThreadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
