use crate::signature::{Args, Signature};
use crate::thread::ThreadToken;

use super::erased::ErasedHandler;
use super::into_handler::{HandlerFn, IntoHandler};

/// Registered handler bound to the thread that registered it.
///
/// Cloning a slot shares the underlying callable; the owner never changes.
#[derive(Clone, Debug)]
pub struct HandlerSlot {
    owner: ThreadToken,
    handle: ErasedHandler,
}

impl HandlerSlot {
    /// Wraps `handler` and binds it to the calling thread.
    pub fn new<A, H>(handler: H) -> Self
    where
        A: Args,
        H: IntoHandler<A>,
    {
        Self {
            owner: ThreadToken::current(),
            handle: ErasedHandler::new(handler),
        }
    }

    /// Thread that registered the handler.
    #[inline]
    pub fn owner(&self) -> ThreadToken {
        self.owner
    }

    /// True when the calling thread owns this slot.
    #[inline]
    pub fn is_owned_by_current_thread(&self) -> bool {
        self.owner.is_current()
    }

    /// Parameter types the handler expects.
    #[inline]
    pub fn signature(&self) -> &Signature {
        self.handle.signature()
    }

    /// See [`ErasedHandler::attempt_as`].
    #[inline]
    pub fn attempt_as<A: Args>(&self) -> Option<HandlerFn<A>> {
        self.handle.attempt_as::<A>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_owner_is_registering_thread() {
        let slot = HandlerSlot::new(|_: u32| {});
        assert!(slot.is_owned_by_current_thread());
        assert_eq!(slot.owner(), ThreadToken::current());

        let moved = slot.clone();
        let seen_remote = thread::spawn(move || moved.is_owned_by_current_thread())
            .join()
            .unwrap();
        assert!(!seen_remote);
    }

    #[test]
    fn test_attempt_as_follows_handle_rule() {
        let slot = HandlerSlot::new(|_: u32| {});
        assert_eq!(slot.signature().arity(), 1);
        assert!(slot.attempt_as::<(u32,)>().is_some());
        assert!(slot.attempt_as::<()>().is_none());
    }
}
