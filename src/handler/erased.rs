//! # Type-erased handler handle.
//!
//! [`ErasedHandler`] owns a [`HandlerFn<A>`] without exposing `A` in its type,
//! so handlers of every arity can live in one registry list. The concrete
//! type is recovered by [`ErasedHandler::attempt_as`], which is the only gate
//! between an emission site and a handler body.
//!
//! ## Matching rule
//! ```text
//! attempt_as::<B>()
//!   ├─ B::ARITY == 0 → match iff stored arity == 0 (tag not compared)
//!   ├─ otherwise     → match iff stored signature == B::signature()
//!   └─ on match      → checked Arc<dyn Any> downcast to HandlerFn<B>
//! ```
//!
//! Clones share the same callable; the closure is dropped together with the
//! last clone.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::into_handler::{HandlerFn, IntoHandler};
use crate::signature::{Args, Signature};

/// Refcounted, type-erased owning reference to a wrapped handler.
#[derive(Clone)]
pub struct ErasedHandler {
    signature: Signature,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ErasedHandler {
    /// Wraps `handler`, recording the signature of its argument tuple.
    pub fn new<A, H>(handler: H) -> Self
    where
        A: Args,
        H: IntoHandler<A>,
    {
        let f: HandlerFn<A> = handler.into_handler();
        Self {
            signature: A::signature(),
            inner: Arc::new(f),
        }
    }

    /// Parameter types the handler expects.
    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of parameters the handler expects.
    #[inline]
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Re-specializes the handle for argument tuple `B`.
    ///
    /// Returns `None` when the handler does not accept that argument shape.
    pub fn attempt_as<B: Args>(&self) -> Option<HandlerFn<B>> {
        if B::ARITY == 0 {
            if self.arity() != 0 {
                return None;
            }
        } else if self.signature != B::signature() {
            return None;
        }
        self.inner.downcast_ref::<HandlerFn<B>>().cloned()
    }
}

impl fmt::Debug for ErasedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedHandler")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_arity_matches_unit() {
        let h = ErasedHandler::new(|| {});
        assert_eq!(h.arity(), 0);
        assert!(h.attempt_as::<()>().is_some());
        assert!(h.attempt_as::<(i32,)>().is_none());
    }

    #[test]
    fn test_unit_emission_rejects_handler_with_arguments() {
        let h = ErasedHandler::new(|_: i32| {});
        assert!(h.attempt_as::<()>().is_none());
    }

    #[test]
    fn test_exact_signature_required() {
        let h = ErasedHandler::new(|_: i32, _: i32| {});
        assert!(h.attempt_as::<(i32, i32)>().is_some());
        assert!(h.attempt_as::<(i32,)>().is_none());
        assert!(h.attempt_as::<(i64, i64)>().is_none());
        assert!(h.attempt_as::<(i32, i32, i32)>().is_none());
    }

    #[test]
    fn test_matched_handle_invokes_original_closure() {
        let sum = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&sum);
        let h = ErasedHandler::new(move |a: usize, b: usize| {
            s.fetch_add(a + b, Ordering::SeqCst);
        });

        let f = h.attempt_as::<(usize, usize)>().unwrap();
        f((2, 3));
        assert_eq!(sum.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_clones_share_the_callable() {
        let marker = Arc::new(());
        let m = Arc::clone(&marker);
        let h = ErasedHandler::new(move || {
            let _keep = &m;
        });
        let copy = h.clone();
        assert_eq!(Arc::strong_count(&marker), 2);

        drop(h);
        assert_eq!(Arc::strong_count(&marker), 2);
        drop(copy);
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
