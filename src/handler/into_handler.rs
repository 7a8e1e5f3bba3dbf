//! # Closure-backed handlers (`IntoHandler`)
//!
//! [`IntoHandler`] turns a plain closure `Fn(T1, .., Tn)` into a
//! [`HandlerFn`] that takes its arguments as one tuple. That gives every
//! handler the same calling shape regardless of arity.
//!
//! ## Example
//! ```rust
//! use looper::{HandlerFn, IntoHandler};
//!
//! let add: HandlerFn<(i32, i32)> = (|a: i32, b: i32| {
//!     assert_eq!(a + b, 3);
//! })
//! .into_handler();
//!
//! add((1, 2));
//! ```
//!
//! Parameter types must be spelled out on the closure (`|a: i32| ..`); they
//! pick which `IntoHandler<A>` implementation applies.

use std::sync::Arc;

use crate::signature::Args;

/// Uniformly invocable handler taking its arguments as a tuple.
pub type HandlerFn<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

/// Conversion of a callable into a [`HandlerFn`] over argument tuple `A`.
pub trait IntoHandler<A: Args>: Send + Sync + 'static {
    /// Wraps `self` into the shared, tuple-taking form.
    fn into_handler(self) -> HandlerFn<A>;
}

macro_rules! impl_into_handler {
    ($($T:ident),*) => {
        impl<F, $($T),*> IntoHandler<($($T,)*)> for F
        where
            F: Fn($($T),*) + Send + Sync + 'static,
            ($($T,)*): Args,
        {
            #[allow(non_snake_case)]
            fn into_handler(self) -> HandlerFn<($($T,)*)> {
                Arc::new(move |($($T,)*): ($($T,)*)| (self)($($T),*))
            }
        }
    };
}

impl_into_handler!();
impl_into_handler!(A1);
impl_into_handler!(A1, A2);
impl_into_handler!(A1, A2, A3);
impl_into_handler!(A1, A2, A3, A4);
impl_into_handler!(A1, A2, A3, A4, A5);
impl_into_handler!(A1, A2, A3, A4, A5, A6);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_into_handler!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_arg_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let f: HandlerFn<()> = (move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .into_handler();

        f(());
        f(());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_arguments_are_spread_in_order() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let f: HandlerFn<(u8, String, bool)> = (move |a: u8, b: String, c: bool| {
            s.lock().push(format!("{a}-{b}-{c}"));
        })
        .into_handler();

        f((7, "x".to_string(), true));
        assert_eq!(seen.lock().as_slice(), ["7-x-true"]);
    }
}
