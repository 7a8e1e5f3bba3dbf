//! # Runtime signature tags for handler argument lists.
//!
//! A [`Signature`] identifies the ordered list of parameter types a handler
//! accepts. It is built from [`TypeId`]s, so two signatures compare equal only
//! when every parameter type is exactly the same (no widening, no coercion).
//!
//! Arguments always travel as a tuple implementing [`Args`]:
//! ```text
//! emit("tick", ())          → arity 0, signature ()
//! emit("key", (ch,))        → arity 1, signature (char)
//! emit("add", (1_i32, 2))   → arity 2, signature (i32, i32)
//! ```
//!
//! ## Rules
//! - Equality and hashing use `TypeId` only; type names are for diagnostics.
//! - `&'static str` and `String` are different types, so are `i32` and `i64`.
//! - Tuples of up to 8 elements implement [`Args`].

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One parameter of a signature.
#[derive(Clone, Copy, Debug)]
pub struct ArgType {
    id: TypeId,
    name: &'static str,
}

impl ArgType {
    /// Describes type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Type identity used for comparison.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ArgType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgType {}

impl Hash for ArgType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Ordered parameter-type list of a handler or of an emission site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    args: Box<[ArgType]>,
}

impl Signature {
    /// Builds a signature from its parameter types.
    #[must_use]
    pub fn new(args: impl Into<Box<[ArgType]>>) -> Self {
        Self { args: args.into() }
    }

    /// Signature of the zero-argument call.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// True for `()`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Parameter types in declaration order.
    pub fn args(&self) -> &[ArgType] {
        &self.args
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(arg.name)?;
        }
        f.write_str(")")
    }
}

/// Argument tuple accepted by [`Dispatcher::emit`](crate::Dispatcher::emit).
///
/// `Clone` because one emission may be deferred to several owner threads,
/// each receiving its own copy. `Send + 'static` because deferred copies
/// cross threads and sit in the pending-call queue.
pub trait Args: Clone + Send + 'static {
    /// Number of elements in the tuple.
    const ARITY: usize;

    /// Runtime signature of the tuple's element types.
    fn signature() -> Signature;
}

macro_rules! impl_args {
    ($n:expr; $($T:ident),*) => {
        impl<$($T),*> Args for ($($T,)*)
        where
            $($T: Clone + Send + 'static,)*
        {
            const ARITY: usize = $n;

            fn signature() -> Signature {
                let args: Vec<ArgType> = vec![$(ArgType::of::<$T>()),*];
                Signature::new(args)
            }
        }
    };
}

impl_args!(0;);
impl_args!(1; A1);
impl_args!(2; A1, A2);
impl_args!(3; A1, A2, A3);
impl_args!(4; A1, A2, A3, A4);
impl_args!(5; A1, A2, A3, A4, A5);
impl_args!(6; A1, A2, A3, A4, A5, A6);
impl_args!(7; A1, A2, A3, A4, A5, A6, A7);
impl_args!(8; A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_empty() {
        assert_eq!(<()>::ARITY, 0);
        assert!(<()>::signature().is_empty());
        assert_eq!(<()>::signature(), Signature::empty());
    }

    #[test]
    fn test_same_types_compare_equal() {
        assert_eq!(<(i32, i32)>::signature(), <(i32, i32)>::signature());
        assert_eq!(<(i32, i32)>::ARITY, 2);
    }

    #[test]
    fn test_no_implicit_widening() {
        assert_ne!(<(i32,)>::signature(), <(i64,)>::signature());
        assert_ne!(<(&'static str,)>::signature(), <(String,)>::signature());
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(
            <(i32, String)>::signature(),
            <(String, i32)>::signature()
        );
    }

    #[test]
    fn test_display_lists_type_names() {
        assert_eq!(<(i32, bool)>::signature().to_string(), "(i32, bool)");
        assert_eq!(<()>::signature().to_string(), "()");
    }
}
