//! Values flowing through the matcher.
//!
//! Patterns are statically typed at the API (`Pattern<T>`), but a chain mixes
//! many types as it narrows, so the engine moves values around type-erased.
//! Every erasure happens behind a typed constructor, and every recovery is a
//! checked downcast.

use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// Values that can be matched, narrowed to, and captured.
///
/// Blanket-implemented; node types only need the usual derives
/// (`Clone`, `PartialEq`, `Debug`) and to be `Send + Sync + 'static`.
pub trait Subject: Any + Clone + PartialEq + fmt::Debug + Send + Sync {}

impl<T> Subject for T where T: Any + Clone + PartialEq + fmt::Debug + Send + Sync {}

/// Object-safe view of a [`Subject`].
pub(crate) trait ErasedValue: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool;

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn type_name(&self) -> &'static str;
}

impl<T: Subject> ErasedValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn ErasedValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

impl fmt::Debug for dyn ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dyn_fmt(f)
    }
}

/// Shared, type-erased value.
pub(crate) type Value = Arc<dyn ErasedValue>;

#[inline]
pub(crate) fn erase<T: Subject>(value: T) -> Value {
    Arc::new(value)
}

#[inline]
pub(crate) fn downcast<T: Subject>(value: &dyn ErasedValue) -> Option<&T> {
    value.as_any().downcast_ref::<T>()
}
