//! Named accessors for `with` steps.
//!
//! A [`Property`] pairs an accessor with a name so printed patterns read
//! `with(source)` instead of an anonymous accessor. Properties are defined
//! once next to the node types and reused by every rule.

use std::marker::PhantomData;
use std::sync::Arc;

use super::{captured_as, equal_to, matching, with_kind, Pattern, PatternKind};
use crate::capture::Capture;
use crate::value::Subject;

type Getter<T, S> = dyn Fn(&T) -> Option<S> + Send + Sync;

/// A named, possibly absent, sub-value of `T`.
pub struct Property<T, S> {
    name: Arc<str>,
    getter: Arc<Getter<T, S>>,
}

impl<T, S> Clone for Property<T, S> {
    fn clone(&self) -> Self {
        Property {
            name: Arc::clone(&self.name),
            getter: Arc::clone(&self.getter),
        }
    }
}

/// A property that is always present.
pub fn property<T, S, F>(name: &str, getter: F) -> Property<T, S>
where
    T: Subject,
    S: Subject,
    F: Fn(&T) -> S + Send + Sync + 'static,
{
    Property {
        name: Arc::from(name),
        getter: Arc::new(move |value: &T| Some(getter(value))),
    }
}

/// A property that may be absent; patterns over it fail when it is.
pub fn optional_property<T, S, F>(name: &str, getter: F) -> Property<T, S>
where
    T: Subject,
    S: Subject,
    F: Fn(&T) -> Option<S> + Send + Sync + 'static,
{
    Property {
        name: Arc::from(name),
        getter: Arc::new(getter),
    }
}

impl<T: Subject, S: Subject> Property<T, S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Match `nested` against this property.
    pub fn matching<R>(&self, nested: Pattern<R>) -> PropertyPattern<T> {
        let getter = Arc::clone(&self.getter);
        PropertyPattern::new(with_kind(
            Some(Arc::clone(&self.name)),
            move |value: &T| Ok(getter(value)),
            &nested,
        ))
    }

    /// Match when the property satisfies `predicate`.
    pub fn satisfies<F>(&self, predicate: F) -> PropertyPattern<T>
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.matching(matching(predicate))
    }

    /// Match when the property equals `expected`.
    pub fn equal_to(&self, expected: S) -> PropertyPattern<T> {
        self.matching(equal_to(expected))
    }

    /// Bind the property to `capture`.
    pub fn captured_as(&self, capture: &Capture<S>) -> PropertyPattern<T> {
        self.matching(captured_as(capture))
    }
}

impl<T: Subject, U: Subject> Property<T, Option<U>> {
    pub fn empty(&self) -> PropertyPattern<T> {
        self.satisfies(Option::is_none)
    }

    pub fn non_empty(&self) -> PropertyPattern<T> {
        self.satisfies(Option::is_some)
    }
}

impl<T: Subject, U: Subject> Property<T, Vec<U>> {
    pub fn empty(&self) -> PropertyPattern<T> {
        self.satisfies(Vec::is_empty)
    }

    pub fn non_empty(&self) -> PropertyPattern<T> {
        self.satisfies(|items: &Vec<U>| !items.is_empty())
    }
}

/// A property together with the pattern its value must match.
///
/// Attach to a chain with [`Pattern::with_property`].
pub struct PropertyPattern<T> {
    kind: PatternKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PropertyPattern<T> {
    fn new(kind: PatternKind) -> Self {
        PropertyPattern {
            kind,
            _marker: PhantomData,
        }
    }

    pub(super) fn into_kind(self) -> PatternKind {
        self.kind
    }
}
