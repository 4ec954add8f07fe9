//! Pattern combinators.
//!
//! A [`Pattern<T>`] is an immutable chain of steps. Each combinator returns a
//! new pattern whose `previous` link points at the receiver, so a chain reads
//! left to right as a conjunction over progressively narrowed values:
//!
//! ```text
//! type_of::<PlanNode>()
//!     .type_of::<FilterNode>()
//!     .with_property(source().matching(type_of::<PlanNode>().captured_as(&child)))
//! ```
//!
//! # Sharing
//!
//! Nodes are reference counted and never mutated after construction. Any
//! pattern may serve as the prefix of many chains and be evaluated from many
//! threads at once.
//!
//! # Roots
//!
//! The free functions ([`type_of`], [`matching`], [`equal_to`], ...) build
//! patterns with no `previous`. A root step evaluated against an input that is
//! not a `T` does not match.

use std::any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::capture::{Capture, CaptureKey};
use crate::errors::{BoxError, MatchError, MatchResult};
use crate::narrow::Narrow;
use crate::value::{downcast, erase, ErasedValue, Subject, Value};

mod property;

pub use property::{optional_property, property, Property, PropertyPattern};

type NarrowFn = dyn Fn(&Value) -> Option<Value> + Send + Sync;
type PredicateFn = dyn Fn(&dyn ErasedValue) -> Result<bool, BoxError> + Send + Sync;
type AccessorFn = dyn Fn(&dyn ErasedValue) -> Result<Option<Value>, BoxError> + Send + Sync;

/// One step of a pattern chain.
pub struct PatternNode {
    kind: PatternKind,
    previous: Option<Arc<PatternNode>>,
}

impl PatternNode {
    #[inline]
    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// The step evaluated before this one, if any.
    #[inline]
    pub fn previous(&self) -> Option<&PatternNode> {
        self.previous.as_deref()
    }
}

/// What a single step checks.
pub enum PatternKind {
    /// Succeeds if the value narrows to the target type.
    TypeOf(TypeOfStep),
    /// Succeeds if the predicate holds. Does not narrow.
    Filter(FilterStep),
    /// Succeeds if the value equals the expected one.
    Equals(EqualsStep),
    /// Binds the value to the capture if it has the capture's type.
    CapturedAs(CapturedAsStep),
    /// Matches a nested pattern against an extracted sub-value.
    With(WithStep),
    /// Succeeds once per succeeding alternative, in order.
    Or(OrStep),
}

pub struct TypeOfStep {
    target: &'static str,
    pub(crate) narrow: Box<NarrowFn>,
}

impl TypeOfStep {
    /// Full type name of the narrowing target.
    pub fn target(&self) -> &'static str {
        self.target
    }
}

pub struct FilterStep {
    pub(crate) predicate: Box<PredicateFn>,
}

pub struct EqualsStep {
    pub(crate) expected: Value,
}

impl EqualsStep {
    pub fn expected_type(&self) -> &'static str {
        self.expected.type_name()
    }
}

impl fmt::Debug for EqualsStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.expected, f)
    }
}

pub struct CapturedAsStep {
    key: CaptureKey,
    pub(crate) accepts: fn(&dyn ErasedValue) -> bool,
}

impl CapturedAsStep {
    pub fn key(&self) -> &CaptureKey {
        &self.key
    }
}

pub struct WithStep {
    property: Option<Arc<str>>,
    pub(crate) accessor: Box<AccessorFn>,
    nested: Arc<PatternNode>,
}

impl WithStep {
    /// Name of the property, for steps built from a [`Property`].
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// The pattern applied to the extracted sub-value.
    pub fn nested(&self) -> &PatternNode {
        &self.nested
    }
}

pub struct OrStep {
    alternatives: Vec<Arc<PatternNode>>,
}

impl OrStep {
    /// Alternatives in declared order. Never empty.
    pub fn alternatives(&self) -> impl ExactSizeIterator<Item = &PatternNode> {
        self.alternatives.iter().map(|alternative| &**alternative)
    }
}

/// Immutable, shareable description of a matching condition over `T`.
pub struct Pattern<T> {
    node: Arc<PatternNode>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Pattern<T> {
    fn clone(&self) -> Self {
        Pattern {
            node: Arc::clone(&self.node),
            _marker: PhantomData,
        }
    }
}

impl<T> Pattern<T> {
    fn from_node(node: PatternNode) -> Self {
        Pattern {
            node: Arc::new(node),
            _marker: PhantomData,
        }
    }

    fn root(kind: PatternKind) -> Self {
        Self::from_node(PatternNode {
            kind,
            previous: None,
        })
    }

    fn then<U>(&self, kind: PatternKind) -> Pattern<U> {
        Pattern::from_node(PatternNode {
            kind,
            previous: Some(Arc::clone(&self.node)),
        })
    }

    /// The last step of the chain.
    #[inline]
    pub fn node(&self) -> &PatternNode {
        &self.node
    }

    #[inline]
    pub fn previous(&self) -> Option<&PatternNode> {
        self.node.previous()
    }
}

impl<T: Subject> Pattern<T> {
    /// Narrow the current value to `S`.
    #[must_use]
    pub fn type_of<S: Subject>(&self) -> Pattern<S>
    where
        T: Narrow<S>,
    {
        self.then(narrowing_kind::<T, S>())
    }

    /// Keep values for which `predicate` holds.
    ///
    /// The predicate must be pure; panics inside it unwind through the matcher.
    #[must_use]
    pub fn matching<F>(&self, predicate: F) -> Pattern<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.then(filter_kind(move |value: &T| Ok(predicate(value))))
    }

    /// Like [`matching`](Self::matching), but an `Err` from the predicate
    /// aborts evaluation with [`MatchError::Callback`].
    #[must_use]
    pub fn try_matching<F, E>(&self, predicate: F) -> Pattern<T>
    where
        F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.then(filter_kind(move |value: &T| {
            predicate(value).map_err(Into::into)
        }))
    }

    /// Keep values equal to `expected`.
    #[must_use]
    pub fn equal_to(&self, expected: T) -> Pattern<T> {
        self.then(equals_kind(expected))
    }

    /// Bind the current value to `capture`.
    #[must_use]
    pub fn captured_as(&self, capture: &Capture<T>) -> Pattern<T> {
        self.then(captured_as_kind(capture))
    }

    /// Match `nested` against the sub-value produced by `accessor`.
    ///
    /// Does not match when the accessor returns `None`. On success the
    /// current value, not the sub-value, flows on. `nested` is rooted at the
    /// sub-value; its own output type `R` stays internal to it.
    #[must_use]
    pub fn with<S, R, F>(&self, accessor: F, nested: Pattern<R>) -> Pattern<T>
    where
        S: Subject,
        F: Fn(&T) -> Option<S> + Send + Sync + 'static,
    {
        self.then(with_kind(None, move |value: &T| Ok(accessor(value)), &nested))
    }

    /// Like [`with`](Self::with) with a fallible accessor.
    #[must_use]
    pub fn try_with<S, R, F, E>(&self, accessor: F, nested: Pattern<R>) -> Pattern<T>
    where
        S: Subject,
        F: Fn(&T) -> Result<Option<S>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.then(with_kind(
            None,
            move |value: &T| accessor(value).map_err(Into::into),
            &nested,
        ))
    }

    /// Match a named property; see [`Property`].
    #[must_use]
    pub fn with_property(&self, property: PropertyPattern<T>) -> Pattern<T> {
        self.then(property.into_kind())
    }

    /// Succeed once for each alternative that matches the current value.
    ///
    /// Fails with [`MatchError::InvalidPattern`] if `alternatives` is empty.
    pub fn or<I>(&self, alternatives: I) -> MatchResult<Pattern<T>>
    where
        I: IntoIterator<Item = Pattern<T>>,
    {
        Ok(self.then(or_kind(alternatives)?))
    }
}

/// Root pattern matching any input of type `T`.
pub fn type_of<T: Subject>() -> Pattern<T> {
    Pattern::root(PatternKind::TypeOf(TypeOfStep {
        target: any::type_name::<T>(),
        narrow: Box::new(|value: &Value| downcast::<T>(&**value).map(|_| Arc::clone(value))),
    }))
}

pub fn matching<T, F>(predicate: F) -> Pattern<T>
where
    T: Subject,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Pattern::root(filter_kind(move |value: &T| Ok(predicate(value))))
}

pub fn try_matching<T, F, E>(predicate: F) -> Pattern<T>
where
    T: Subject,
    F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Pattern::root(filter_kind(move |value: &T| {
        predicate(value).map_err(Into::into)
    }))
}

pub fn equal_to<T: Subject>(expected: T) -> Pattern<T> {
    Pattern::root(equals_kind(expected))
}

pub fn captured_as<T: Subject>(capture: &Capture<T>) -> Pattern<T> {
    Pattern::root(captured_as_kind(capture))
}

pub fn with<T, S, R, F>(accessor: F, nested: Pattern<R>) -> Pattern<T>
where
    T: Subject,
    S: Subject,
    F: Fn(&T) -> Option<S> + Send + Sync + 'static,
{
    Pattern::root(with_kind(None, move |value: &T| Ok(accessor(value)), &nested))
}

pub fn try_with<T, S, R, F, E>(accessor: F, nested: Pattern<R>) -> Pattern<T>
where
    T: Subject,
    S: Subject,
    F: Fn(&T) -> Result<Option<S>, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    Pattern::root(with_kind(
        None,
        move |value: &T| accessor(value).map_err(Into::into),
        &nested,
    ))
}

pub fn or<T, I>(alternatives: I) -> MatchResult<Pattern<T>>
where
    T: Subject,
    I: IntoIterator<Item = Pattern<T>>,
{
    Ok(Pattern::root(or_kind(alternatives)?))
}

// Step construction. Each closure downcasts its erased input back to the
// type the step was built for; a failed downcast only happens at a root
// applied to a foreign input, and means "no match".

fn narrowing_kind<T, S>() -> PatternKind
where
    T: Subject + Narrow<S>,
    S: Subject,
{
    PatternKind::TypeOf(TypeOfStep {
        target: any::type_name::<S>(),
        narrow: Box::new(|value: &Value| {
            downcast::<T>(&**value)
                .and_then(<T as Narrow<S>>::narrow)
                .map(erase)
        }),
    })
}

fn filter_kind<T, F>(predicate: F) -> PatternKind
where
    T: Subject,
    F: Fn(&T) -> Result<bool, BoxError> + Send + Sync + 'static,
{
    PatternKind::Filter(FilterStep {
        predicate: Box::new(move |value: &dyn ErasedValue| match downcast::<T>(value) {
            Some(value) => predicate(value),
            None => Ok(false),
        }),
    })
}

fn equals_kind<T: Subject>(expected: T) -> PatternKind {
    PatternKind::Equals(EqualsStep {
        expected: erase(expected),
    })
}

fn captured_as_kind<T: Subject>(capture: &Capture<T>) -> PatternKind {
    PatternKind::CapturedAs(CapturedAsStep {
        key: capture.key().clone(),
        accepts: |value| downcast::<T>(value).is_some(),
    })
}

fn with_kind<T, S, R, F>(
    property: Option<Arc<str>>,
    accessor: F,
    nested: &Pattern<R>,
) -> PatternKind
where
    T: Subject,
    S: Subject,
    F: Fn(&T) -> Result<Option<S>, BoxError> + Send + Sync + 'static,
{
    PatternKind::With(WithStep {
        property,
        accessor: Box::new(move |value: &dyn ErasedValue| match downcast::<T>(value) {
            Some(value) => Ok(accessor(value)?.map(erase)),
            None => Ok(None),
        }),
        nested: Arc::clone(&nested.node),
    })
}

fn or_kind<T, I>(alternatives: I) -> MatchResult<PatternKind>
where
    I: IntoIterator<Item = Pattern<T>>,
{
    let alternatives: Vec<_> = alternatives
        .into_iter()
        .map(|alternative| alternative.node)
        .collect();
    if alternatives.is_empty() {
        return Err(MatchError::invalid_pattern(
            "or() requires at least one alternative",
        ));
    }
    Ok(PatternKind::Or(OrStep { alternatives }))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
