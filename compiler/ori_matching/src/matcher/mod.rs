//! Pattern evaluation.
//!
//! Evaluation walks the `previous` chain bottom-up and produces a lazy
//! sequence of successes. Each step turns one `(value, captures)` pair into
//! zero or more pairs:
//!
//! | Step         | Yields                                                   |
//! |--------------|----------------------------------------------------------|
//! | `TypeOf`     | the narrowed value, if narrowing succeeds                |
//! | `Filter`     | the value, if the predicate holds                        |
//! | `Equals`     | the value, if equal to the expected one                  |
//! | `CapturedAs` | the value, with the capture bound, if it has its type    |
//! | `With`       | the value, once per success of the nested pattern        |
//! | `Or`         | the concatenation of every alternative's results         |
//!
//! Nothing runs until the caller pulls. A step's closures are only invoked
//! for prefixes that succeeded, and later `Or` alternatives are only tried
//! once earlier ones are exhausted, so taking the first match does the
//! minimum amount of work.

use std::any;
use std::iter;
use std::marker::PhantomData;

use crate::captures::Captures;
use crate::errors::{MatchError, MatchResult};
use crate::match_result::Match;
use crate::pattern::{Pattern, PatternKind, PatternNode};
use crate::value::{downcast, erase, Subject, Value};

/// A value that survived a prefix of the chain, with what it captured.
type Step = (Value, Captures);

type Steps<'p> = Box<dyn Iterator<Item = MatchResult<Step>> + 'p>;

/// Evaluate `pattern` against `input`.
///
/// Returns a lazy iterator over every way the pattern matches, in
/// deterministic order. Errors are yielded in place of the result they
/// interrupted.
pub fn match_pattern<T: Subject, V: Subject>(pattern: &Pattern<T>, input: V) -> Matches<'_, T> {
    tracing::trace!(
        %pattern,
        input = any::type_name::<V>(),
        "matching pattern"
    );
    Matches {
        steps: evaluate(pattern.node(), erase(input), Captures::empty()),
        failed: false,
        _marker: PhantomData,
    }
}

/// The first match of `pattern` against `input`, or [`Match::NoMatch`].
pub fn first_match<T: Subject, V: Subject>(pattern: &Pattern<T>, input: V) -> MatchResult<Match<T>> {
    match_pattern(pattern, input)
        .next()
        .unwrap_or(Ok(Match::NoMatch))
}

/// Whether `pattern` matches `input` at least once.
pub fn is_match<T: Subject, V: Subject>(pattern: &Pattern<T>, input: V) -> MatchResult<bool> {
    first_match(pattern, input).map(|found| found.is_present())
}

impl<T: Subject> Pattern<T> {
    /// See [`match_pattern`].
    pub fn matches<V: Subject>(&self, input: V) -> Matches<'_, T> {
        match_pattern(self, input)
    }

    /// See [`first_match`].
    pub fn first_match<V: Subject>(&self, input: V) -> MatchResult<Match<T>> {
        first_match(self, input)
    }
}

/// Lazy sequence of matches produced by [`match_pattern`].
///
/// Every `Ok` item is a present [`Match`]. Errors are fatal: after the first
/// `Err` the iterator is exhausted. Dropping the iterator abandons the
/// remaining work.
pub struct Matches<'p, T> {
    steps: Steps<'p>,
    failed: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Subject> Iterator for Matches<'_, T> {
    type Item = MatchResult<Match<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.steps.next()?.and_then(|(value, captures)| {
            let value = downcast::<T>(&*value)
                .cloned()
                .ok_or_else(|| MatchError::TypeMismatch {
                    expected: any::type_name::<T>(),
                    found: value.type_name(),
                })?;
            Ok(Match::of(value, captures))
        });
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}

/// Evaluate the chain ending at `node`, starting from `value` and `captures`.
fn evaluate(node: &PatternNode, value: Value, captures: Captures) -> Steps<'_> {
    match node.previous() {
        None => Box::new(iter::once_with(move || apply(node, value, captures)).flatten()),
        Some(previous) => Box::new(evaluate(previous, value, captures).flat_map(
            move |step| match step {
                Ok((value, captures)) => apply(node, value, captures),
                Err(err) => fail(err),
            },
        )),
    }
}

/// Apply `node`'s own rule to one value.
fn apply(node: &PatternNode, value: Value, captures: Captures) -> Steps<'_> {
    match node.kind() {
        PatternKind::TypeOf(step) => match (step.narrow)(&value) {
            Some(narrowed) => succeed(narrowed, captures),
            None => none(),
        },
        PatternKind::Filter(step) => match (step.predicate)(&*value) {
            Ok(true) => succeed(value, captures),
            Ok(false) => none(),
            Err(source) => fail(MatchError::callback(source)),
        },
        PatternKind::Equals(step) => {
            if value.dyn_eq(&*step.expected) {
                succeed(value, captures)
            } else {
                none()
            }
        }
        PatternKind::CapturedAs(step) => {
            if !(step.accepts)(&*value) {
                return none();
            }
            match captures.bind_erased(step.key(), value.clone()) {
                Ok(captures) => succeed(value, captures),
                Err(err) => fail(err),
            }
        }
        PatternKind::With(step) => match (step.accessor)(&*value) {
            Ok(Some(sub)) => Box::new(evaluate(step.nested(), sub, Captures::empty()).map(
                move |nested: MatchResult<Step>| -> MatchResult<Step> {
                    let (_, inner) = nested?;
                    Ok((value.clone(), captures.merge(&inner)?))
                },
            )),
            Ok(None) => none(),
            Err(source) => fail(MatchError::callback(source)),
        },
        PatternKind::Or(step) => Box::new(
            step.alternatives()
                .flat_map(move |alternative| evaluate(alternative, value.clone(), captures.clone())),
        ),
    }
}

#[inline]
fn succeed<'p>(value: Value, captures: Captures) -> Steps<'p> {
    Box::new(iter::once(Ok((value, captures))))
}

#[inline]
fn none<'p>() -> Steps<'p> {
    Box::new(iter::empty())
}

#[inline]
fn fail<'p>(err: MatchError) -> Steps<'p> {
    Box::new(iter::once(Err(err)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
