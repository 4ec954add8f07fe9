//! Persistent capture bindings.
//!
//! `Captures` wraps an `im::HashMap`: cloning is O(1) through structural
//! sharing and `bind` returns a new map, leaving the receiver untouched, so
//! every branch of an alternation can extend the same prefix independently.
//!
//! # Invariants
//!
//! - A key appears at most once. `bind` and `merge` reject duplicates, even
//!   when the values are equal.
//! - Values are stored erased and recovered only through the typed
//!   [`Capture<T>`] that bound them.

use std::fmt;

use im::HashMap;

use crate::capture::{Capture, CaptureKey};
use crate::errors::{MatchError, MatchResult};
use crate::value::{downcast, erase, Subject, Value};

/// Immutable set of values bound along one match path.
#[derive(Clone, Default)]
pub struct Captures {
    bindings: HashMap<CaptureKey, Value>,
}

impl Captures {
    /// Captures with no bindings.
    pub fn empty() -> Self {
        Captures::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether `capture` is bound.
    pub fn contains<T>(&self, capture: &Capture<T>) -> bool {
        self.bindings.contains_key(capture.key())
    }

    /// Return a copy of these captures with `capture` bound to `value`.
    ///
    /// Fails with [`MatchError::CaptureConflict`] if `capture` is already bound.
    pub fn bind<T: Subject>(&self, capture: &Capture<T>, value: T) -> MatchResult<Captures> {
        self.bind_erased(capture.key(), erase(value))
    }

    pub(crate) fn bind_erased(&self, key: &CaptureKey, value: Value) -> MatchResult<Captures> {
        if self.bindings.contains_key(key) {
            return Err(MatchError::capture_conflict(key));
        }
        Ok(Captures {
            bindings: self.bindings.update(key.clone(), value),
        })
    }

    /// Look up the value bound to `capture`.
    ///
    /// Fails with [`MatchError::MissingCapture`] if the capture was never bound.
    pub fn get<T: Subject>(&self, capture: &Capture<T>) -> MatchResult<&T> {
        let value = self
            .bindings
            .get(capture.key())
            .ok_or_else(|| MatchError::missing_capture(capture.key()))?;
        downcast::<T>(&**value).ok_or_else(|| MatchError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    /// Combine two disjoint sets of bindings.
    ///
    /// Fails with [`MatchError::CaptureConflict`] on a key bound in both.
    pub fn merge(&self, other: &Captures) -> MatchResult<Captures> {
        if let Some(key) = other.keys().find(|key| self.bindings.contains_key(*key)) {
            return Err(MatchError::capture_conflict(key));
        }
        Ok(Captures {
            bindings: self.bindings.clone().union(other.bindings.clone()),
        })
    }

    /// Keys bound so far, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &CaptureKey> {
        self.bindings.keys()
    }
}

/// Equal when the same keys are bound to equal values.
impl PartialEq for Captures {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.bindings.iter().all(|(key, value)| {
                other
                    .bindings
                    .get(key)
                    .is_some_and(|theirs| value.dyn_eq(&**theirs))
            })
    }
}

impl fmt::Debug for Captures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
