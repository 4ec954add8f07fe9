//! The outcome of matching one value.

use crate::captures::Captures;
use crate::errors::{MatchError, MatchResult};

/// Result of evaluating a pattern against a value.
///
/// `Matched` carries the value as narrowed by the pattern, together with
/// everything the matching path captured. `NoMatch` carries nothing and is
/// never equal to a `Matched`.
#[derive(Clone, Debug, PartialEq)]
pub enum Match<T> {
    NoMatch,
    Matched { value: T, captures: Captures },
}

impl<T> Match<T> {
    #[inline]
    pub fn empty() -> Self {
        Match::NoMatch
    }

    #[inline]
    pub fn of(value: T, captures: Captures) -> Self {
        Match::Matched { value, captures }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, Match::Matched { .. })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// The matched value. Fails with [`MatchError::NotMatched`] on `NoMatch`.
    pub fn value(&self) -> MatchResult<&T> {
        match self {
            Match::Matched { value, .. } => Ok(value),
            Match::NoMatch => Err(MatchError::NotMatched),
        }
    }

    /// The captures of the matching path. Fails with
    /// [`MatchError::NotMatched`] on `NoMatch`.
    pub fn captures(&self) -> MatchResult<&Captures> {
        match self {
            Match::Matched { captures, .. } => Ok(captures),
            Match::NoMatch => Err(MatchError::NotMatched),
        }
    }

    pub fn into_value(self) -> MatchResult<T> {
        match self {
            Match::Matched { value, .. } => Ok(value),
            Match::NoMatch => Err(MatchError::NotMatched),
        }
    }

    /// Transform the value, keeping the captures.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Match<U> {
        match self {
            Match::Matched { value, captures } => Match::Matched {
                value: f(value),
                captures,
            },
            Match::NoMatch => Match::NoMatch,
        }
    }

    /// Keep the match only if `predicate` holds for its value.
    #[must_use]
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        let keep = match &self {
            Match::Matched { value, .. } => predicate(value),
            Match::NoMatch => false,
        };
        if keep {
            self
        } else {
            Match::NoMatch
        }
    }
}

impl<T> Default for Match<T> {
    fn default() -> Self {
        Match::NoMatch
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
