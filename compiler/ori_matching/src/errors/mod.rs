//! Error types for pattern construction and matching.
//!
//! Every error here is a caller defect rather than a runtime condition:
//! the engine performs no retries and never turns an error into a no-match.
//!
//! # Categories
//!
//! - Construction: [`MatchError::InvalidPattern`]
//! - Evaluation: [`MatchError::CaptureConflict`], [`MatchError::Callback`]
//! - Result inspection: [`MatchError::NotMatched`], [`MatchError::MissingCapture`]

use std::error::Error;

/// Error type returned by fallible predicates and accessors.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors raised while building or evaluating patterns.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The pattern could not be built (e.g. `or` with no alternatives).
    #[error("invalid pattern: {reason}")]
    InvalidPattern { reason: String },

    /// A capture was bound twice on a single match path.
    #[error("capture {capture} is already bound")]
    CaptureConflict { capture: String },

    /// `value()` or `captures()` was called on an empty match.
    #[error("no value present: the pattern did not match")]
    NotMatched,

    /// A capture was looked up that the matching path never bound.
    #[error("capture {capture} was not bound by the pattern that produced this match")]
    MissingCapture { capture: String },

    /// A caller-supplied predicate or accessor failed.
    #[error("predicate or accessor failed: {source}")]
    Callback {
        #[source]
        source: BoxError,
    },

    /// An erased value reached a typed boundary with the wrong type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl MatchError {
    pub(crate) fn invalid_pattern(reason: impl Into<String>) -> Self {
        MatchError::InvalidPattern {
            reason: reason.into(),
        }
    }

    pub(crate) fn capture_conflict(capture: impl ToString) -> Self {
        let capture = capture.to_string();
        tracing::debug!(%capture, "capture bound twice on one match path");
        MatchError::CaptureConflict { capture }
    }

    pub(crate) fn missing_capture(capture: impl ToString) -> Self {
        MatchError::MissingCapture {
            capture: capture.to_string(),
        }
    }

    pub(crate) fn callback(source: impl Into<BoxError>) -> Self {
        MatchError::Callback {
            source: source.into(),
        }
    }

    /// Whether this error signals a defect in how the pattern was written,
    /// as opposed to a failure inside caller-supplied code.
    pub fn is_pattern_defect(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidPattern { .. } | MatchError::CaptureConflict { .. }
        )
    }
}

#[cfg(test)]
mod tests;
