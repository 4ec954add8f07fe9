//! Ori Matching - structural pattern matching for rewrite rules.
//!
//! This crate provides:
//! - Pattern combinators (`type_of`, `matching`, `equal_to`, `captured_as`, `with`, `or`)
//! - A lazy matcher producing every way a pattern matches a value
//! - Typed captures for pulling sub-values out of a successful match
//! - A visitor for printing and analyzing patterns
//!
//! # Example
//!
//! ```text
//! let child = Capture::<PlanNode>::named("child");
//! let pattern = type_of::<PlanNode>()
//!     .type_of::<FilterNode>()
//!     .with_property(source().captured_as(&child));
//!
//! if let Some(found) = pattern.matches(node).next() {
//!     let found = found?;
//!     let child = found.captures()?.get(&child)?;
//!     // rewrite...
//! }
//! ```
//!
//! # Architecture
//!
//! Patterns are immutable `Arc`-linked chains of steps. The matcher walks a
//! chain bottom-up and yields results on demand, so rules that only need the
//! first match never evaluate the rest. Values are type-erased between steps
//! and recovered with checked downcasts; the public API stays fully typed.

mod capture;
mod captures;
mod errors;
mod match_result;
pub mod matcher;
mod narrow;
pub mod pattern;
mod value;
pub mod visitor;

#[cfg(test)]
mod test_helpers;

pub use capture::{Capture, CaptureKey};
pub use captures::Captures;
pub use errors::{BoxError, MatchError, MatchResult};
pub use match_result::Match;
pub use matcher::{first_match, is_match, match_pattern, Matches};
pub use narrow::Narrow;
pub use pattern::{
    captured_as, equal_to, matching, optional_property, or, property, try_matching, try_with,
    type_of, with, Pattern, Property, PropertyPattern,
};
pub use value::Subject;
pub use visitor::{PatternPrinter, PatternVisitor};
