//! Pattern visitor.
//!
//! Read-only traversal of a pattern tree, for printing and static analysis.
//! Evaluation never goes through here; see [`crate::matcher`].
//!
//! # Design
//!
//! Mirrors the AST visitor: default `visit_*` methods call `walk_*` functions
//! that descend into children. Override a `visit_*` method to act on a step
//! and call the matching `walk_*` function to keep descending.
//!
//! # Order
//!
//! - `previous` is visited before the step itself.
//! - `With`: the step first, then its nested pattern.
//! - `Or`: alternatives in declared order.

use crate::capture::CaptureKey;
use crate::pattern::{EqualsStep, FilterStep, OrStep, PatternKind, PatternNode, TypeOfStep, WithStep};

mod collect;
mod printer;

pub use collect::CaptureCollector;
pub use printer::PatternPrinter;

/// Pattern visitor trait.
///
/// Override `visit_*` methods to add behavior at specific steps.
/// Call `walk_*` functions to continue traversal into children.
pub trait PatternVisitor<'p> {
    /// Visit a chain ending at `node`.
    fn visit_pattern(&mut self, node: &'p PatternNode) {
        walk_pattern(self, node);
    }

    fn visit_type_of(&mut self, step: &'p TypeOfStep) {
        let _ = step;
    }

    fn visit_filter(&mut self, step: &'p FilterStep) {
        let _ = step;
    }

    fn visit_equals(&mut self, step: &'p EqualsStep) {
        let _ = step;
    }

    fn visit_captured_as(&mut self, capture: &'p CaptureKey) {
        let _ = capture;
    }

    fn visit_with(&mut self, step: &'p WithStep) {
        walk_with(self, step);
    }

    fn visit_or(&mut self, step: &'p OrStep) {
        walk_or(self, step);
    }
}

/// Visit the steps before `node`, then `node` itself.
pub fn walk_pattern<'p, V: PatternVisitor<'p> + ?Sized>(visitor: &mut V, node: &'p PatternNode) {
    if let Some(previous) = node.previous() {
        visitor.visit_pattern(previous);
    }
    walk_step(visitor, node);
}

/// Dispatch on `node`'s own step, ignoring `previous`.
pub fn walk_step<'p, V: PatternVisitor<'p> + ?Sized>(visitor: &mut V, node: &'p PatternNode) {
    match node.kind() {
        PatternKind::TypeOf(step) => visitor.visit_type_of(step),
        PatternKind::Filter(step) => visitor.visit_filter(step),
        PatternKind::Equals(step) => visitor.visit_equals(step),
        PatternKind::CapturedAs(step) => visitor.visit_captured_as(step.key()),
        PatternKind::With(step) => visitor.visit_with(step),
        PatternKind::Or(step) => visitor.visit_or(step),
    }
}

pub fn walk_with<'p, V: PatternVisitor<'p> + ?Sized>(visitor: &mut V, step: &'p WithStep) {
    visitor.visit_pattern(step.nested());
}

pub fn walk_or<'p, V: PatternVisitor<'p> + ?Sized>(visitor: &mut V, step: &'p OrStep) {
    for alternative in step.alternatives() {
        visitor.visit_pattern(alternative);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
