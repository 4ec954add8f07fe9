//! Pattern printing.
//!
//! Renders a pattern in the same combinator syntax used to build it:
//!
//! ```text
//! type_of(PlanNode).type_of(FilterNode).with(source, type_of(PlanNode).captured_as(@child))
//! ```

use std::fmt::{self, Write};

use super::{walk_step, walk_with, PatternVisitor};
use crate::capture::CaptureKey;
use crate::pattern::{EqualsStep, FilterStep, OrStep, Pattern, PatternNode, TypeOfStep, WithStep};

/// Visitor that renders a pattern as a single line.
#[derive(Default)]
pub struct PatternPrinter {
    out: String,
}

impl PatternPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the chain ending at `node`.
    pub fn print(node: &PatternNode) -> String {
        let mut printer = PatternPrinter::new();
        printer.visit_pattern(node);
        printer.out
    }
}

impl<'p> PatternVisitor<'p> for PatternPrinter {
    fn visit_pattern(&mut self, node: &'p PatternNode) {
        if let Some(previous) = node.previous() {
            self.visit_pattern(previous);
            self.out.push('.');
        }
        walk_step(self, node);
    }

    fn visit_type_of(&mut self, step: &'p TypeOfStep) {
        self.out.push_str("type_of(");
        self.out.push_str(&short_type_name(step.target()));
        self.out.push(')');
    }

    fn visit_filter(&mut self, _step: &'p FilterStep) {
        self.out.push_str("matching(..)");
    }

    fn visit_equals(&mut self, step: &'p EqualsStep) {
        // Writing to a String never fails.
        let _ = write!(self.out, "equal_to({step:?})");
    }

    fn visit_captured_as(&mut self, capture: &'p CaptureKey) {
        let _ = write!(self.out, "captured_as({capture})");
    }

    fn visit_with(&mut self, step: &'p WithStep) {
        self.out.push_str("with(");
        if let Some(property) = step.property() {
            self.out.push_str(property);
            self.out.push_str(", ");
        }
        walk_with(self, step);
        self.out.push(')');
    }

    fn visit_or(&mut self, step: &'p OrStep) {
        self.out.push_str("or(");
        for (index, alternative) in step.alternatives().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.visit_pattern(alternative);
        }
        self.out.push(')');
    }
}

impl<T> fmt::Display for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PatternPrinter::print(self.node()))
    }
}

impl<T> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}

/// Strip module paths from a type name, generics included.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut rest = full;
    while let Some(pos) = rest.find("::") {
        out.push_str(&rest[..pos]);
        let kept = out
            .trim_end_matches(|c: char| c.is_alphanumeric() || c == '_')
            .len();
        out.truncate(kept);
        rest = &rest[pos + "::".len()..];
    }
    out.push_str(rest);
    out
}
