use pretty_assertions::assert_eq;

use super::printer::short_type_name;
use super::*;
use crate::capture::Capture;
use crate::pattern::{equal_to, matching, or, type_of, with, Pattern};
use crate::test_helpers::{filter_source, FilterNode, PlanNode};

/// Records the order in which steps are visited.
#[derive(Default)]
struct Trace {
    events: Vec<String>,
}

impl<'p> PatternVisitor<'p> for Trace {
    fn visit_type_of(&mut self, step: &'p TypeOfStep) {
        self.events
            .push(format!("type_of {}", short_type_name(step.target())));
    }

    fn visit_filter(&mut self, _step: &'p FilterStep) {
        self.events.push("filter".to_string());
    }

    fn visit_equals(&mut self, step: &'p EqualsStep) {
        self.events.push(format!("equals {step:?}"));
    }

    fn visit_captured_as(&mut self, capture: &'p CaptureKey) {
        self.events.push(format!("capture {capture}"));
    }

    fn visit_with(&mut self, step: &'p WithStep) {
        self.events
            .push(format!("with {}", step.property().unwrap_or("_")));
        walk_with(self, step);
    }

    fn visit_or(&mut self, step: &'p OrStep) {
        self.events.push("or".to_string());
        walk_or(self, step);
    }
}

fn trace<T>(pattern: &Pattern<T>) -> Vec<String> {
    let mut trace = Trace::default();
    trace.visit_pattern(pattern.node());
    trace.events
}

#[test]
fn previous_is_visited_first() {
    let pattern = type_of::<PlanNode>()
        .type_of::<FilterNode>()
        .matching(|node: &FilterNode| !node.predicate.is_empty());

    assert_eq!(
        trace(&pattern),
        ["type_of PlanNode", "type_of FilterNode", "filter"]
    );
}

#[test]
fn with_visits_nested_after_itself() {
    let child: Capture<PlanNode> = Capture::named("child");
    let pattern = type_of::<PlanNode>()
        .type_of::<FilterNode>()
        .with_property(filter_source().matching(type_of::<PlanNode>().captured_as(&child)))
        .matching(|_: &FilterNode| true);

    assert_eq!(
        trace(&pattern),
        [
            "type_of PlanNode",
            "type_of FilterNode",
            "with source",
            "type_of PlanNode",
            "capture @child",
            "filter",
        ]
    );
}

#[test]
fn or_visits_alternatives_in_order() {
    let pattern = type_of::<i64>()
        .or([equal_to(1), equal_to(2), matching(|n: &i64| *n > 2)])
        .unwrap();

    assert_eq!(
        trace(&pattern),
        ["type_of i64", "or", "equals 1", "equals 2", "filter"]
    );
}

#[test]
fn print_chain() {
    let child: Capture<PlanNode> = Capture::named("child");
    let pattern = type_of::<PlanNode>()
        .type_of::<FilterNode>()
        .with_property(filter_source().matching(type_of::<PlanNode>().captured_as(&child)));

    assert_eq!(
        pattern.to_string(),
        "type_of(PlanNode).type_of(FilterNode).with(source, type_of(PlanNode).captured_as(@child))"
    );
}

#[test]
fn print_or_and_filters() {
    let pattern = or([equal_to(1_i64), matching(|n: &i64| *n > 1)]).unwrap();
    assert_eq!(pattern.to_string(), "or(equal_to(1), matching(..))");
}

#[test]
fn print_anonymous_with() {
    let pattern = with(|pair: &(i64, i64)| Some(pair.0), equal_to("x".to_string()));
    assert_eq!(pattern.to_string(), r#"with(equal_to("x"))"#);
    assert_eq!(format!("{pattern:?}"), r#"Pattern(with(equal_to("x")))"#);
}

#[test]
fn printer_renders_node() {
    let pattern = type_of::<Option<String>>();
    assert_eq!(PatternPrinter::print(pattern.node()), "type_of(Option<String>)");
}

#[test]
fn short_type_names() {
    assert_eq!(short_type_name("alloc::string::String"), "String");
    assert_eq!(
        short_type_name("core::option::Option<alloc::string::String>"),
        "Option<String>"
    );
    assert_eq!(short_type_name("(i64, &str)"), "(i64, &str)");
    assert_eq!(
        short_type_name("std::collections::HashMap<u8, alloc::vec::Vec<u8>>"),
        "HashMap<u8, Vec<u8>>"
    );
}

#[test]
fn collects_capture_keys_once_in_order() {
    let outer: Capture<FilterNode> = Capture::named("outer");
    let child: Capture<PlanNode> = Capture::named("child");
    let pattern = type_of::<PlanNode>()
        .type_of::<FilterNode>()
        .captured_as(&outer)
        .with_property(filter_source().captured_as(&child))
        .or([
            crate::pattern::captured_as(&outer),
            matching(|_: &FilterNode| true),
        ])
        .unwrap();

    let keys = pattern.capture_keys();
    assert_eq!(keys, vec![outer.key().clone(), child.key().clone()]);
}

#[test]
fn pattern_without_captures_collects_nothing() {
    assert!(type_of::<i64>().equal_to(1).capture_keys().is_empty());
}
