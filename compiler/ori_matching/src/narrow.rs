//! Type narrowing for `type_of` steps.

/// Checked conversion from a wide type to a more specific one.
///
/// Implemented by node types for each variant a rule may want to match on.
/// `narrow` must return `None` whenever `self` is not an `S`; the matcher
/// never narrows without it.
///
/// ```text
/// impl Narrow<FilterNode> for PlanNode {
///     fn narrow(&self) -> Option<FilterNode> {
///         match self {
///             PlanNode::Filter(filter) => Some(filter.clone()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Narrow<S> {
    fn narrow(&self) -> Option<S>;
}
