//! Shared fixtures for matcher tests.
//!
//! A miniature query plan: the kind of typed node tree rewrite rules walk.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use crate::{optional_property, property, Narrow, Property};

#[derive(Clone, Debug, PartialEq)]
pub enum PlanNode {
    Scan(ScanNode),
    Filter(FilterNode),
    Limit(LimitNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScanNode {
    pub table: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterNode {
    pub predicate: String,
    pub source: Arc<PlanNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LimitNode {
    pub count: u64,
    pub source: Option<Arc<PlanNode>>,
}

impl Narrow<ScanNode> for PlanNode {
    fn narrow(&self) -> Option<ScanNode> {
        match self {
            PlanNode::Scan(scan) => Some(scan.clone()),
            _ => None,
        }
    }
}

impl Narrow<FilterNode> for PlanNode {
    fn narrow(&self) -> Option<FilterNode> {
        match self {
            PlanNode::Filter(filter) => Some(filter.clone()),
            _ => None,
        }
    }
}

impl Narrow<LimitNode> for PlanNode {
    fn narrow(&self) -> Option<LimitNode> {
        match self {
            PlanNode::Limit(limit) => Some(limit.clone()),
            _ => None,
        }
    }
}

pub fn scan(table: &str) -> PlanNode {
    PlanNode::Scan(ScanNode {
        table: table.to_string(),
    })
}

pub fn filter(predicate: &str, source: PlanNode) -> PlanNode {
    PlanNode::Filter(FilterNode {
        predicate: predicate.to_string(),
        source: Arc::new(source),
    })
}

pub fn limit(count: u64, source: Option<PlanNode>) -> PlanNode {
    PlanNode::Limit(LimitNode {
        count,
        source: source.map(Arc::new),
    })
}

/// `FilterNode::source`.
pub fn filter_source() -> Property<FilterNode, PlanNode> {
    property("source", |node: &FilterNode| (*node.source).clone())
}

/// `LimitNode::source`, absent for a bare limit.
pub fn limit_source() -> Property<LimitNode, PlanNode> {
    optional_property("source", |node: &LimitNode| {
        node.source.as_deref().cloned()
    })
}

/// Counts invocations of a predicate or accessor across clones.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn tick(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Install a test subscriber when `RUST_LOG` is set.
///
/// Safe to call from every test.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();

    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(filter)
                .try_init();
        }
    });
}
