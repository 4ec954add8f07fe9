//! Static capture analysis.

use rustc_hash::FxHashSet;

use super::PatternVisitor;
use crate::capture::CaptureKey;
use crate::pattern::Pattern;

/// Collects every capture a pattern can bind, in visitation order.
///
/// Captures inside `Or` alternatives are included even though a single
/// match binds only those on its own path.
#[derive(Default)]
pub struct CaptureCollector {
    keys: Vec<CaptureKey>,
    seen: FxHashSet<CaptureKey>,
}

impl CaptureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_keys(self) -> Vec<CaptureKey> {
        self.keys
    }
}

impl<'p> PatternVisitor<'p> for CaptureCollector {
    fn visit_captured_as(&mut self, capture: &'p CaptureKey) {
        if self.seen.insert(capture.clone()) {
            self.keys.push(capture.clone());
        }
    }
}

impl<T> Pattern<T> {
    /// Captures this pattern can bind, deduplicated, in visitation order.
    pub fn capture_keys(&self) -> Vec<CaptureKey> {
        let mut collector = CaptureCollector::new();
        collector.visit_pattern(self.node());
        collector.into_keys()
    }
}
