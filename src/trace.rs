//! Walk instrumentation for debugging lookup behavior.
//!
//! A [`WalkTrace`] captures what the matcher did on one lookup: how much
//! of the tree it touched, how much pruning saved, and how often the
//! engine was consulted. The counters are cheap enough to maintain
//! unconditionally; [`Router::find_url_traced`](crate::Router::find_url_traced)
//! exposes them.

/// Counters for a single lookup.
///
/// `result` always equals the sequence of the route the plain lookup
/// would return for the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkTrace {
    /// Tree nodes entered, counting repeated visits under backtracking.
    pub nodes_visited: usize,
    /// Subtrees skipped because `min_sequence` could not beat the
    /// candidate already held.
    pub subtrees_pruned: usize,
    /// Candidate patterns vetted with the engine's `test`.
    pub candidates_tested: usize,
    /// Candidates the engine refused; the tree over-accepted these.
    pub candidates_rejected: usize,
    /// Whether the walk-step budget ran out (the lookup then reports no
    /// match).
    pub budget_exhausted: bool,
    /// Sequence of the winning route, if any.
    pub result: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trace_is_empty() {
        let trace = WalkTrace::default();
        assert_eq!(trace.nodes_visited, 0);
        assert_eq!(trace.result, None);
        assert!(!trace.budget_exhausted);
    }
}
