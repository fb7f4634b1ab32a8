//! The tree walk: URL components against pattern parts.
//!
//! The walk answers one question per lookup: which reachable route has
//! the lowest registration sequence and survives engine confirmation?
//! Everything else here serves that question cheaply:
//!
//! - Children are explored before a node's own terminating patterns,
//!   because a deeper subtree can hold an earlier-registered route.
//! - A subtree whose `min_sequence` cannot beat the candidate in hand is
//!   skipped entirely; that one comparison is what makes large route
//!   tables affordable.
//! - Wildcard nodes enumerate consumption lengths and recurse per
//!   length. Enumeration continues past a confirmed candidate until the
//!   node's whole subtree is proven unable to improve, since a different
//!   consumption length can reach an earlier-registered route. A
//!   walk-step budget bounds pathological fanout.
//!
//! The tree is allowed to over-accept; every candidate is vetted with
//! the engine's `test` before it can become the answer. It must never
//! under-accept, so wherever repetition semantics are ambiguous the
//! consumption rules below generate more candidate positions, not fewer.

use regex::Regex;
use url::Url;

use crate::engine;
use crate::part::{Modifier, UrlComponent};
use crate::router::Route;
use crate::trace::WalkTrace;
use crate::tree::{Node, NodeKind, PatternTree, NO_SEQUENCE};
use crate::MAX_WALK_STEPS;

struct Walker<'a, V> {
    routes: &'a [Route<V>],
    components: &'a [(UrlComponent, String)],
    url: &'a Url,
    best: Option<usize>,
    steps: usize,
    trace: WalkTrace,
}

/// Runs one lookup against the tree. Returns the winning sequence (if
/// any) and the walk counters. Catch-all routes (no parts at all) seed
/// the candidate before the tree is entered.
pub(crate) fn best_route<V>(
    tree: &PatternTree,
    routes: &[Route<V>],
    catch_all: &[usize],
    url: &Url,
) -> (Option<usize>, WalkTrace) {
    let components = engine::url_components(url);
    let mut walker = Walker {
        routes,
        components: &components,
        url,
        best: None,
        steps: 0,
        trace: WalkTrace::default(),
    };

    for &sequence in catch_all {
        walker.vet(sequence);
    }

    if !components.is_empty() && tree.root().min_sequence < walker.best_sequence() {
        walker.descend(tree.root(), 0, 0);
    }

    let result = if walker.trace.budget_exhausted {
        None
    } else {
        walker.best
    };
    walker.trace.result = result;
    (result, walker.trace)
}

impl<'a, V> Walker<'a, V> {
    fn best_sequence(&self) -> usize {
        self.best.unwrap_or(NO_SEQUENCE)
    }

    /// Vets one terminating pattern: sequence prune, then engine `test`.
    fn vet(&mut self, sequence: usize) {
        if sequence >= self.best_sequence() {
            return;
        }
        self.trace.candidates_tested += 1;
        if engine::test(&self.routes[sequence].pattern, self.url) {
            self.best = Some(sequence);
        } else {
            self.trace.candidates_rejected += 1;
            tracing::trace!(sequence, "engine refused a tree candidate");
        }
    }

    fn walk(&mut self, node: &Node, i: usize, p: usize) {
        if self.trace.budget_exhausted {
            return;
        }
        if self.steps >= MAX_WALK_STEPS {
            self.trace.budget_exhausted = true;
            return;
        }
        self.steps += 1;

        if node.min_sequence >= self.best_sequence() {
            self.trace.subtrees_pruned += 1;
            return;
        }
        self.trace.nodes_visited += 1;

        if !matches!(node.kind, NodeKind::Root) && node.component != self.components[i].0 {
            return;
        }

        match &node.kind {
            NodeKind::Root => self.descend(node, i, p),
            NodeKind::Fixed { value } => self.fixed(node, value, i, p),
            NodeKind::SegmentWildcard => self.segment_wildcard(node, i, p),
            NodeKind::FullWildcard => self.full_wildcard(node, i, p),
            NodeKind::Regexp { compiled, .. } => self.regexp(node, compiled.as_ref(), i, p),
        }
    }

    /// Shared tail of every node: children first, then the node's own
    /// terminating patterns.
    ///
    /// Children go first because a deeper subtree can hold an
    /// earlier-registered route. The node's own patterns are candidates
    /// once the current component is fully consumed; components the
    /// pattern never constrained are wildcards, so mid-URL termination is
    /// still a complete tree accept. The sequence prune in `vet` skips
    /// everything the children walk already beat.
    fn descend(&mut self, node: &Node, i: usize, p: usize) {
        if self.trace.budget_exhausted {
            return;
        }

        let current = self.components[i].0;

        for child in &node.children {
            if child.component == current {
                // Same component: the child keeps consuming where the
                // parent stopped.
                self.walk(child, i, p);
            } else if let Some(offset) = self.components[i + 1..]
                .iter()
                .position(|(c, _)| *c == child.component)
            {
                // Components and children are both in component order, so
                // the child's component can only be further right.
                self.walk(child, i + 1 + offset, 0);
            }
        }

        if p >= self.components[i].1.len() {
            for &sequence in &node.patterns {
                self.vet(sequence);
            }
        }
    }

    /// Recurses once per candidate consumption end, stopping as soon as
    /// the node's subtree can no longer improve on the best candidate.
    fn descend_candidates(&mut self, node: &Node, i: usize, ends: &[usize]) {
        for &end in ends {
            self.descend(node, i, end);
            if self.trace.budget_exhausted || node.min_sequence >= self.best_sequence() {
                break;
            }
        }
    }

    /// Literal consumption. Repetition counts are enumerated greedy-first
    /// rather than committed to, so a literal the repetition swallowed can
    /// still be claimed by a child.
    fn fixed(&mut self, node: &Node, value: &str, i: usize, p: usize) {
        let text = self.components[i].1.as_str();
        let present = text[p..].starts_with(value);
        let mut ends = Vec::new();
        match node.modifier {
            Modifier::None => {
                if present {
                    ends.push(p + value.len());
                }
            }
            Modifier::Optional => {
                if present {
                    ends.push(p + value.len());
                }
                ends.push(p);
            }
            Modifier::ZeroOrMore | Modifier::OneOrMore => {
                let mut reps = 0;
                let mut q = p;
                while !value.is_empty() && text[q..].starts_with(value) {
                    q += value.len();
                    reps += 1;
                }
                let min_reps = usize::from(node.modifier == Modifier::OneOrMore);
                for n in (min_reps..=reps).rev() {
                    ends.push(p + n * value.len());
                }
            }
        }
        self.descend_candidates(node, i, &ends);
    }

    /// Position after the node's literal prefix, or `None` when the
    /// prefix is required but absent.
    fn hole_base(&self, node: &Node, text: &str, p: usize) -> Option<usize> {
        if node.prefix.is_empty() {
            Some(p)
        } else if text[p..].starts_with(&node.prefix) {
            Some(p + node.prefix.len())
        } else {
            None
        }
    }

    /// End of the natural consumption span for one segment: the next `/`
    /// for pathnames, end of component otherwise.
    fn natural_boundary(&self, component: UrlComponent, text: &str, from: usize) -> usize {
        if component == UrlComponent::Pathname {
            text[from..].find('/').map_or(text.len(), |i| from + i)
        } else {
            text.len()
        }
    }

    /// Cumulative ends of prefix-anchored repetitions, for ZeroOrMore and
    /// OneOrMore holes with children: each repetition is the prefix plus
    /// content up to the next segment boundary.
    fn repeated_ends(&self, node: &Node, i: usize, p: usize, ends: &mut Vec<usize>) {
        let text = self.components[i].1.as_str();
        let mut q = p;
        loop {
            let rep_base = match self.hole_base(node, text, q) {
                Some(base) => base,
                None => break,
            };
            let boundary = self.natural_boundary(node.component, text, rep_base);
            if boundary == q {
                break;
            }
            ends.push(boundary);
            q = boundary;
            if q >= text.len() {
                break;
            }
        }
    }

    fn segment_wildcard(&mut self, node: &Node, i: usize, p: usize) {
        let text = self.components[i].1.as_str();
        let mut ends = Vec::new();

        // Zero consumption comes first for modifiers built around it, and
        // last for OneOrMore, where the engine still admits zero-width
        // matches for some pattern shapes.
        if matches!(node.modifier, Modifier::Optional | Modifier::ZeroOrMore) {
            ends.push(p);
        }

        if let Some(base) = self.hole_base(node, text, p) {
            match node.modifier {
                Modifier::None | Modifier::Optional => {
                    if node.children.is_empty() {
                        self.single_span_end(node, text, base, &mut ends);
                    } else {
                        self.hole_content_ends(node, text, base, &mut ends);
                    }
                }
                Modifier::ZeroOrMore | Modifier::OneOrMore => {
                    if node.children.is_empty() {
                        ends.push(text.len());
                    } else {
                        self.repeated_ends(node, i, p, &mut ends);
                    }
                }
            }
        }

        if node.modifier == Modifier::OneOrMore {
            ends.push(p);
        }

        self.descend_candidates(node, i, &ends);
    }

    /// Single-segment consumption for a childless hole: prefix, then
    /// content up to the natural boundary, with the suffix peeled off the
    /// tail when the node has one.
    fn single_span_end(&self, node: &Node, text: &str, base: usize, ends: &mut Vec<usize>) {
        let boundary = self.natural_boundary(node.component, text, base);
        let span = &text[base..boundary];
        if node.suffix.is_empty() {
            if !span.is_empty() {
                ends.push(boundary);
            }
        } else if span.len() > node.suffix.len() && span.ends_with(&node.suffix) {
            ends.push(boundary);
        }
    }

    /// Content-length enumeration for a hole with children, shortest
    /// first so following literals bind against the longest residual.
    ///
    /// Pathname holes may not swallow `/` unless the hole itself was
    /// authored with a `/` prefix; other components place no boundary
    /// inside the hole.
    fn hole_content_ends(&self, node: &Node, text: &str, base: usize, ends: &mut Vec<usize>) {
        let limit = if node.component == UrlComponent::Pathname && node.prefix != "/" {
            self.natural_boundary(node.component, text, base)
        } else {
            text.len()
        };
        for end in (base + 1)..=limit {
            if !text.is_char_boundary(end) {
                continue;
            }
            if node.suffix.is_empty() {
                ends.push(end);
            } else if text[end..].starts_with(&node.suffix) {
                ends.push(end + node.suffix.len());
            }
        }
    }

    fn full_wildcard(&mut self, node: &Node, i: usize, p: usize) {
        let text = self.components[i].1.as_str();
        let mut ends = Vec::new();

        if node.modifier.allows_zero() {
            ends.push(p);
        }

        if let Some(base) = self.hole_base(node, text, p) {
            if node.children.is_empty() {
                ends.push(text.len());
            } else {
                // Greedy, then shrink: every length is a candidate, the
                // step budget bounds the fanout.
                for end in (base..=text.len()).rev() {
                    if text.is_char_boundary(end) {
                        ends.push(end);
                    }
                }
            }
        }

        self.descend_candidates(node, i, &ends);
    }

    fn regexp(&mut self, node: &Node, compiled: Option<&Regex>, i: usize, p: usize) {
        let text = self.components[i].1.as_str();
        let mut ends = Vec::new();

        if matches!(node.modifier, Modifier::Optional | Modifier::ZeroOrMore) {
            ends.push(p);
        }

        if let Some(base) = self.hole_base(node, text, p) {
            match node.modifier {
                Modifier::None | Modifier::Optional => {
                    let boundary = self.natural_boundary(node.component, text, base);
                    let span = &text[base..boundary];
                    let content = if node.suffix.is_empty() {
                        Some(span)
                    } else if span.len() >= node.suffix.len() && span.ends_with(&node.suffix) {
                        Some(&span[..span.len() - node.suffix.len()])
                    } else {
                        None
                    };
                    if let Some(content) = content {
                        let accepted = match compiled {
                            Some(re) => re.is_match(content),
                            // An uncompilable source matches any
                            // non-empty text; the engine still rejects.
                            None => !content.is_empty(),
                        };
                        if accepted {
                            ends.push(boundary);
                        }
                    }
                }
                Modifier::ZeroOrMore | Modifier::OneOrMore => {
                    // Repetition is enumerated permissively, without
                    // re-testing each repetition; the engine filters.
                    if node.children.is_empty() {
                        ends.push(text.len());
                    } else {
                        self.repeated_ends(node, i, p, &mut ends);
                    }
                }
            }
        }

        if node.modifier == Modifier::OneOrMore {
            ends.push(p);
        }

        self.descend_candidates(node, i, &ends);
    }
}
