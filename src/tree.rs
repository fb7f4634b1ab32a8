//! The prefix tree over pattern parts.
//!
//! Nodes are typed by part kind and owned directly by their parent, the
//! same ownership model as a radix tree with child vectors. Routes are
//! referenced by id (their index in the router's route table), which
//! keeps the tree itself non-generic and makes the registration sequence
//! available everywhere a node is.
//!
//! Insertion is append-only: a new route either reuses a structurally
//! equivalent child or appends a fresh one. No node is ever split,
//! reordered, or removed. `min_sequence` summarizes the best (lowest)
//! route id reachable in each subtree and is what lets the matcher skip
//! whole subtrees once it holds a better candidate.

use regex::Regex;

use crate::part::{Modifier, Part, PartKind, UrlComponent};

/// Sentinel for "no route reachable yet".
pub(crate) const NO_SEQUENCE: usize = usize::MAX;

#[derive(Debug)]
pub(crate) enum NodeKind {
    Root,
    Fixed {
        value: String,
    },
    SegmentWildcard,
    FullWildcard,
    Regexp {
        source: String,
        /// Compiled form, anchored at both ends. `None` records a source
        /// the regex engine refused; such nodes match any non-empty text
        /// and leave rejection to the pattern engine.
        compiled: Option<Regex>,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) component: UrlComponent,
    pub(crate) modifier: Modifier,
    pub(crate) prefix: String,
    pub(crate) suffix: String,
    /// Route ids terminating at this node, in registration order.
    pub(crate) patterns: Vec<usize>,
    pub(crate) children: Vec<Node>,
    /// Minimum route id across `patterns` and every descendant.
    pub(crate) min_sequence: usize,
}

impl Node {
    fn root() -> Self {
        Node {
            kind: NodeKind::Root,
            component: UrlComponent::Protocol,
            modifier: Modifier::None,
            prefix: String::new(),
            suffix: String::new(),
            patterns: Vec::new(),
            children: Vec::new(),
            min_sequence: NO_SEQUENCE,
        }
    }

    fn from_part(part: &Part) -> Self {
        let kind = match part.kind {
            PartKind::Fixed => NodeKind::Fixed {
                value: part.value.clone(),
            },
            PartKind::SegmentWildcard => NodeKind::SegmentWildcard,
            PartKind::FullWildcard => NodeKind::FullWildcard,
            PartKind::Regexp => {
                let anchored = format!("^(?:{})$", part.value);
                let compiled = match Regex::new(&anchored) {
                    Ok(re) => Some(re),
                    Err(err) => {
                        tracing::debug!(
                            source = %part.value,
                            error = %err,
                            "regexp part failed to compile; node degrades to permissive matching"
                        );
                        None
                    }
                };
                NodeKind::Regexp {
                    source: part.value.clone(),
                    compiled,
                }
            }
        };
        Node {
            kind,
            component: part.component,
            modifier: part.modifier,
            prefix: part.prefix.clone(),
            suffix: part.suffix.clone(),
            patterns: Vec::new(),
            children: Vec::new(),
            min_sequence: NO_SEQUENCE,
        }
    }

    /// Structural equivalence against a part; the insert walk reuses the
    /// first child this returns true for.
    fn matches_part(&self, part: &Part) -> bool {
        let kind_matches = match (&self.kind, part.kind) {
            (NodeKind::Fixed { value }, PartKind::Fixed) => *value == part.value,
            (NodeKind::SegmentWildcard, PartKind::SegmentWildcard) => true,
            (NodeKind::FullWildcard, PartKind::FullWildcard) => true,
            (NodeKind::Regexp { source, .. }, PartKind::Regexp) => *source == part.value,
            _ => false,
        };
        kind_matches
            && self.component == part.component
            && self.modifier == part.modifier
            && self.prefix == part.prefix
            && self.suffix == part.suffix
    }
}

/// The match index's tree. Owns the node graph; route payloads and
/// compiled patterns live in the router's route table.
#[derive(Debug)]
pub(crate) struct PatternTree {
    root: Node,
}

impl PatternTree {
    pub(crate) fn new() -> Self {
        PatternTree { root: Node::root() }
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    /// Inserts a route's parts, reusing structurally equivalent children
    /// and appending new nodes otherwise. `sequence` is the route id;
    /// every node along the walk absorbs it into `min_sequence`.
    pub(crate) fn insert(&mut self, parts: &[Part], sequence: usize) {
        let mut node = &mut self.root;
        node.min_sequence = node.min_sequence.min(sequence);

        for part in parts {
            let position = node.children.iter().position(|c| c.matches_part(part));
            let index = match position {
                Some(index) => index,
                None => {
                    node.children.push(Node::from_part(part));
                    node.children.len() - 1
                }
            };
            node = &mut { node }.children[index];
            node.min_sequence = node.min_sequence.min(sequence);
        }

        node.patterns.push(sequence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_component;

    fn pathname_parts(pattern: &str) -> Vec<Part> {
        parse_component(UrlComponent::Pathname, pattern).unwrap()
    }

    fn tree_of(patterns: &[&str]) -> PatternTree {
        let mut tree = PatternTree::new();
        for (sequence, pattern) in patterns.iter().enumerate() {
            tree.insert(&pathname_parts(pattern), sequence);
        }
        tree
    }

    #[test]
    fn shared_prefix_reuses_nodes() {
        let tree = tree_of(&["/api/users/:id", "/api/users"]);
        let root = tree.root();
        assert_eq!(root.children.len(), 1, "both routes share the /api node");
        let api = &root.children[0];
        assert_eq!(api.children.len(), 1);
        let users = &api.children[0];
        assert_eq!(users.patterns, vec![1]);
        assert_eq!(users.children.len(), 1);
        assert_eq!(users.children[0].patterns, vec![0]);
    }

    #[test]
    fn structurally_equal_routes_share_a_terminal() {
        let tree = tree_of(&["/books/:id", "/books/:bookId"]);
        let books = &tree.root().children[0];
        assert_eq!(books.children.len(), 1, "capture names do not fork the tree");
        assert_eq!(books.children[0].patterns, vec![0, 1]);
    }

    #[test]
    fn differing_regexp_sources_do_not_merge() {
        let tree = tree_of(&["/p/:id(\\d+)", "/p/:id([a-z]+)"]);
        let p = &tree.root().children[0];
        assert_eq!(p.children.len(), 2);
    }

    #[test]
    fn min_sequence_tracks_the_best_reachable_route() {
        let tree = tree_of(&["/:section/:title", "/special/:title", "/docs"]);
        let root = tree.root();
        assert_eq!(root.min_sequence, 0);
        let hole = &root.children[0];
        assert_eq!(hole.min_sequence, 0);
        let special = &root.children[1];
        assert_eq!(special.min_sequence, 1);
        let docs = &root.children[2];
        assert_eq!(docs.min_sequence, 2);
    }

    #[test]
    fn insertion_order_is_stable() {
        let tree = tree_of(&["/b", "/a", "/c"]);
        let values: Vec<&str> = tree
            .root()
            .children
            .iter()
            .map(|c| match &c.kind {
                NodeKind::Fixed { value } => value.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(values, vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn empty_parts_terminate_at_the_root() {
        let mut tree = PatternTree::new();
        tree.insert(&[], 0);
        assert_eq!(tree.root().patterns, vec![0]);
        assert_eq!(tree.root().min_sequence, 0);
    }

    #[test]
    fn invalid_regexp_is_remembered_not_fatal() {
        let part = Part {
            kind: PartKind::Regexp,
            component: UrlComponent::Pathname,
            modifier: Modifier::None,
            value: "[unclosed".to_string(),
            prefix: "/".to_string(),
            suffix: String::new(),
            name: "x".to_string(),
        };
        let node = Node::from_part(&part);
        assert!(matches!(
            node.kind,
            NodeKind::Regexp { compiled: None, .. }
        ));
    }
}
