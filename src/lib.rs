//! turnpike: first-match-wins URL pattern index.
//!
//! Given thousands of registered URL patterns and a URL, `turnpike`
//! answers "which pattern was registered *first* that matches this URL,
//! and what payload came with it?" without testing every pattern.
//!
//! # Architecture
//!
//! The index is a prefix tree over parsed pattern *parts*, used as a
//! filter in front of an external URL-pattern engine:
//!
//! - [`Part`] / [`PartKind`] / [`Modifier`] / [`UrlComponent`] — the part
//!   model. Parts ignore capture names for structural sharing, so
//!   `/books/:id` and `/books/:bookId` occupy the same tree path.
//! - `parser` — the URLPattern pattern grammar, producing per-component
//!   part lists with pathname literals split per segment (tree building
//!   is append-only: registration never splits an existing node).
//! - `tree` — the prefix tree. Each node carries the routes terminating
//!   there, its children, and `min_sequence`, the best registration
//!   sequence reachable in its subtree.
//! - `matcher` — the walk: per-kind consumption with backtracking over
//!   ambiguous lengths, `min_sequence` pruning, and engine confirmation
//!   of every candidate.
//! - `engine` — the adapter around the `urlpattern` and `url` crates,
//!   which own canonicalization and capture semantics.
//! - [`Router`] — the public surface: `add` patterns, `find` URLs.
//!
//! # Key design points
//!
//! 1. **The tree filters, the engine decides.** The tree may over-accept;
//!    every candidate is confirmed with the engine's `test` before it can
//!    win, and the returned captures come from the engine's `exec`. The
//!    tree must never under-accept, so ambiguous consumption rules
//!    generate more candidate positions rather than fewer.
//! 2. **Sequence is the only precedence.** Registration order decides
//!    every tie; `min_sequence` summaries make "can this subtree beat
//!    what I already have?" a single comparison.
//! 3. **Registration is append-only.** Pathname literals are
//!    pre-split per segment, so inserting a route reuses or appends
//!    children and never restructures the tree.
//!
//! # Example
//!
//! ```
//! use turnpike::Router;
//!
//! let mut router = Router::new();
//! router.add("/api/users/:id", "user-detail").unwrap();
//! router.add("/api/users", "user-list").unwrap();
//!
//! let matched = router
//!     .find_with_base("/api/users/123", "http://example.com")
//!     .unwrap();
//! assert_eq!(matched.value, "user-detail");
//! assert_eq!(
//!     matched.result.pathname.groups.get("id").map(String::as_str),
//!     Some("123")
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod engine;
mod error;
mod matcher;
mod parser;
mod part;
mod router;
mod trace;
mod tree;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::{PatternSpec, RouteConfig, RouterConfig};
pub use engine::{PatternInit, PatternInput};
pub use error::RouterError;
pub use part::{Modifier, Part, PartKind, UrlComponent};
pub use router::{RouteMatch, Router};
pub use trace::WalkTrace;

// The engine's result types are part of the lookup surface.
pub use urlpattern::{UrlPatternComponentResult, UrlPatternResult};

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Upper bound on tree-walk steps for a single lookup.
///
/// Nested full wildcards over long inputs can enumerate quadratically
/// many consumption splits; the budget turns that into a hard stop. A
/// lookup that exhausts the budget reports no match (and says so in its
/// [`WalkTrace`]). Realistic route tables stay orders of magnitude below
/// this.
pub const MAX_WALK_STEPS: usize = 1 << 16;

/// Prelude for convenient imports.
///
/// ```
/// use turnpike::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Modifier, Part, PartKind, PatternInit, PatternInput, RouteMatch, Router, RouterConfig,
        RouterError, UrlComponent, WalkTrace,
    };
}
