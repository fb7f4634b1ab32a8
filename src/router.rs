//! `Router`: the public match index.
//!
//! A `Router` owns the route table (compiled patterns plus payloads), the
//! prefix tree over their parts, and the registration sequence. `add` is
//! the only mutation; lookups are read-only and safe to share across
//! threads.
//!
//! # First-match-wins
//!
//! Registration order is the only precedence. For any URL matched by
//! several routes, the lookup returns the route registered first,
//! regardless of how specific the later ones are.

use std::fmt;

use url::Url;
use urlpattern::{UrlPattern, UrlPatternResult};

use crate::engine::{self, PatternInput};
use crate::error::RouterError;
use crate::matcher;
use crate::parser;
use crate::trace::WalkTrace;
use crate::tree::PatternTree;

/// One registered route: the engine-compiled pattern and the payload.
/// The route's sequence is its index in the router's table.
pub(crate) struct Route<V> {
    pub(crate) pattern: UrlPattern,
    pub(crate) value: V,
}

/// A successful lookup: the engine's exec output for the winning pattern
/// and a clone of the registered payload.
pub struct RouteMatch<V> {
    /// Per-component inputs and captured groups, straight from the
    /// engine.
    pub result: UrlPatternResult,
    /// The payload registered with the winning route.
    pub value: V,
}

impl<V: fmt::Debug> fmt::Debug for RouteMatch<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// First-match-wins URL pattern index.
///
/// # Example
///
/// ```ignore
/// let mut router = Router::new();
/// router.add("/api/users/:id", "user-detail")?;
/// router.add("/api/users", "user-list")?;
///
/// let matched = router.find_with_base("/api/users/123", "http://example.com").unwrap();
/// assert_eq!(matched.value, "user-detail");
/// ```
pub struct Router<V: Clone + Send + Sync + 'static> {
    tree: PatternTree,
    routes: Vec<Route<V>>,
    /// Routes with no parts at all (every component catch-all); they are
    /// candidates for every URL and are vetted before the tree walk.
    catch_all: Vec<usize>,
}

impl<V: Clone + Send + Sync + 'static> Router<V> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Router {
            tree: PatternTree::new(),
            routes: Vec::new(),
            catch_all: Vec::new(),
        }
    }

    /// Registers a pattern with its payload.
    ///
    /// Accepts a constructor-style string (`"/api/users/:id"`,
    /// `"https://api.example.com/v1/:resource"`) or a
    /// [`PatternInit`](crate::PatternInit). Registration order defines
    /// match precedence and is never revisited.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Pattern`] when the engine rejects the
    /// pattern. The router is unchanged in that case.
    pub fn add(&mut self, pattern: impl Into<PatternInput>, value: V) -> Result<(), RouterError> {
        let init = pattern.into().into_init();
        let processed = engine::process_init(&init)?;
        let compiled = engine::compile(&init)?;
        let parts = parser::parse_parts(&processed);

        let sequence = self.routes.len();
        if parts.is_empty() {
            self.catch_all.push(sequence);
        } else {
            self.tree.insert(&parts, sequence);
        }
        tracing::debug!(sequence, pattern = %init, parts = parts.len(), "route registered");
        self.routes.push(Route {
            pattern: compiled,
            value,
        });
        Ok(())
    }

    /// Looks up an absolute URL string. Returns `None` for strings that
    /// do not parse as URLs.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<RouteMatch<V>> {
        let url = engine::resolve(url, None)?;
        self.find_url(&url)
    }

    /// Looks up a URL string resolved against a base, the way match
    /// inputs with a base URL are resolved. Returns `None` when
    /// resolution fails.
    #[must_use]
    pub fn find_with_base(&self, url: &str, base: &str) -> Option<RouteMatch<V>> {
        let url = engine::resolve(url, Some(base))?;
        self.find_url(&url)
    }

    /// Looks up an already-parsed URL.
    #[must_use]
    pub fn find_url(&self, url: &Url) -> Option<RouteMatch<V>> {
        self.find_url_traced(url).0
    }

    /// Looks up a URL and reports the walk counters alongside the result.
    pub fn find_url_traced(&self, url: &Url) -> (Option<RouteMatch<V>>, WalkTrace) {
        let (best, trace) = matcher::best_route(&self.tree, &self.routes, &self.catch_all, url);
        let matched = best.and_then(|sequence| {
            let route = &self.routes[sequence];
            match engine::exec(&route.pattern, url) {
                Some(result) => Some(RouteMatch {
                    result,
                    value: route.value.clone(),
                }),
                None => {
                    // The walk only promotes candidates the engine's
                    // `test` accepted, so exec refusing here is an
                    // internal inconsistency.
                    tracing::debug!(sequence, "engine refused the confirmed candidate on exec");
                    None
                }
            }
        });
        (matched, trace)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for Router<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> fmt::Debug for Router<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("catch_all", &self.catch_all.len())
            .finish()
    }
}
