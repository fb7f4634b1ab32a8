//! Config types for building a router from data.
//!
//! These mirror the runtime registration API but are serde-deserializable,
//! so a route table can live in JSON or YAML next to the service that
//! uses it.
//!
//! | Config type | Runtime counterpart |
//! |-------------|---------------------|
//! | [`RouterConfig`] | [`Router`](crate::Router) |
//! | [`RouteConfig`] | one [`Router::add`](crate::Router::add) call |
//! | [`PatternSpec`] | [`PatternInput`](crate::PatternInput) |
//!
//! ```json
//! {
//!   "routes": [
//!     { "pattern": "/api/users/:id", "value": "user-detail" },
//!     { "pattern": { "protocol": "https", "pathname": "/v1/:r" }, "value": "v1" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::engine::{PatternInit, PatternInput};
use crate::error::RouterError;
use crate::router::Router;

/// A full route table: patterns with payloads, in registration order.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct RouterConfig<V> {
    /// Routes in precedence order; the first entry wins ties forever.
    pub routes: Vec<RouteConfig<V>>,
}

/// One route: a pattern in either spelling plus its payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct RouteConfig<V> {
    /// The pattern, as a constructor string or a component init map.
    pub pattern: PatternSpec,
    /// The payload returned when this route wins.
    pub value: V,
}

/// Pattern spelling in configs: a string or an init map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    Pattern(String),
    Init(PatternInit),
}

impl From<PatternSpec> for PatternInput {
    fn from(spec: PatternSpec) -> Self {
        match spec {
            PatternSpec::Pattern(pattern) => PatternInput::Pattern(pattern),
            PatternSpec::Init(init) => PatternInput::Init(init),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Router<V> {
    /// Builds a router from a deserialized route table, registering the
    /// routes in order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error; entries before it are
    /// discarded along with the partially built router.
    pub fn from_config(config: RouterConfig<V>) -> Result<Self, RouterError> {
        let mut router = Router::new();
        for route in config.routes {
            router.add(route.pattern, route.value)?;
        }
        Ok(router)
    }
}
