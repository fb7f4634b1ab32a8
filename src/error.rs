//! Error type surfaced by the router.
//!
//! Only registration and config loading can fail. Lookups never error:
//! an unresolvable URL is simply not a match, and an invalid regex inside
//! a registered pattern degrades that tree node to permissive matching
//! (the engine still filters candidates).

use std::error::Error;
use std::fmt;

/// Errors returned by [`Router::add`](crate::Router::add) and
/// [`Router::from_config`](crate::Router::from_config).
///
/// Underlying causes are carried as strings so the type stays independent
/// of the engine's error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The engine rejected a pattern at compile time.
    Pattern {
        /// The offending pattern, as registered.
        pattern: String,
        /// The engine's error message.
        source: String,
    },

    /// A route-table config could not be loaded.
    Config {
        /// The deserialization or compile error message.
        source: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Pattern { pattern, source } => {
                write!(f, "invalid pattern {pattern:?}: {source}")
            }
            RouterError::Config { source } => write!(f, "invalid route config: {source}"),
        }
    }
}

impl Error for RouterError {}
