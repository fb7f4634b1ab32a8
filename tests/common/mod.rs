//! Shared test support: the reference linear implementation.
//!
//! The linear router is the correctness oracle: it compiles every pattern
//! with the engine and tests them in registration order, with none of the
//! tree machinery. Whatever it answers is by definition correct;
//! `turnpike` must agree on every input.

use url::Url;
use urlpattern::{UrlPattern, UrlPatternInit, UrlPatternMatchInput};

use turnpike::PatternInit;

pub struct LinearRouter<V> {
    routes: Vec<(UrlPattern, V)>,
}

impl<V: Clone> LinearRouter<V> {
    pub fn new() -> Self {
        LinearRouter { routes: Vec::new() }
    }

    pub fn add(&mut self, init: &PatternInit, value: V) {
        let base_url = init
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).expect("oracle base URL"));
        let engine_init = UrlPatternInit {
            protocol: init.protocol.clone(),
            username: init.username.clone(),
            password: init.password.clone(),
            hostname: init.hostname.clone(),
            port: init.port.clone(),
            pathname: init.pathname.clone(),
            search: init.search.clone(),
            hash: init.hash.clone(),
            base_url,
        };
        let pattern = <UrlPattern>::parse(engine_init).expect("oracle pattern");
        self.routes.push((pattern, value));
    }

    /// First registered pattern the engine accepts, scanned linearly.
    pub fn find(&self, url: &Url) -> Option<V> {
        self.routes
            .iter()
            .find(|(pattern, _)| {
                pattern
                    .test(UrlPatternMatchInput::Url(url.clone()))
                    .unwrap_or(false)
            })
            .map(|(_, value)| value.clone())
    }
}

/// Init with only a pathname pattern, the most common registration shape.
pub fn pathname_init(pathname: &str) -> PatternInit {
    PatternInit {
        pathname: Some(pathname.to_string()),
        ..Default::default()
    }
}
