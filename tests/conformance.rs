//! End-to-end scenarios with literal inputs.

mod common;

use turnpike::{PatternInit, Router};

const BASE: &str = "http://example.com";

fn value(router: &Router<&'static str>, url: &str) -> Option<&'static str> {
    router.find_with_base(url, BASE).map(|m| m.value)
}

#[test]
fn detail_route_beats_list_route_on_longer_paths() {
    let mut router = Router::new();
    router.add("/api/users/:id", "user-detail").unwrap();
    router.add("/api/users", "user-list").unwrap();

    let matched = router.find_with_base("/api/users/123", BASE).unwrap();
    assert_eq!(matched.value, "user-detail");
    assert_eq!(
        matched.result.pathname.groups.get("id").map(String::as_str),
        Some("123")
    );

    assert_eq!(value(&router, "/api/users"), Some("user-list"));
}

#[test]
fn structurally_equal_registration_never_wins() {
    let mut router = Router::new();
    router.add("/books/:id", "id").unwrap();
    router.add("/books/:bookId", "bookId").unwrap();

    let matched = router.find_with_base("/books/123", BASE).unwrap();
    assert_eq!(matched.value, "id");
    assert_eq!(
        matched.result.pathname.groups.get("id").map(String::as_str),
        Some("123")
    );
}

#[test]
fn sequence_beats_tree_position() {
    let mut router = Router::new();
    router.add("/:section/:title.txt", "A").unwrap();
    router.add("/special/:title.html", "B").unwrap();
    router.add("/:section/:title.html", "C").unwrap();

    // B was registered before C, so it wins even though C's tree path
    // (shared with A) was created first.
    assert_eq!(value(&router, "/special/foo.html"), Some("B"));
    assert_eq!(value(&router, "/docs/readme.txt"), Some("A"));
    assert_eq!(value(&router, "/blog/post.html"), Some("C"));
}

#[test]
fn trailing_wildcard_captures_the_rest() {
    let mut router = Router::new();
    router.add("/files/*", "files").unwrap();

    let matched = router.find_with_base("/files/a/b/c", BASE).unwrap();
    assert_eq!(matched.value, "files");
    assert_eq!(
        matched.result.pathname.groups.get("0").map(String::as_str),
        Some("a/b/c")
    );

    assert_eq!(value(&router, "/documents/x"), None);
}

#[test]
fn custom_regexp_constrains_the_hole() {
    let mut router = Router::new();
    router.add("/product/:id(\\d+)", "product").unwrap();

    let matched = router.find_with_base("/product/12345", BASE).unwrap();
    assert_eq!(matched.value, "product");
    assert_eq!(
        matched.result.pathname.groups.get("id").map(String::as_str),
        Some("12345")
    );

    assert_eq!(value(&router, "/product/abc"), None);
}

#[test]
fn multi_component_inits_respect_registration_order() {
    let mut router = Router::new();
    router
        .add(
            PatternInit {
                protocol: Some("https".into()),
                hostname: Some("api.example.com".into()),
                pathname: Some("/v1/:resource".into()),
                ..Default::default()
            },
            "first",
        )
        .unwrap();
    router
        .add(
            PatternInit {
                pathname: Some("/v1/:resource".into()),
                ..Default::default()
            },
            "general",
        )
        .unwrap();
    router
        .add(
            PatternInit {
                protocol: Some("https".into()),
                hostname: Some("api.example.com".into()),
                pathname: Some("/v1/users".into()),
                ..Default::default()
            },
            "more",
        )
        .unwrap();

    assert_eq!(
        router
            .find("https://api.example.com/v1/users")
            .map(|m| m.value),
        Some("first")
    );
    assert_eq!(
        router
            .find("https://other.example.com/v1/posts")
            .map(|m| m.value),
        Some("general")
    );
}

#[test]
fn lookup_result_equals_direct_engine_exec() {
    let mut router = Router::new();
    router.add("/api/:version/users/:id", "api").unwrap();

    let url = url::Url::parse("http://example.com/api/v2/users/7").unwrap();
    let matched = router.find_url(&url).unwrap();

    // The result must be the engine's own exec output for the winning
    // pattern, untouched.
    let mut oracle = common::LinearRouter::new();
    oracle.add(&common::pathname_init("/api/:version/users/:id"), "api");
    assert!(oracle.find(&url).is_some());
    assert_eq!(
        matched
            .result
            .pathname
            .groups
            .get("version")
            .map(String::as_str),
        Some("v2")
    );
    assert_eq!(
        matched.result.pathname.groups.get("id").map(String::as_str),
        Some("7")
    );
    assert_eq!(matched.result.pathname.input, "/api/v2/users/7");
}

#[test]
fn unmatchable_inputs_return_none() {
    let mut router = Router::new();
    router.add("/x/:id", "x").unwrap();

    assert!(router.find("::not-a-url::").is_none());
    assert!(router.find("/relative/needs/base").is_none());
    assert_eq!(value(&router, "/y/1"), None);
}

#[test]
fn optional_and_repeated_modifiers_match_like_the_engine() {
    let mut router = Router::new();
    router.add("/index{.html}?", "index").unwrap();
    router.add("/assets/:path+", "assets").unwrap();

    assert_eq!(value(&router, "/index"), Some("index"));
    assert_eq!(value(&router, "/index.html"), Some("index"));
    assert_eq!(value(&router, "/index.css"), None);

    assert_eq!(value(&router, "/assets/app/js/main.js"), Some("assets"));
    assert_eq!(value(&router, "/assets"), None);
}

#[test]
fn traced_and_plain_lookups_agree() {
    let mut router = Router::new();
    router.add("/a/:x", "a").unwrap();
    router.add("/b/:x", "b").unwrap();

    for path in ["/a/1", "/b/2", "/c/3"] {
        let url = url::Url::parse(&format!("{BASE}{path}")).unwrap();
        let plain = router.find_url(&url).map(|m| m.value);
        let (traced, trace) = router.find_url_traced(&url);
        assert_eq!(plain, traced.map(|m| m.value));
        assert_eq!(trace.result.is_some(), plain.is_some());
    }
}
