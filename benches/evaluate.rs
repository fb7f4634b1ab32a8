//! Lookup benchmarks: the hot path.
//!
//! Measures hit/miss lookups against route tables of increasing size,
//! plus the wildcard-backtracking shape that stresses the walk.

use turnpike::Router;

fn main() {
    divan::main();
}

const BASE: &str = "http://example.com";

/// A route table shaped like a REST API: per-resource list, detail, and
/// nested collection routes.
fn rest_router(resources: usize) -> Router<usize> {
    let mut router = Router::new();
    for i in 0..resources {
        router.add(format!("/api/r{i}"), i * 3).unwrap();
        router.add(format!("/api/r{i}/:id"), i * 3 + 1).unwrap();
        router
            .add(format!("/api/r{i}/:id/items"), i * 3 + 2)
            .unwrap();
    }
    router
}

fn url(path: &str) -> url::Url {
    url::Url::parse(BASE).unwrap().join(path).unwrap()
}

#[divan::bench(args = [16, 256, 2048])]
fn hit_first_registered(bencher: divan::Bencher, resources: usize) {
    let router = rest_router(resources);
    let url = url("/api/r0/7");
    bencher.bench_local(|| router.find_url(&url));
}

#[divan::bench(args = [16, 256, 2048])]
fn hit_last_registered(bencher: divan::Bencher, resources: usize) {
    let router = rest_router(resources);
    let url = url(&format!("/api/r{}/7/items", resources - 1));
    bencher.bench_local(|| router.find_url(&url));
}

#[divan::bench(args = [16, 256, 2048])]
fn miss(bencher: divan::Bencher, resources: usize) {
    let router = rest_router(resources);
    let url = url("/nothing/here");
    bencher.bench_local(|| router.find_url(&url));
}

#[divan::bench]
fn wildcard_backtracking(bencher: divan::Bencher) {
    let mut router = Router::new();
    router.add("/files/*/archive/*/blob", 0usize).unwrap();
    router.add("/files/*", 1usize).unwrap();
    let url = url("/files/a/b/archive/c/d/blob");
    bencher.bench_local(|| router.find_url(&url));
}

#[divan::bench]
fn traced_overhead(bencher: divan::Bencher) {
    let router = rest_router(256);
    let url = url("/api/r128/7");
    bencher.bench_local(|| router.find_url_traced(&url));
}
