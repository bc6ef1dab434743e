use cookiemonster::cookies::{CanonicalCookie, CookieAttributes, CookieFlags, CookieMonster};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

fn benchmark_cookie_insert(c: &mut Criterion) {
    let mut store = CookieMonster::new();
    let url = Url::parse("https://example.com").unwrap();

    c.bench_function("cookie_set_from_response", |b| {
        b.iter(|| {
            let attributes = CookieAttributes::new().with("Path", "/").with("Secure", "");
            store.set_from_response(black_box(&url), [("foo", "bar", attributes)]);
        })
    });
}

fn benchmark_cookie_get(c: &mut Criterion) {
    let mut store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();
    // Pre-populate
    for i in 0..100 {
        store.set_from_response(
            &url,
            [(format!("cookie{}", i), "val", CookieAttributes::new().with("Path", "/foo"))],
        );
    }

    c.bench_function("cookie_get_for_url", |b| {
        b.iter(|| {
            black_box(store.cookies_for_url(black_box(&url)));
        })
    });
}

fn benchmark_domain_match(c: &mut Criterion) {
    let cookie = CanonicalCookie::with_flags(
        "session",
        "v",
        CookieAttributes::new().with("domain", "example.com"),
        CookieFlags {
            host_only: false,
            persistent: false,
        },
    );
    let hosts = [
        "example.com",
        "www.example.com",
        "notexample.com",
        "127.0.0.1",
    ];

    c.bench_function("cookie_domain_matches", |b| {
        b.iter(|| {
            for host in &hosts {
                black_box(cookie.domain_matches(black_box(host)));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_cookie_insert,
    benchmark_cookie_get,
    benchmark_domain_match
);
criterion_main!(benches);
