use cookiemonster::cookies::psl::{is_public_suffix, validate_cookie_domain};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_psl_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("psl_lookup");

    let domains = ["com", "co.uk", "github.io", "example.com", "sub.example.com"];

    group.bench_function("is_public_suffix_mixed", |b| {
        b.iter(|| {
            for domain in &domains {
                black_box(is_public_suffix(domain));
            }
        });
    });

    // (Domain attribute, request host) pairs seen when accepting Set-Cookie.
    let pairs = [
        ("example.com", "www.example.com"),
        ("co.uk", "shop.example.co.uk"),
        ("other.com", "example.com"),
    ];

    group.bench_function("validate_cookie_domain", |b| {
        b.iter(|| {
            for (domain, host) in &pairs {
                black_box(validate_cookie_domain(domain, host, true).is_ok());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_psl_lookup);
criterion_main!(benches);
