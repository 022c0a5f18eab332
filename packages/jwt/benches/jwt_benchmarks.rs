//! Issuance and verification throughput per algorithm

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tessera_jwt::{
    Algorithm, ClaimsBuilder, FixedClock, Issuer, Key, ValidationOptions, Verifier,
};
use tokio::runtime::Runtime;

const NOW: i64 = 1_700_000_000;

fn keys() -> Vec<(Algorithm, Key)> {
    vec![
        (
            Algorithm::HS256,
            Key::hmac(b"benchmark-secret-0123456789abcdef".to_vec()),
        ),
        (
            Algorithm::ES256,
            Key::private_pem(include_str!("../tests/fixtures/ec256_private.pem"))
                .expect("P-256 fixture should parse"),
        ),
        (
            Algorithm::RS256,
            Key::private_pem(include_str!("../tests/fixtures/rsa_private.pem"))
                .expect("RSA fixture should parse"),
        ),
    ]
}

fn benchmark_issue(c: &mut Criterion) {
    let issuer = Issuer::new().with_clock(FixedClock(NOW));
    let claims = ClaimsBuilder::new()
        .subject("user-42")
        .issuer("https://auth.example.com")
        .claim("role", "admin")
        .build();
    let mut group = c.benchmark_group("issue");

    for (algorithm, key) in keys() {
        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &key, |b, key| {
            b.iter(|| {
                let token = issuer
                    .issue(&claims, key, algorithm, 3600)
                    .expect("issuance should succeed");
                std::hint::black_box(token);
            });
        });
    }
    group.finish();
}

fn benchmark_verify(c: &mut Criterion) {
    let issuer = Issuer::new().with_clock(FixedClock(NOW));
    let claims = ClaimsBuilder::new().subject("user-42").build();
    let mut group = c.benchmark_group("verify");

    for (algorithm, key) in keys() {
        let token = issuer
            .issue(&claims, &key, algorithm, 3600)
            .expect("issuance should succeed");
        let verifier = Verifier::new(ValidationOptions::for_algorithm(algorithm))
            .with_clock(FixedClock(NOW));
        let public = key.to_public();

        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &token, |b, token| {
            b.iter(|| {
                let verified = verifier
                    .verify(token.as_str(), &public)
                    .expect("verification should succeed");
                std::hint::black_box(verified);
            });
        });
    }
    group.finish();
}

/// Overhead of routing HS256 through the blocking pool
fn benchmark_async_overhead(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let issuer = Issuer::new().with_clock(FixedClock(NOW));
    let key = Key::hmac(b"benchmark-secret-0123456789abcdef".to_vec());
    let claims = ClaimsBuilder::new().subject("user-42").build();

    c.bench_function("issue_async_hs256", |b| {
        b.iter(|| {
            rt.block_on(async {
                let token = issuer
                    .issue_async(claims.clone(), key.clone(), Algorithm::HS256, 3600)
                    .await
                    .expect("issuance should succeed");
                std::hint::black_box(token);
            });
        });
    });
}

criterion_group!(
    benches,
    benchmark_issue,
    benchmark_verify,
    benchmark_async_overhead
);
criterion_main!(benches);
