//! Criterion microbenches for topology derivation.
//!
//! - Full `derive` per shipped shape (edges, ring tracing, bundles).
//! - Hopf vs disjoint-cover bundling on the 24-cell.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ringlights::api::{derive, BundleStrategy, Shape, TopologyCfg};

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let cfg = TopologyCfg::default();
    for shape in Shape::ALL {
        let def = shape.definition();
        group.bench_function(BenchmarkId::new("shape", shape.name()), |b| {
            b.iter(|| {
                let _ = derive(&def, &cfg).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_bundles(c: &mut Criterion) {
    let mut group = c.benchmark_group("bundles");
    let cfg = TopologyCfg::default();
    for (label, strategy) in [
        ("hopf", BundleStrategy::HopfQuotient),
        ("cover", BundleStrategy::DisjointCover),
    ] {
        let mut def = Shape::Cell24.definition();
        def.bundles = strategy;
        group.bench_function(BenchmarkId::new("24-cell", label), |b| {
            b.iter(|| {
                let _ = derive(&def, &cfg).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive, bench_bundles);
criterion_main!(benches);
