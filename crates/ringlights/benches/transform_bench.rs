//! Criterion microbenches for the per-frame hot path.
//!
//! - Controller step (palindromic increment + compose).
//! - Frame build for the 600-cell at the default arc sampling.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ringlights::api::{
    build_frame, default_initial_orientation, RotationController, Shape, TopologyCfg,
};

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");
    group.bench_function(BenchmarkId::new("rotate", "oblique"), |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(7);
                let v = Vector3::new(rng.gen::<f64>(), rng.gen(), rng.gen()).normalize();
                (RotationController::default(), v)
            },
            |(mut ctl, v)| {
                for _ in 0..64 {
                    ctl.rotate(v, 3.0);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let m = default_initial_orientation();
    for shape in [Shape::Cell24, Shape::Cell600] {
        let d = shape.derive(&TopologyCfg::default()).unwrap();
        let states = vec![false; d.ring_count()];
        group.bench_function(BenchmarkId::new("build_frame", shape.name()), |b| {
            b.iter(|| {
                let _ = build_frame(&d, &m, &states, 16);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rotate, bench_frame);
criterion_main!(benches);
