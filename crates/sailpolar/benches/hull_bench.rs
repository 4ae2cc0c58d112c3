//! Criterion benchmarks for polar convex hulls.
//! Focus sizes: m in {10, 100, 1000} points.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sailpolar::api::{convex_hull, member_hull};

fn random_slice(m: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| (rng.gen_range(0.0..360.0), rng.gen_range(0.5..10.0)))
        .collect()
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &m in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("convex_hull", m), &m, |b, &m| {
            b.iter_batched(
                || random_slice(m, 43),
                |pts| {
                    let _hull = convex_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("member_hull_3", m), &m, |b, &m| {
            b.iter_batched(
                || (0..3).map(|k| random_slice(m, 44 + k)).collect::<Vec<_>>(),
                |members| {
                    let _hull = member_hull(&members);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
