//! Criterion benchmarks for diagram queries.
//! Focus sizes: grid edge n in {8, 32, 128} (n speeds × n angles, or n² cloud points).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sailpolar::api::{Diagram, DiagramCfg, Kind};
use sailpolar::Triple;

fn random_half_polar(n: usize, seed: u64) -> Vec<Triple> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        let ws = 4.0 + 20.0 * i as f64 / n as f64;
        for j in 0..n {
            let wa = 180.0 * j as f64 / (n - 1) as f64;
            out.push(Triple::new(ws, wa, rng.gen_range(0.0..12.0)).unwrap());
        }
    }
    out
}

fn random_queries(m: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..m)
        .map(|_| (rng.gen_range(4.0..21.0), rng.gen_range(0.0..360.0)))
        .collect()
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let queries = random_queries(256, 11);
    for &n in &[8usize, 32, 128] {
        let triples = random_half_polar(n, 7);
        let cfg = DiagramCfg::default();
        let table = Diagram::from_triples(Kind::Table, &triples, &cfg)
            .unwrap()
            .symmetrize()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("table", n), &n, |b, _| {
            b.iter(|| {
                for &(ws, wa) in &queries {
                    let _ = table.query(ws, wa);
                }
            })
        });

        let cloud = Diagram::from_triples(Kind::Cloud, &triples, &cfg).unwrap();
        group.bench_with_input(BenchmarkId::new("cloud", n), &n, |b, _| {
            b.iter(|| {
                for &(ws, wa) in &queries {
                    let _ = cloud.query(ws, wa);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
