//! Benchmarks for streamhist
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use streamhist::histogram::Histogram;

fn normal_stream(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u1: f64 = 1.0 - rng.gen::<f64>();
            let u2: f64 = rng.gen();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect()
}

// ============================================================================
// Update Benchmarks
// ============================================================================

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    group.throughput(Throughput::Elements(1));

    let normal = normal_stream(1 << 16, 42);

    for max_bins in [10, 100, 1000] {
        group.bench_function(BenchmarkId::new("normal", max_bins), |b| {
            let mut histogram = Histogram::new(max_bins);
            let mut i = 0usize;
            b.iter(|| {
                histogram.update(black_box(normal[i & (normal.len() - 1)])).unwrap();
                i = i.wrapping_add(1);
            });
        });

        // worst case for the roaming gap: every insertion lands at the far end
        group.bench_function(BenchmarkId::new("descending", max_bins), |b| {
            let mut histogram = Histogram::new(max_bins);
            let mut x = 0.0f64;
            b.iter(|| {
                histogram.update(black_box(x)).unwrap();
                x -= 1.0;
            });
        });
    }

    group.finish();
}

// ============================================================================
// Query Benchmarks
// ============================================================================

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let quantiles: Vec<f64> = (0..1000).map(|i| i as f64 / 999.0).collect();

    for max_bins in [10, 100, 1000] {
        let histogram =
            Histogram::from_observations(max_bins, normal_stream(100_000, 7)).unwrap();

        group.bench_function(BenchmarkId::new("median", max_bins), |b| {
            b.iter(|| black_box(histogram.query(black_box(&[0.5])).unwrap()));
        });

        group.throughput(Throughput::Elements(quantiles.len() as u64));
        group.bench_function(BenchmarkId::new("sweep_1000", max_bins), |b| {
            b.iter(|| black_box(histogram.query(black_box(&quantiles)).unwrap()));
        });
        group.throughput(Throughput::Elements(1));
    }

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_update, bench_query);

criterion_main!(benches);
