use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use rangesplit::twobody::{InversePowerLaw, Potential, RangeSeparated};

/// Single-pair benchmarks
fn bench_twobody_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single");

    let smearing: f64 = 1.5;
    let r = 1.2 * smearing;

    let coulomb = InversePowerLaw::coulomb(smearing);
    group.bench_function("full", |b| {
        b.iter(|| coulomb.from_distance_squared(black_box(r * r)))
    });
    group.bench_function("short_range", |b| {
        b.iter(|| coulomb.short_range_from_distance(black_box(r)))
    });
    group.bench_function("long_range", |b| {
        b.iter(|| coulomb.long_range_from_distance(black_box(r)))
    });
    group.bench_function("long_range_fourier", |b| {
        b.iter(|| coulomb.long_range_from_k_squared(black_box(r * r)))
    });

    let dispersion = InversePowerLaw::new(6.0, smearing);
    group.bench_function("short_range_p6", |b| {
        b.iter(|| dispersion.short_range_from_distance(black_box(r)))
    });

    group.finish();
}

/// Generate test distances for batch benchmarks
fn generate_distances(n: usize, smearing: f64) -> Array1<f64> {
    Array1::linspace(0.5 * smearing, 8.0 * smearing, n)
}

/// Batch benchmarks over arrays of distances and wave vectors
fn bench_twobody_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    let smearing: f64 = 1.5;
    let n_pairs = 10000;
    let distances = generate_distances(n_pairs, smearing);
    let k_squared = distances.mapv(|r| (2.0 / r).powi(2));

    for exponent in [1.0, 6.0] {
        let ipl = InversePowerLaw::new(exponent, smearing);
        group.bench_with_input(
            BenchmarkId::new(format!("short_range_p{exponent}"), n_pairs),
            &distances,
            |b, r| b.iter(|| ipl.short_range_by_distance(r.view())),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("long_range_p{exponent}"), n_pairs),
            &distances,
            |b, r| b.iter(|| ipl.long_range_by_distance(r.view())),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("fourier_p{exponent}"), n_pairs),
            &k_squared,
            |b, k2| b.iter(|| ipl.long_range_by_squared_wavevector(k2.view())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_twobody_single, bench_twobody_batch);
criterion_main!(benches);
