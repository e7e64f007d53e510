//! Energy integration benchmarks
//!
//! Toyota Way: Genchi Genbutsu (measure, don't guess)
//!
//! Run with: cargo bench --bench energy_integration

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use energy_report::power::{trapezoid, PowerSample, PowerSeries};

const SMALL_SIZE: usize = 1_000; // ~15 min at 1 Hz
const LARGE_SIZE: usize = 100_000; // ~28 h at 1 Hz

#[allow(clippy::cast_precision_loss)]
fn samples(n: usize) -> Vec<PowerSample> {
    // reversed so the sort in total_energy has work to do
    (0..n)
        .rev()
        .map(|i| PowerSample::new(i as f64, 150.0 + (i % 17) as f64))
        .collect()
}

/// Benchmark decode + sort + integrate of a wattmeter series
fn bench_total_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_energy");

    for size in [SMALL_SIZE, LARGE_SIZE] {
        let series = PowerSeries::new(samples(size));
        group.bench_with_input(BenchmarkId::new("unsorted", size), &series, |b, s| {
            b.iter(|| black_box(s).total_energy());
        });
    }

    // Scalar baseline: integration of already sorted points
    let sorted: Vec<(f64, f64)> = samples(LARGE_SIZE)
        .iter()
        .rev()
        .filter_map(|s| Some((s.timestamp?, s.value?)))
        .collect();
    group.bench_with_input(
        BenchmarkId::new("trapezoid_presorted", LARGE_SIZE),
        &sorted,
        |b, points| {
            b.iter(|| trapezoid(black_box(points)));
        },
    );

    group.finish();
}

/// Benchmark JSON decoding of numeric pairs and ISO-8601 records
#[allow(clippy::cast_precision_loss)]
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let pairs: Vec<[f64; 2]> = (0..SMALL_SIZE).map(|i| [i as f64, 200.0]).collect();
    let pairs_json = serde_json::to_string(&pairs).unwrap();
    group.bench_function(BenchmarkId::new("numeric_pairs", SMALL_SIZE), |b| {
        b.iter(|| PowerSeries::from_json_str(black_box(&pairs_json)));
    });

    let records: Vec<serde_json::Value> = (0..SMALL_SIZE)
        .map(|i| {
            serde_json::json!({
                "timestamp": format!("2024-06-10T08:{:02}:{:02}Z", (i / 60) % 60, i % 60),
                "value": 200.0,
            })
        })
        .collect();
    let records_json = serde_json::to_string(&records).unwrap();
    group.bench_function(BenchmarkId::new("iso_records", SMALL_SIZE), |b| {
        b.iter(|| PowerSeries::from_json_str(black_box(&records_json)));
    });

    group.finish();
}

criterion_group!(benches, bench_total_energy, bench_decode);
criterion_main!(benches);
