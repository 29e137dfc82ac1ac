use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sensor_stats::models::{Reading, SensorField};
use sensor_stats::services::{
    compute_aggregates, detect_anomalies, iqr_filtered_series, parse_readings,
};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Deterministic readings with a spike every 97th row and a repeated
/// timestamp every 10th row.
fn synthetic_readings(count: usize) -> Vec<Reading> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let minute = (i - i / 10) as i64;
            let wave = ((i % 360) as f64).to_radians().sin();
            let temperature = if i % 97 == 0 { 80.0 } else { 21.0 + 3.0 * wave };
            let humidity = (i % 7 != 0).then(|| 45.0 + 10.0 * wave);
            Reading::new(
                start + Duration::minutes(minute),
                Some(temperature),
                humidity,
                Some(30.0 + (i % 50) as f64),
            )
        })
        .collect()
}

fn synthetic_csv(count: usize) -> String {
    let mut csv = String::from("timestamp,temperature,humidity,air_quality\n");
    for reading in synthetic_readings(count) {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            reading.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            reading.temperature.map(|v| v.to_string()).unwrap_or_default(),
            reading.humidity.map(|v| v.to_string()).unwrap_or_default(),
            reading.air_quality.map(|v| v.to_string()).unwrap_or_default(),
        ));
    }
    csv
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in SIZES {
        let readings = synthetic_readings(size);
        group.bench_with_input(BenchmarkId::new("aggregates", size), &readings, |b, input| {
            b.iter(|| compute_aggregates(black_box(input)));
        });
    }

    group.finish();
}

fn bench_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("outliers");

    for size in SIZES {
        let readings = synthetic_readings(size);
        group.bench_with_input(BenchmarkId::new("detect_anomalies", size), &readings, |b, input| {
            b.iter(|| detect_anomalies(black_box(input), SensorField::Temperature));
        });
    }

    group.finish();
}

fn bench_deduplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("deduplication");

    for size in SIZES {
        let readings = synthetic_readings(size);
        group.bench_with_input(BenchmarkId::new("iqr_filtered_series", size), &readings, |b, input| {
            b.iter(|| iqr_filtered_series(black_box(input), SensorField::Humidity));
        });
    }

    group.finish();
}

fn bench_csv_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");

    let csv = synthetic_csv(10_000);
    group.bench_function("parse_10k_rows", |b| {
        b.iter(|| parse_readings(black_box(csv.as_bytes())));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_statistics,
    bench_outliers,
    bench_deduplication,
    bench_csv_parsing
);
criterion_main!(benches);
