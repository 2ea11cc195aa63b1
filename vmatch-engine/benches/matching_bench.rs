//! Matching Throughput Benchmark
//!
//! Measures radius lookup and full-pipeline throughput over a synthetic
//! catalog laid out on a regular grid.
//!
//! **Goal:** A 100k-sample batch completes in seconds on a laptop

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use vmatch_common::config::MatchingConfig;
use vmatch_common::models::{EruptionDate, EruptionRecord, Sample, SourceDatabase, VolcanoCandidate};
use vmatch_common::GeoPoint;
use vmatch_engine::{MatchingEngine, VolcanoIndex};

/// One volcano every half degree between 60S and 60N
fn synthetic_catalog() -> Vec<VolcanoCandidate> {
    let mut volcanoes = Vec::new();
    for lat_step in 0..240 {
        for lon_step in 0..720 {
            if (lat_step * 7 + lon_step * 3) % 11 != 0 {
                continue;
            }
            let id = format!("{}-{}", lat_step, lon_step);
            let location = GeoPoint {
                lon: -180.0 + lon_step as f64 * 0.5,
                lat: -60.0 + lat_step as f64 * 0.5,
            };
            let mut v = VolcanoCandidate::new(id.clone(), format!("Volcano {}", id), location);
            v.tectonic_setting = Some("Subduction zone / Continental crust (>25 km)".to_string());
            v.major_rock_types = vec!["Andesite / Basaltic Andesite".to_string(), "Dacite".to_string()];
            v.eruptions = vec![EruptionRecord::starting(EruptionDate::year(1900 + (lon_step % 120) as i32))];
            volcanoes.push(v);
        }
    }
    volcanoes
}

fn synthetic_samples(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let location = GeoPoint {
                lon: ((i * 37) % 360) as f64 - 179.5,
                lat: ((i * 13) % 110) as f64 - 55.0 + 0.17,
            };
            let mut s = Sample::new(format!("S{}", i), SourceDatabase::Georoc, location);
            s.rock_type = Some("BASALTIC ANDESITE".to_string());
            s.tectonic_setting = Some("CONVERGENT MARGIN".to_string());
            s.eruption_date = Some(EruptionDate::year(1950));
            s.reference = Some("Arc magmatism of the Volcano 10-20 edifice".to_string());
            s
        })
        .collect()
}

fn bench_matching(c: &mut Criterion) {
    let index = Arc::new(VolcanoIndex::build(synthetic_catalog()).unwrap());
    let engine = MatchingEngine::new(Arc::clone(&index), MatchingConfig::default()).unwrap();
    let samples = synthetic_samples(10_000);
    let ts = Utc::now();

    let mut group = c.benchmark_group("matching");

    group.bench_function("within_radius_80km", |b| {
        let point = GeoPoint { lon: 12.3, lat: 41.7 };
        b.iter(|| {
            let found = index.within_radius(black_box(&point), 80.0);
            black_box(found.len());
        });
    });

    group.bench_function("match_sample", |b| {
        let sample = &samples[0];
        b.iter(|| {
            black_box(engine.match_sample(black_box(sample), ts));
        });
    });

    group.throughput(Throughput::Elements(samples.len() as u64));
    group.sample_size(10);
    group.bench_function("match_batch_10k", |b| {
        b.iter(|| {
            black_box(engine.match_batch(black_box(&samples), ts));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_matching);
criterion_main!(benches);
