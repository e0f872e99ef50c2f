//! # Filter Benchmarks
//!
//! Performance benchmarks for roadworks-core filter evaluation.
//!
//! Run with: `cargo bench -p roadworks-core`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roadworks_core::{
    FacetState, FilterEngine, Metres, Road, RoadId, RoadRow, RoadStatus, Ward, views,
};
use std::hint::black_box;

/// Create N road rows cycling through wards and statuses.
fn create_rows(size: usize) -> Vec<RoadRow> {
    (0..size)
        .map(|i| RoadRow {
            road: Road {
                id: RoadId(i as u32 + 1),
                name: format!("Link Road {}", i + 1),
                ward: Ward::new((i % 5) as u8 + 1).expect("ward"),
                length: Metres::new(500 + (i as u32 % 60) * 100),
                status: if i % 4 == 0 {
                    RoadStatus::Inactive
                } else {
                    RoadStatus::Active
                },
                registered_on: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            },
            project_count: i % 3,
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_identity_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_filter");
    let facets = views::road_facets();
    let state = FacetState::new();

    for size in [100, 1000, 10000].iter() {
        let rows = create_rows(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(FilterEngine::evaluate(&rows, &facets, &state)));
        });
    }

    group.finish();
}

fn bench_categorical_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical_filter");
    let facets = views::road_facets();
    let state = FacetState::new()
        .with(views::WARD, "3")
        .with(views::STATUS, "active");

    for size in [100, 1000, 10000].iter() {
        let rows = create_rows(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(FilterEngine::evaluate(&rows, &facets, &state)));
        });
    }

    group.finish();
}

fn bench_text_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_filter");
    let facets = views::road_facets();
    let state = FacetState::new().with(views::QUERY, "link road 42");

    for size in [100, 1000, 10000].iter() {
        let rows = create_rows(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(FilterEngine::evaluate(&rows, &facets, &state)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_identity_filter,
    bench_categorical_filter,
    bench_text_filter,
);

criterion_main!(benches);
