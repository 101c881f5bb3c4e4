use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tollway_core::{
    matrix::{distance_matrix::DistanceMatrix, segment::SegmentRecord, unroll::unroll},
    pricing::{toll_rate::calculate_toll_rates, vehicle::VehicleRates},
};

// Chain of `num_locations` locations with a few repeated segments.
fn create_segments(num_locations: i64) -> Vec<SegmentRecord> {
    (0..num_locations - 1)
        .flat_map(|i| {
            [
                SegmentRecord::new(1000 + i, 1001 + i, 1.5 + (i % 7) as f64),
                SegmentRecord::new(1000 + i, 1001 + i, 0.5),
            ]
        })
        .collect()
}

fn matrix_benchmark(c: &mut Criterion) {
    let segments = create_segments(200);

    c.bench_function("build distance matrix (200 locations)", |b| {
        b.iter(|| DistanceMatrix::from_segments(black_box(&segments)))
    });

    let matrix = DistanceMatrix::from_segments(&segments).unwrap();
    c.bench_function("unroll distance matrix (200 locations)", |b| {
        b.iter(|| unroll(black_box(&matrix)))
    });

    let rows = unroll(&matrix);
    let rates = VehicleRates::default();
    c.bench_function("toll rates (200 locations)", |b| {
        b.iter(|| calculate_toll_rates(black_box(&rows), black_box(&rates)))
    });
}

criterion_group!(benches, matrix_benchmark);
criterion_main!(benches);
