mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_bucketing::prelude::*;

const POINT_COUNTS: [usize; 4] = [256, 1024, 4096, 16384];

fn bucketing_scheme_benches(c: &mut Criterion) {
    let schemes = [
        ("by_order", SelectionScheme::ByOrder, ChanceDraw::Rejection),
        ("by_chance_rejection", SelectionScheme::ByChance, ChanceDraw::Rejection),
        ("by_chance_shuffle", SelectionScheme::ByChance, ChanceDraw::PartialShuffle),
    ];

    for (name, scheme, draw) in schemes {
        let mut group = c.benchmark_group(format!("bucketing/{name}"));

        for &n in &POINT_COUNTS {
            let points = common::random_points(n, 1024.0, 768.0, 0xB0C4E7 ^ n as u64);
            let config = BucketerConfig::default()
                .with_scheme(scheme)
                .with_chance_draw(draw)
                .with_seed(0xFEED);
            let mut bucketer = FeatureBucketer::new(config).expect("valid config");
            group.throughput(common::elements_throughput(n));

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| {
                    bucketer.bucket_features(&points);
                    black_box(bucketer.selected_indices().len());
                });
            });
        }

        group.finish();
    }
}

fn bucketing_grid_density_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucketing/grid_density");
    let n = 4096usize;
    let points = common::random_points(n, 1280.0, 720.0, 0xDE5);
    group.throughput(common::elements_throughput(n));

    for &(cols, rows) in &[(1usize, 1usize), (8, 4), (32, 18), (128, 72)] {
        let mut bucketer =
            FeatureBucketer::by_chance(1280, 720, cols, rows, 4, 0x5EED).expect("valid config");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{cols}x{rows}")),
            &(cols, rows),
            |b, _| {
                b.iter(|| {
                    bucketer.bucket_features(&points);
                    black_box(bucketer.rejected_indices().len());
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = bucketing_scheme_benches, bucketing_grid_density_benches
}
criterion_main!(benches);
