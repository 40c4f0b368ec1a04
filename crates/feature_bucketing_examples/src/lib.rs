#![forbid(unsafe_code)]

use feature_bucketing::prelude::*;
use glam::DVec2;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a console subscriber. Respects `RUST_LOG`, defaults to debug output
/// for the bucketing crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,feature_bucketing=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Uniform random feature positions; `margin` pixels around the image are
/// included so some features land out of frame, as detector output often does.
pub fn random_features(
    count: usize,
    width: f64,
    height: f64,
    margin: f64,
    rng: &mut impl Rng,
) -> Vec<DVec2> {
    let scale = f64::from(u32::MAX) + 1.0;
    (0..count)
        .map(|_| {
            let u = f64::from(rng.next_u32()) / scale;
            let v = f64::from(rng.next_u32()) / scale;
            DVec2::new(
                u * (width + 2.0 * margin) - margin,
                v * (height + 2.0 * margin) - margin,
            )
        })
        .collect()
}

/// Features clustered around `center`, mimicking a highly textured image region.
pub fn clustered_features(
    count: usize,
    center: DVec2,
    spread: f64,
    rng: &mut impl Rng,
) -> Vec<DVec2> {
    let scale = f64::from(u32::MAX) + 1.0;
    (0..count)
        .map(|_| {
            let u = f64::from(rng.next_u32()) / scale * 2.0 - 1.0;
            let v = f64::from(rng.next_u32()) / scale * 2.0 - 1.0;
            center + DVec2::new(u, v) * spread
        })
        .collect()
}

/// Logs the summary and a per-bucket `selected/assigned` table of the last run.
pub fn log_bucket_table(bucketer: &FeatureBucketer) {
    let summary = bucketer.summary();
    info!("{}", summary);

    let cols = bucketer.number_of_buckets_horizontal();
    for row in 0..bucketer.number_of_buckets_vertical() {
        let line: Vec<String> = (row * cols..(row + 1) * cols)
            .map(|cell| {
                format!(
                    "{:>3}/{:<3}",
                    summary.per_bucket_selected[cell], summary.per_bucket_points[cell]
                )
            })
            .collect();
        info!("row {:>2}: {}", row, line.join(" "));
    }
}
