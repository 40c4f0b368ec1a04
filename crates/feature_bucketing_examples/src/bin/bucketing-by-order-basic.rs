use feature_bucketing::prelude::*;
use feature_bucketing_examples::{init_tracing, log_bucket_table, random_features};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // VGA frame, 8x6 buckets keeping up to 4 features each.
    let (width, height) = (640u32, 480u32);
    let mut bucketer = FeatureBucketer::by_order(width, height, 8, 6, 4)?;

    let mut rng = StdRng::seed_from_u64(2025);
    let features = random_features(800, f64::from(width), f64::from(height), 16.0, &mut rng);

    bucketer.bucket_features(&features);
    log_bucket_table(&bucketer);

    let kept = bucketer.selected_points(&features);
    info!(
        "Kept {} of {} features; first kept feature at ({:.1}, {:.1}).",
        kept.len(),
        features.len(),
        kept.first().map_or(f64::NAN, |p| p.x),
        kept.first().map_or(f64::NAN, |p| p.y)
    );

    Ok(())
}
