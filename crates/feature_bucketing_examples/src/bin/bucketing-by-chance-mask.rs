use feature_bucketing::prelude::*;
use feature_bucketing_examples::{init_tracing, log_bucket_table, random_features};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

// Capacity mask loaded the way a pipeline configuration would provide it.
// The bottom row sees the vehicle hood, so no features are kept there.
const CONFIG: &str = r#"{
    "pixels_horizontal": 1241,
    "pixels_vertical": 376,
    "capacity_mask": [
        [2, 4, 6, 6, 4, 2],
        [4, 8, 8, 8, 8, 4],
        [0, 0, 0, 0, 0, 0]
    ],
    "scheme": "ByChance",
    "seed": 42,
    "chance_draw": "PartialShuffle"
}"#;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config: BucketerConfig = serde_json::from_str(CONFIG)?;
    let mut bucketer = FeatureBucketer::new(config)?;
    info!(
        "Buckets are {:.2} x {:.2} px.",
        bucketer.bucket_size_horizontal(),
        bucketer.bucket_size_vertical()
    );

    let mut rng = StdRng::seed_from_u64(99);
    for frame in 0..3 {
        let features = random_features(1500, 1241.0, 376.0, 8.0, &mut rng);
        bucketer.bucket_features(&features);
        info!("Frame {}:", frame);
        log_bucket_table(&bucketer);
    }

    Ok(())
}
