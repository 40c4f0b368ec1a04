use feature_bucketing::prelude::*;
use feature_bucketing_examples::{clustered_features, init_tracing, random_features};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let (width, height) = (1024u32, 768u32);
    let mut rng = StdRng::seed_from_u64(7);

    // A textured corner produces a dense cluster on top of sparse background features.
    let mut features = clustered_features(300, DVec2::new(100.0, 100.0), 60.0, &mut rng);
    features.extend(random_features(200, f64::from(width), f64::from(height), 0.0, &mut rng));

    let base = BucketerConfig::uniform(width, height, 8, 4, 5).with_seed(0);
    let mut by_order = FeatureBucketer::new(base.clone().with_scheme(SelectionScheme::ByOrder))?;
    let mut by_chance = FeatureBucketer::new(base.with_scheme(SelectionScheme::ByChance))?;

    by_order.bucket_features(&features);
    by_chance.bucket_features(&features);

    // The cluster was generated first, so by-order keeps only its leading points,
    // while by-chance samples across the whole bucket.
    let cluster_bucket = compute_bucket_id(by_order.grid(), 100.0, 100.0);
    if let Some(cell) = cluster_bucket.cell() {
        let in_cell = |bucketer: &FeatureBucketer| -> Vec<usize> {
            bucketer
                .selected_indices()
                .iter()
                .copied()
                .filter(|&i| bucketer.assignment().bucket_ids()[i] == BucketId::Cell(cell))
                .collect()
        };
        info!("Bucket {} by order keeps {:?}.", cell, in_cell(&by_order));
        info!("Bucket {} by chance keeps {:?}.", cell, in_cell(&by_chance));
    }

    info!("By order: {}", by_order.summary());
    info!("By chance: {}", by_chance.summary());

    Ok(())
}
