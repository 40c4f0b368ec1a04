#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Uniformly scattered feature positions inside a `width` x `height` image.
pub fn random_points(count: usize, width: f64, height: f64, seed: u64) -> Vec<DVec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let scale = f64::from(u32::MAX) + 1.0;
    (0..count)
        .map(|_| {
            let u = f64::from(rng.next_u32()) / scale;
            let v = f64::from(rng.next_u32()) / scale;
            DVec2::new(u * width, v * height)
        })
        .collect()
}
