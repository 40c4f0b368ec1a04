//! High-level bucketer tying grid, assignment and selection together.
//!
//! [`FeatureBucketer`] is built once from a [`BucketerConfig`] and then fed one
//! point set per frame through [`FeatureBucketer::bucket_features`]. Each call
//! rebuilds the selected and rejected index lists; for
//! [`SelectionScheme::ByChance`] the random generator keeps advancing across
//! calls and is only seeded at construction.
use mint::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assign::BucketAssignment;
use crate::error::Result;
use crate::grid::{BucketGrid, CapacityMask};
use crate::selection::{select_by_chance, select_by_order, ChanceDraw, Selection, SelectionScheme};
use crate::summary::BucketingSummary;

/// Configuration for building a [`FeatureBucketer`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BucketerConfig {
    /// Image width in pixels.
    pub pixels_horizontal: u32,
    /// Image height in pixels.
    pub pixels_vertical: u32,
    /// Capacity per bucket; its shape defines the bucket counts.
    pub capacity_mask: CapacityMask,
    /// Policy applied to over-full buckets.
    pub scheme: SelectionScheme,
    /// Seed for [`SelectionScheme::ByChance`]; ignored by [`SelectionScheme::ByOrder`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    /// Draw method for [`SelectionScheme::ByChance`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance_draw: ChanceDraw,
}

impl Default for BucketerConfig {
    fn default() -> Self {
        Self::uniform(1024, 768, 8, 4, 5)
    }
}

impl BucketerConfig {
    /// Grid of `buckets_horizontal` x `buckets_vertical` buckets that all keep
    /// up to `capacity` features.
    pub fn uniform(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        buckets_horizontal: usize,
        buckets_vertical: usize,
        capacity: u32,
    ) -> Self {
        Self::with_mask(
            pixels_horizontal,
            pixels_vertical,
            CapacityMask::uniform(buckets_vertical, buckets_horizontal, capacity),
        )
    }

    /// Grid whose bucket counts and capacities come from `capacity_mask`.
    pub fn with_mask(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        capacity_mask: CapacityMask,
    ) -> Self {
        Self {
            pixels_horizontal,
            pixels_vertical,
            capacity_mask,
            scheme: SelectionScheme::default(),
            seed: 0,
            chance_draw: ChanceDraw::default(),
        }
    }

    /// Sets the selection scheme.
    pub fn with_scheme(mut self, scheme: SelectionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the seed of the random generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the draw method used by [`SelectionScheme::ByChance`].
    pub fn with_chance_draw(mut self, chance_draw: ChanceDraw) -> Self {
        self.chance_draw = chance_draw;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.grid().map(|_| ())
    }

    fn grid(&self) -> Result<BucketGrid> {
        BucketGrid::with_mask(
            self.pixels_horizontal,
            self.pixels_vertical,
            self.capacity_mask.clone(),
        )
    }
}

enum Policy {
    ByOrder,
    ByChance {
        seed: u64,
        draw: ChanceDraw,
        rng: StdRng,
    },
}

impl Policy {
    fn new(config: &BucketerConfig) -> Self {
        match config.scheme {
            SelectionScheme::ByOrder => Policy::ByOrder,
            SelectionScheme::ByChance => Policy::ByChance {
                seed: config.seed,
                draw: config.chance_draw,
                rng: StdRng::seed_from_u64(config.seed),
            },
        }
    }
}

/// Divides an image into rectangular buckets and keeps a limited number of
/// features in each.
///
/// Not meant for concurrent use; run independent instances per thread.
pub struct FeatureBucketer {
    grid: BucketGrid,
    policy: Policy,
    assignment: BucketAssignment,
    selection: Selection,
}

impl FeatureBucketer {
    /// Builds a bucketer, failing if the configuration is invalid.
    pub fn new(config: BucketerConfig) -> Result<Self> {
        let grid = config.grid()?;
        debug!(
            "Feature bucketer with {}x{} buckets of {:.2}x{:.2} px, scheme {:?}.",
            grid.buckets_horizontal(),
            grid.buckets_vertical(),
            grid.bucket_size_horizontal(),
            grid.bucket_size_vertical(),
            config.scheme
        );
        Ok(Self {
            assignment: BucketAssignment::new(grid.number_of_buckets()),
            policy: Policy::new(&config),
            grid,
            selection: Selection::new(),
        })
    }

    /// Deterministic bucketer keeping the first `capacity` features per bucket.
    pub fn by_order(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        buckets_horizontal: usize,
        buckets_vertical: usize,
        capacity: u32,
    ) -> Result<Self> {
        Self::new(
            BucketerConfig::uniform(
                pixels_horizontal,
                pixels_vertical,
                buckets_horizontal,
                buckets_vertical,
                capacity,
            )
            .with_scheme(SelectionScheme::ByOrder),
        )
    }

    /// Seeded bucketer keeping `capacity` randomly drawn features per bucket.
    pub fn by_chance(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        buckets_horizontal: usize,
        buckets_vertical: usize,
        capacity: u32,
        seed: u64,
    ) -> Result<Self> {
        Self::new(
            BucketerConfig::uniform(
                pixels_horizontal,
                pixels_vertical,
                buckets_horizontal,
                buckets_vertical,
                capacity,
            )
            .with_scheme(SelectionScheme::ByChance)
            .with_seed(seed),
        )
    }

    /// Buckets `points` and rebuilds the selected and rejected index lists.
    ///
    /// Points outside the image (including NaN coordinates) end up in neither list.
    pub fn bucket_features<P>(&mut self, points: &[P])
    where
        P: Copy + Into<Vector2<f64>>,
    {
        self.selection.clear();
        self.assignment.compute(&self.grid, points);

        let mask = self.grid.capacity_mask();
        match &mut self.policy {
            Policy::ByOrder => select_by_order(&self.assignment, mask, &mut self.selection),
            Policy::ByChance { draw, rng, .. } => {
                select_by_chance(&self.assignment, mask, *draw, rng, &mut self.selection)
            }
        }

        debug!(
            "Bucketed {} features: {} selected, {} rejected, {} out of frame.",
            points.len(),
            self.selection.selected.len(),
            self.selection.rejected.len(),
            self.assignment.number_of_invalid()
        );
    }

    /// Indices of kept features, grouped by ascending bucket id.
    pub fn selected_indices(&self) -> &[usize] {
        &self.selection.selected
    }

    /// Indices of features dropped because their bucket was full.
    pub fn rejected_indices(&self) -> &[usize] {
        &self.selection.rejected
    }

    /// Copies the selected features out of `points`.
    ///
    /// `points` should be the slice passed to the last [`Self::bucket_features`] call.
    pub fn selected_points<P: Copy>(&self, points: &[P]) -> Vec<P> {
        gather(points, &self.selection.selected, "selected")
    }

    /// Copies the rejected features out of `points`.
    pub fn rejected_points<P: Copy>(&self, points: &[P]) -> Vec<P> {
        gather(points, &self.selection.rejected, "rejected")
    }

    /// Counters for the last call.
    pub fn summary(&self) -> BucketingSummary {
        BucketingSummary::collect(&self.assignment, &self.selection)
    }

    /// Bucket assignment of the last call, including out-of-frame points.
    pub fn assignment(&self) -> &BucketAssignment {
        &self.assignment
    }

    pub fn grid(&self) -> &BucketGrid {
        &self.grid
    }

    pub fn scheme(&self) -> SelectionScheme {
        match self.policy {
            Policy::ByOrder => SelectionScheme::ByOrder,
            Policy::ByChance { .. } => SelectionScheme::ByChance,
        }
    }

    /// Seed the random generator was constructed with; `None` for [`SelectionScheme::ByOrder`].
    pub fn seed(&self) -> Option<u64> {
        match self.policy {
            Policy::ByOrder => None,
            Policy::ByChance { seed, .. } => Some(seed),
        }
    }

    pub fn number_of_buckets_horizontal(&self) -> usize {
        self.grid.buckets_horizontal()
    }

    pub fn number_of_buckets_vertical(&self) -> usize {
        self.grid.buckets_vertical()
    }

    pub fn number_of_buckets(&self) -> usize {
        self.grid.number_of_buckets()
    }

    pub fn number_of_pixels_horizontal(&self) -> u32 {
        self.grid.pixels_horizontal()
    }

    pub fn number_of_pixels_vertical(&self) -> u32 {
        self.grid.pixels_vertical()
    }

    pub fn bucket_size_horizontal(&self) -> f64 {
        self.grid.bucket_size_horizontal()
    }

    pub fn bucket_size_vertical(&self) -> f64 {
        self.grid.bucket_size_vertical()
    }
}

fn gather<P: Copy>(points: &[P], indices: &[usize], label: &str) -> Vec<P> {
    indices
        .iter()
        .filter_map(|&i| {
            let point = points.get(i).copied();
            if point.is_none() {
                warn!(
                    "Skipping {} index {} beyond {} points.",
                    label,
                    i,
                    points.len()
                );
            }
            point
        })
        .collect()
}
