//! Per-bucket selection policies.
//!
//! A policy decides which point indices of an over-full bucket are kept:
//! - [select_by_order]: keeps the first `capacity` points in encounter order.
//! - [select_by_chance]: keeps `capacity` points drawn uniformly at random.
//!
//! Both walk buckets in ascending id and write into a [Selection], preserving
//! encounter order inside each bucket. Points outside the image are never
//! visited. The policy in use is configured with [SelectionScheme].
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod by_chance;
pub mod by_order;

pub use by_chance::{select_by_chance, select_cell_by_chance};
pub use by_order::{select_by_order, select_cell_by_order};

/// Strategy for choosing which features of an over-full bucket are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectionScheme {
    /// Random subset, reproducible for a fixed seed and call history.
    #[default]
    ByChance,
    /// First features in the order they were provided.
    ByOrder,
}

/// How [SelectionScheme::ByChance] draws its random subset.
///
/// Both methods keep exactly `capacity` features per bucket, but for the same
/// seed they keep different subsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChanceDraw {
    /// Draw positions until `capacity` distinct ones were hit. Draw count is
    /// unbounded in the worst case.
    #[default]
    Rejection,
    /// Partial Fisher-Yates shuffle: exactly `capacity` draws per bucket.
    PartialShuffle,
}

/// Selected and rejected point indices of one bucketing run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected: Vec<usize>,
    pub rejected: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.rejected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.rejected.is_empty()
    }
}

/// Draw a uniform integer in `[0, n)` without modulo bias.
///
/// `n` must be > 0.
#[inline]
pub(crate) fn uniform_below(rng: &mut dyn Rng, n: usize) -> usize {
    debug_assert!(n > 0, "uniform_below requires n > 0");
    let n = n as u64;
    // Values below 2^64 mod n would over-represent the low residues.
    let threshold = n.wrapping_neg() % n;
    loop {
        let x = rng.next_u64();
        if x >= threshold {
            return (x % n) as usize;
        }
    }
}


#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::test_rng::SequenceRng;
    use super::*;

    #[test]
    fn uniform_below_maps_values_into_range() {
        let mut rng = SequenceRng::new(vec![1000, 1001, 1004]);
        assert_eq!(uniform_below(&mut rng, 5), 0);
        assert_eq!(uniform_below(&mut rng, 5), 1);
        assert_eq!(uniform_below(&mut rng, 5), 4);
    }

    #[test]
    fn uniform_below_rejects_biased_low_values() {
        // 2^64 mod 5 == 1, so a raw 0 is rejected and the next value is used.
        let mut rng = SequenceRng::new(vec![0, 7]);
        assert_eq!(uniform_below(&mut rng, 5), 2);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn uniform_below_with_one_is_always_zero() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..16 {
            assert_eq!(uniform_below(&mut rng, 1), 0);
        }
    }

    #[test]
    fn uniform_below_covers_small_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..256 {
            seen[uniform_below(&mut rng, 4)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn selection_clear_empties_both_lists() {
        let mut selection = Selection {
            selected: vec![1, 2],
            rejected: vec![3],
        };
        assert!(!selection.is_empty());
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn defaults_match_reference_behavior() {
        assert_eq!(SelectionScheme::default(), SelectionScheme::ByChance);
        assert_eq!(ChanceDraw::default(), ChanceDraw::Rejection);
    }
}
