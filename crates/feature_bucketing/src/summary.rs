//! Diagnostic counters for a bucketing run.
use std::fmt;

use crate::assign::BucketAssignment;
use crate::selection::Selection;

/// Counts gathered from the most recent [`crate::bucketer::FeatureBucketer::bucket_features`] call.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketingSummary {
    /// Number of points passed in.
    pub points: usize,
    /// Points that fell inside the image.
    pub valid: usize,
    /// Points outside the image (or NaN); in neither output list.
    pub out_of_frame: usize,
    pub selected: usize,
    pub rejected: usize,
    /// Selected count per bucket, row-major.
    pub per_bucket_selected: Vec<usize>,
    /// Assigned count per bucket, row-major.
    pub per_bucket_points: Vec<usize>,
}

impl BucketingSummary {
    pub(crate) fn collect(assignment: &BucketAssignment, selection: &Selection) -> Self {
        let per_bucket_points: Vec<usize> = assignment.cells().iter().map(Vec::len).collect();
        let mut per_bucket_selected = vec![0; per_bucket_points.len()];
        for &index in &selection.selected {
            if let Some(cell) = assignment.bucket_ids().get(index).and_then(|id| id.cell()) {
                per_bucket_selected[cell] += 1;
            }
        }

        Self {
            points: assignment.number_of_points(),
            valid: assignment.number_of_valid(),
            out_of_frame: assignment.number_of_invalid(),
            selected: selection.selected.len(),
            rejected: selection.rejected.len(),
            per_bucket_selected,
            per_bucket_points,
        }
    }

    /// Buckets that received more features than they may keep.
    pub fn saturated_buckets(&self) -> usize {
        self.per_bucket_points
            .iter()
            .zip(&self.per_bucket_selected)
            .filter(|&(&n, &kept)| n > kept)
            .count()
    }
}

impl fmt::Display for BucketingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points ({} in frame, {} out of frame): {} selected, {} rejected, {} saturated buckets",
            self.points,
            self.valid,
            self.out_of_frame,
            self.selected,
            self.rejected,
            self.saturated_buckets()
        )
    }
}
