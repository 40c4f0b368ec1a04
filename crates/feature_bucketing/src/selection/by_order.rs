//! Deterministic selection: the first features of a bucket win.
use crate::assign::BucketAssignment;
use crate::grid::CapacityMask;
use crate::selection::Selection;

/// Keeps the first `capacity` indices of every bucket and rejects the rest.
pub fn select_by_order(assignment: &BucketAssignment, mask: &CapacityMask, out: &mut Selection) {
    for (cell, indices) in assignment.cells().iter().enumerate() {
        select_cell_by_order(indices, mask.capacity(cell) as usize, out);
    }
}

pub fn select_cell_by_order(indices: &[usize], capacity: usize, out: &mut Selection) {
    let (kept, dropped) = indices.split_at(capacity.min(indices.len()));
    out.selected.extend_from_slice(kept);
    out.rejected.extend_from_slice(dropped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BucketGrid;

    #[test]
    fn under_capacity_keeps_everything() {
        let mut out = Selection::new();
        select_cell_by_order(&[4, 1, 7], 3, &mut out);
        assert_eq!(out.selected, vec![4, 1, 7]);
        assert!(out.rejected.is_empty());
    }

    #[test]
    fn over_capacity_truncates_in_encounter_order() {
        let mut out = Selection::new();
        select_cell_by_order(&[0, 1, 2, 3, 4], 3, &mut out);
        assert_eq!(out.selected, vec![0, 1, 2]);
        assert_eq!(out.rejected, vec![3, 4]);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut out = Selection::new();
        select_cell_by_order(&[5, 6], 0, &mut out);
        assert!(out.selected.is_empty());
        assert_eq!(out.rejected, vec![5, 6]);
    }

    #[test]
    fn buckets_are_visited_in_ascending_id() {
        let mask = CapacityMask::from_rows(vec![vec![1, 2]]).unwrap();
        let grid = BucketGrid::with_mask(20, 10, mask).unwrap();
        // Right bucket first in input, then left bucket.
        let points = [
            [15.0_f64, 1.0],
            [16.0, 1.0],
            [17.0, 1.0],
            [1.0, 1.0],
            [2.0, 1.0],
            [-3.0, 1.0],
        ];

        let mut assignment = BucketAssignment::new(grid.number_of_buckets());
        assignment.compute(&grid, &points);

        let mut out = Selection::new();
        select_by_order(&assignment, grid.capacity_mask(), &mut out);

        assert_eq!(out.selected, vec![3, 0, 1]);
        assert_eq!(out.rejected, vec![4, 2]);
    }
}
