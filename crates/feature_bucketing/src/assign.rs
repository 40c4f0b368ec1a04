//! Assignment of image points to grid buckets.
//!
//! [`compute_bucket_id`] maps a single coordinate to a [`BucketId`];
//! [`BucketAssignment`] groups a whole point set by bucket, keeping the order in
//! which points were encountered. That order decides which points win in
//! [`crate::selection::select_by_order`] and is the draw basis for
//! [`crate::selection::select_by_chance`].
use mint::Vector2;

use crate::grid::BucketGrid;

/// Bucket a point falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BucketId {
    /// Row-major bucket id in `[0, number_of_buckets)`.
    Cell(usize),
    /// The point lies outside `[0, pixels)` on at least one axis, or is NaN.
    OutOfFrame,
}

impl BucketId {
    pub fn cell(self) -> Option<usize> {
        match self {
            BucketId::Cell(id) => Some(id),
            BucketId::OutOfFrame => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, BucketId::Cell(_))
    }
}

/// Computes the bucket of the pixel coordinate (`x`, `y`).
///
/// The lower bound is inclusive and the upper bound exclusive on both axes. NaN
/// fails both comparisons and therefore lands in [`BucketId::OutOfFrame`].
pub fn compute_bucket_id(grid: &BucketGrid, x: f64, y: f64) -> BucketId {
    let visible_horizontal = x >= 0.0 && x < f64::from(grid.pixels_horizontal());
    let visible_vertical = y >= 0.0 && y < f64::from(grid.pixels_vertical());
    if !(visible_horizontal && visible_vertical) {
        return BucketId::OutOfFrame;
    }

    // Truncation toward zero; clamped so rounding of fractional bucket sizes
    // never spills past the last row or column.
    let col = ((x / grid.bucket_size_horizontal()) as usize).min(grid.buckets_horizontal() - 1);
    let row = ((y / grid.bucket_size_vertical()) as usize).min(grid.buckets_vertical() - 1);

    BucketId::Cell(row * grid.buckets_horizontal() + col)
}

/// Per-call grouping of point indices by bucket.
#[derive(Clone, Debug, Default)]
pub struct BucketAssignment {
    cells: Vec<Vec<usize>>,
    out_of_frame: Vec<usize>,
    bucket_ids: Vec<BucketId>,
}

impl BucketAssignment {
    /// Create an empty assignment for a grid with `number_of_buckets` buckets.
    pub fn new(number_of_buckets: usize) -> Self {
        Self {
            cells: vec![Vec::new(); number_of_buckets],
            out_of_frame: Vec::new(),
            bucket_ids: Vec::new(),
        }
    }

    /// Discards the previous assignment and assigns every point of `points`.
    pub fn compute<P>(&mut self, grid: &BucketGrid, points: &[P])
    where
        P: Copy + Into<Vector2<f64>>,
    {
        self.cells.resize_with(grid.number_of_buckets(), Vec::new);
        for cell in &mut self.cells {
            cell.clear();
        }
        self.out_of_frame.clear();
        self.bucket_ids.clear();
        self.bucket_ids.reserve(points.len());

        for (index, &point) in points.iter().enumerate() {
            let p: Vector2<f64> = point.into();
            let id = compute_bucket_id(grid, p.x, p.y);
            match id {
                BucketId::Cell(cell) => self.cells[cell].push(index),
                BucketId::OutOfFrame => self.out_of_frame.push(index),
            }
            self.bucket_ids.push(id);
        }
    }

    /// Point indices per bucket, indexed by bucket id.
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Point indices of one bucket in encounter order; empty for unknown ids.
    pub fn cell(&self, id: usize) -> &[usize] {
        self.cells.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Indices of points that fell outside the image.
    pub fn out_of_frame(&self) -> &[usize] {
        &self.out_of_frame
    }

    /// Bucket of every point, indexed like the input.
    pub fn bucket_ids(&self) -> &[BucketId] {
        &self.bucket_ids
    }

    pub fn number_of_points(&self) -> usize {
        self.bucket_ids.len()
    }

    pub fn number_of_valid(&self) -> usize {
        self.bucket_ids.len() - self.out_of_frame.len()
    }

    pub fn number_of_invalid(&self) -> usize {
        self.out_of_frame.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    fn grid() -> BucketGrid {
        BucketGrid::uniform(1024, 768, 8, 4, 5).unwrap()
    }

    #[test]
    fn bounds_are_lower_inclusive_upper_exclusive() {
        let g = grid();
        assert_eq!(compute_bucket_id(&g, 0.0, 0.0), BucketId::Cell(0));
        assert_eq!(compute_bucket_id(&g, 1024.0, 0.0), BucketId::OutOfFrame);
        assert_eq!(compute_bucket_id(&g, 0.0, 768.0), BucketId::OutOfFrame);
        assert_eq!(compute_bucket_id(&g, -0.001, 10.0), BucketId::OutOfFrame);
        assert_eq!(
            compute_bucket_id(&g, 1024.0 - 1e-9, 768.0 - 1e-9),
            BucketId::Cell(31)
        );
    }

    #[test]
    fn bucket_id_is_row_major() {
        let g = grid();
        // Column 2 (256..384), row 1 (192..384).
        assert_eq!(compute_bucket_id(&g, 300.0, 200.0), BucketId::Cell(10));
        // Exactly on an inner boundary belongs to the next bucket.
        assert_eq!(compute_bucket_id(&g, 128.0, 0.0), BucketId::Cell(1));
        assert_eq!(compute_bucket_id(&g, 0.0, 192.0), BucketId::Cell(8));
    }

    #[test]
    fn non_finite_coordinates_are_out_of_frame() {
        let g = grid();
        assert_eq!(compute_bucket_id(&g, f64::NAN, 10.0), BucketId::OutOfFrame);
        assert_eq!(compute_bucket_id(&g, 10.0, f64::NAN), BucketId::OutOfFrame);
        assert_eq!(
            compute_bucket_id(&g, f64::INFINITY, 10.0),
            BucketId::OutOfFrame
        );
        assert_eq!(
            compute_bucket_id(&g, 10.0, f64::NEG_INFINITY),
            BucketId::OutOfFrame
        );
    }

    #[test]
    fn fractional_bucket_sizes_stay_inside_grid() {
        let g = BucketGrid::uniform(10, 10, 3, 3, 1).unwrap();
        let id = compute_bucket_id(&g, 9.999_999_999, 9.999_999_999);
        assert_eq!(id, BucketId::Cell(8));
    }

    #[test]
    fn compute_groups_indices_in_encounter_order() {
        let g = grid();
        let points = vec![
            DVec2::new(10.0, 10.0),
            DVec2::new(2000.0, 10.0),
            DVec2::new(130.0, 10.0),
            DVec2::new(20.0, 20.0),
            DVec2::new(f64::NAN, 1.0),
        ];

        let mut assignment = BucketAssignment::new(g.number_of_buckets());
        assignment.compute(&g, &points);

        assert_eq!(assignment.cell(0), &[0, 3]);
        assert_eq!(assignment.cell(1), &[2]);
        assert_eq!(assignment.out_of_frame(), &[1, 4]);
        assert_eq!(assignment.number_of_points(), 5);
        assert_eq!(assignment.number_of_valid(), 3);
        assert_eq!(assignment.number_of_invalid(), 2);
        assert_eq!(assignment.bucket_ids()[2], BucketId::Cell(1));
        assert!(!assignment.bucket_ids()[1].is_valid());
        assert!(assignment.cell(99).is_empty());
    }

    #[test]
    fn compute_resets_previous_state() {
        let g = grid();
        let mut assignment = BucketAssignment::default();

        assignment.compute(&g, &[[10.0_f64, 10.0], [-1.0, 0.0]]);
        assert_eq!(assignment.cell(0), &[0]);

        assignment.compute(&g, &[[500.0_f64, 500.0]]);
        assert!(assignment.cell(0).is_empty());
        assert!(assignment.out_of_frame().is_empty());
        assert_eq!(assignment.bucket_ids(), &[BucketId::Cell(19)]);
        assert_eq!(assignment.cells().len(), 32);
    }
}
