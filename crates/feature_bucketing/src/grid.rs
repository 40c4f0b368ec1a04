//! Tessellation of the image plane into rectangular buckets.
//!
//! [`BucketGrid`] derives per-axis bucket sizes from the image size in pixels and
//! the shape of a [`CapacityMask`]. Bucket sizes are real valued, so image sizes
//! that are not a multiple of the bucket count yield fractional bucket sizes.
//!
//! Buckets are numbered row-major: `id = row * buckets_horizontal + col`, with
//! row 0 at the top of the image (`y = 0`).
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of features retained per bucket, stored row-major.
///
/// Rows correspond to vertical buckets, columns to horizontal buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct CapacityMask {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl CapacityMask {
    /// Create a mask of `rows` x `cols` buckets that all share `capacity`.
    ///
    /// A shape whose bucket count overflows `usize` yields an empty buffer,
    /// which [`CapacityMask::validate`] reports.
    pub fn uniform(rows: usize, cols: usize, capacity: u32) -> Self {
        let data = rows
            .checked_mul(cols)
            .map(|len| vec![capacity; len])
            .unwrap_or_default();
        Self { rows, cols, data }
    }

    /// Create a mask from nested rows. All rows must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(Error::InvalidConfig(
                "capacity mask must have at least one row".into(),
            ));
        };
        let cols = first.len();
        if cols == 0 {
            return Err(Error::InvalidConfig(
                "capacity mask must have at least one column".into(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::MalformedMask {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Create a mask from a flat row-major buffer.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<u32>) -> Result<Self> {
        let mask = Self { rows, cols, data };
        mask.validate()?;
        Ok(mask)
    }

    /// Number of vertical buckets.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of horizontal buckets.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of buckets.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Capacity of the bucket at (`row`, `col`), or `None` when outside the mask.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Capacity of the bucket with row-major id `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.len()`.
    pub fn capacity(&self, cell: usize) -> u32 {
        self.data[cell]
    }

    /// Capacities in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Sum of all bucket capacities.
    pub fn total_capacity(&self) -> u64 {
        self.data.iter().map(|&c| u64::from(c)).sum()
    }

    /// Checks that the mask has a non-empty shape matching its buffer.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(
                "bucket counts must be > 0 in both directions".into(),
            ));
        }
        let Some(len) = self.rows.checked_mul(self.cols) else {
            return Err(Error::InvalidConfig(format!(
                "bucket count {}x{} overflows",
                self.rows, self.cols
            )));
        };
        if self.data.len() != len {
            return Err(Error::InvalidConfig(format!(
                "capacity mask holds {} entries but its shape is {}x{}",
                self.data.len(),
                self.rows,
                self.cols
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<u32>>> for CapacityMask {
    type Error = Error;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<CapacityMask> for Vec<Vec<u32>> {
    fn from(mask: CapacityMask) -> Self {
        if mask.cols == 0 {
            return Vec::new();
        }
        mask.data.chunks(mask.cols).map(<[u32]>::to_vec).collect()
    }
}

/// Image-plane tessellation with per-bucket capacities.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketGrid {
    pixels_horizontal: u32,
    pixels_vertical: u32,
    mask: CapacityMask,
    bucket_size_horizontal: f64,
    bucket_size_vertical: f64,
}

impl BucketGrid {
    /// Grid of `buckets_horizontal` x `buckets_vertical` buckets sharing one capacity.
    pub fn uniform(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        buckets_horizontal: usize,
        buckets_vertical: usize,
        capacity: u32,
    ) -> Result<Self> {
        Self::with_mask(
            pixels_horizontal,
            pixels_vertical,
            CapacityMask::uniform(buckets_vertical, buckets_horizontal, capacity),
        )
    }

    /// Grid whose bucket counts are given by the shape of `mask`.
    pub fn with_mask(
        pixels_horizontal: u32,
        pixels_vertical: u32,
        mask: CapacityMask,
    ) -> Result<Self> {
        if pixels_horizontal == 0 || pixels_vertical == 0 {
            return Err(Error::InvalidConfig(
                "pixels_horizontal and pixels_vertical must be > 0".into(),
            ));
        }
        mask.validate()?;

        let bucket_size_horizontal = f64::from(pixels_horizontal) / mask.cols() as f64;
        let bucket_size_vertical = f64::from(pixels_vertical) / mask.rows() as f64;

        Ok(Self {
            pixels_horizontal,
            pixels_vertical,
            mask,
            bucket_size_horizontal,
            bucket_size_vertical,
        })
    }

    pub fn pixels_horizontal(&self) -> u32 {
        self.pixels_horizontal
    }

    pub fn pixels_vertical(&self) -> u32 {
        self.pixels_vertical
    }

    pub fn buckets_horizontal(&self) -> usize {
        self.mask.cols()
    }

    pub fn buckets_vertical(&self) -> usize {
        self.mask.rows()
    }

    pub fn number_of_buckets(&self) -> usize {
        self.mask.len()
    }

    /// Bucket width in pixels.
    pub fn bucket_size_horizontal(&self) -> f64 {
        self.bucket_size_horizontal
    }

    /// Bucket height in pixels.
    pub fn bucket_size_vertical(&self) -> f64 {
        self.bucket_size_vertical
    }

    pub fn capacity_mask(&self) -> &CapacityMask {
        &self.mask
    }

    /// Splits a bucket id into (row, col).
    pub fn row_col(&self, cell: usize) -> Option<(usize, usize)> {
        if cell >= self.number_of_buckets() {
            return None;
        }
        let cols = self.buckets_horizontal();
        Some((cell / cols, cell % cols))
    }

    /// Pixel-space bounds `(min, max)` of a bucket, for overlay rendering.
    pub fn cell_bounds(&self, cell: usize) -> Option<(DVec2, DVec2)> {
        let (row, col) = self.row_col(cell)?;
        let size = DVec2::new(self.bucket_size_horizontal, self.bucket_size_vertical);
        let min = DVec2::new(col as f64, row as f64) * size;
        Some((min, min + size))
    }
}
