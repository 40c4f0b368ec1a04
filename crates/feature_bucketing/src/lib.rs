#![forbid(unsafe_code)]
//! feature_bucketing: Grid-based bucketing of 2D image features.
//!
//! The image plane is split into rectangular buckets and only a limited number
//! of features is kept per bucket, which spreads features evenly over the image.
//!
//! Modules:
//! - grid: bucket tessellation and per-bucket capacity masks
//! - assign: mapping of points to buckets, out-of-frame handling
//! - selection: by-order and by-chance selection policies
//! - bucketer: the [`bucketer::FeatureBucketer`] front end and its configuration
//! - summary: diagnostic counters of a bucketing run
pub mod assign;
pub mod bucketer;
pub mod error;
pub mod grid;
pub mod selection;
pub mod summary;

/// Convenient re-exports for common types. Import with `use feature_bucketing::prelude::*;`.
pub mod prelude {
    pub use crate::assign::{compute_bucket_id, BucketAssignment, BucketId};
    pub use crate::bucketer::{BucketerConfig, FeatureBucketer};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{BucketGrid, CapacityMask};
    pub use crate::selection::{
        select_by_chance, select_by_order, ChanceDraw, Selection, SelectionScheme,
    };
    pub use crate::summary::BucketingSummary;
}
