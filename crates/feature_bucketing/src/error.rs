//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Errors only arise while building a grid or a bucketer; bucketing a point set
//! never fails.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed capacity mask: row {row} has {found} entries, expected {expected}")]
    MalformedMask {
        row: usize,
        expected: usize,
        found: usize,
    },
}
