//! # Store Errors
//!
//! Error types for document store operations.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
///
/// None of these are recoverable by the caller; the HTTP layer turns every
/// variant into a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver reported a failure
    #[error("database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// A JSON document could not be converted to BSON
    #[error("document encoding failed: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}
