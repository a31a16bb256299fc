//! Error types for registry and scanner operations.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the document registry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be serialized.
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record is tracked under the given slug.
    #[error("no document with slug {0}")]
    UnknownSlug(String),

    /// A remote id is already owned by another record.
    #[error("remote id {id} already belongs to document {owner}")]
    DuplicateRemoteId {
        /// The remote id that was assigned twice.
        id: u64,
        /// Slug of the record that already owns the id.
        owner: String,
    },
}
