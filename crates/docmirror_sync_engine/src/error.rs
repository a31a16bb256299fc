//! Error types for the sync engine.

use crate::engine::SyncReport;
use docmirror_core::CoreError;
use docmirror_protocol::ProtocolError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response excerpt.
        message: String,
    },

    /// Protocol error (request or response could not be encoded/decoded).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Reading a local document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry error.
    #[error("registry error: {0}")]
    Core(#[from] CoreError),

    /// The snapshot could not be written after the pass completed.
    #[error("failed to persist snapshot: {source}")]
    Persist {
        /// Underlying registry error.
        source: CoreError,
        /// Outcome of the pass whose results were not saved.
        report: Box<SyncReport>,
    },
}
