//! # docmirror Sync Engine
//!
//! Mirrors a local Markdown tree into a remote document store.
//!
//! This crate provides:
//! - Sync configuration
//! - Build phase (scan the tree, find-or-create registry records)
//! - Sync phase (upload each live record, copy the result back)
//! - Remote store abstraction with an HTTP implementation
//! - An in-memory mock store for tests
//!
//! ## Architecture
//!
//! A run is a **build-then-sync** pass:
//! 1. Scan the tree and make sure every eligible file has a record
//! 2. Drop records whose file is gone
//! 3. Create or update each remaining document remotely
//! 4. Write the registry snapshot once
//!
//! ## Key Invariants
//!
//! - A document's failure never aborts the pass
//! - A failed document keeps its previous record
//! - The snapshot is written exactly once per run
//! - No retries: a failed call waits for the next run

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content;
mod engine;
mod error;
mod http;
mod transport;

pub use config::{
    SyncConfig, DEFAULT_BASE_URL, DEFAULT_IGNORE_FILE, DEFAULT_NAMESPACE, DEFAULT_SNAPSHOT_FILE,
};
pub use content::{read_document, title_from_line, DocumentContent};
pub use engine::{
    build_registry, rebuild_registry, BuildReport, DocumentFailure, SyncEngine, SyncReport,
};
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpMethod, HttpResponse, HttpTransport};
pub use transport::{MockCall, MockTransport, RemoteStore};
