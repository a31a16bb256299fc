//! # docmirror Core
//!
//! Local state for mirroring a Markdown tree into a remote document store.
//!
//! This crate provides:
//! - Path-derived document identities ([`slug_for`])
//! - Ignore rules and a lazy directory [`Scanner`]
//! - The [`Document`] record and the persisted [`Registry`]
//!
//! ## Key Invariants
//!
//! - A document's identity depends only on its normalized relative path
//! - Slugs are unique within a registry
//! - Remote ids are unique once assigned
//! - After reconciliation every record points at a file that exists
//!
//! This crate performs filesystem I/O but no network calls.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod ignore;
mod registry;
mod scanner;
mod slug;

pub use document::{Document, DOCUMENT_VERSION};
pub use error::{CoreError, CoreResult};
pub use ignore::IgnoreRules;
pub use registry::{LiveDocument, Registry};
pub use scanner::{ScannedFile, Scanner, SuffixMatch};
pub use slug::{normalize_path, slug_for, SLUG_LEN};
