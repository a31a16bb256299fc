//! # docmirror Protocol
//!
//! Wire types for the remote document store.
//!
//! This crate provides:
//! - [`DocumentPayload`] for create and update requests
//! - [`RemoteDocument`] for the `{"data": ...}` responses
//! - JSON encoding/decoding
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod messages;

pub use error::{ProtocolError, ProtocolResult};
pub use messages::{DocFormat, DocumentPayload, Envelope, RemoteDocument};
