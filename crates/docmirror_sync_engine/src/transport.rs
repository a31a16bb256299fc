//! Transport layer abstraction for the remote document store.

use crate::error::{SyncError, SyncResult};
use docmirror_protocol::{DocumentPayload, RemoteDocument};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A remote store that documents are created in and updated.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-memory for testing, etc.). Implementations
/// never keep references to registry records; they only see payloads.
pub trait RemoteStore: Send + Sync {
    /// Creates a new document in `namespace`.
    fn create(&self, namespace: &str, payload: &DocumentPayload) -> SyncResult<RemoteDocument>;

    /// Replaces the document `id` in `namespace`.
    fn update(&self, namespace: &str, id: u64, payload: &DocumentPayload)
        -> SyncResult<RemoteDocument>;
}

/// A call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// A create call for the given slug.
    Create {
        /// Namespace addressed.
        namespace: String,
        /// Slug in the payload.
        slug: String,
    },
    /// An update call.
    Update {
        /// Namespace addressed.
        namespace: String,
        /// Remote id addressed.
        id: u64,
        /// Slug in the payload.
        slug: String,
    },
}

/// An in-memory remote store for testing.
///
/// Assigns increasing ids, remembers the last payload per id, and can be
/// told to fail calls for particular slugs.
#[derive(Debug)]
pub struct MockTransport {
    next_id: AtomicU64,
    documents: Mutex<HashMap<u64, DocumentPayload>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            documents: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every call carrying `slug` fail with a transport error.
    pub fn fail_slug(&self, slug: impl Into<String>) {
        self.failing.lock().unwrap().insert(slug.into());
    }

    /// Removes all injected failures.
    pub fn clear_failures(&self) {
        self.failing.lock().unwrap().clear();
    }

    /// Returns the calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the last payload stored under `id`.
    pub fn document(&self, id: u64) -> Option<DocumentPayload> {
        self.documents.lock().unwrap().get(&id).cloned()
    }

    /// Number of documents held remotely.
    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn check(&self, payload: &DocumentPayload) -> SyncResult<()> {
        if self.failing.lock().unwrap().contains(&payload.slug) {
            return Err(SyncError::Transport(format!(
                "simulated failure for {}",
                payload.slug
            )));
        }
        Ok(())
    }

    fn store(&self, id: u64, payload: &DocumentPayload) -> RemoteDocument {
        self.documents.lock().unwrap().insert(id, payload.clone());
        RemoteDocument {
            id,
            raw: serde_json::json!({
                "id": id,
                "slug": payload.slug,
                "title": payload.title,
                "format": "markdown",
                "public": payload.public,
            }),
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for MockTransport {
    fn create(&self, namespace: &str, payload: &DocumentPayload) -> SyncResult<RemoteDocument> {
        self.calls.lock().unwrap().push(MockCall::Create {
            namespace: namespace.to_string(),
            slug: payload.slug.clone(),
        });
        self.check(payload)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(self.store(id, payload))
    }

    fn update(
        &self,
        namespace: &str,
        id: u64,
        payload: &DocumentPayload,
    ) -> SyncResult<RemoteDocument> {
        self.calls.lock().unwrap().push(MockCall::Update {
            namespace: namespace.to_string(),
            id,
            slug: payload.slug.clone(),
        });
        self.check(payload)?;

        if !self.documents.lock().unwrap().contains_key(&id) {
            return Err(SyncError::ServerError {
                status: 404,
                message: format!("document {id} not found"),
            });
        }
        Ok(self.store(id, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(slug: &str) -> DocumentPayload {
        DocumentPayload::markdown("Title", slug, "body\n")
    }

    #[test]
    fn mock_assigns_ids() {
        let transport = MockTransport::new();
        let a = transport.create("ns", &payload("a")).unwrap();
        let b = transport.create("ns", &payload("b")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(transport.document_count(), 2);
        assert_eq!(a.raw["slug"], "a");
    }

    #[test]
    fn mock_update_requires_existing_document() {
        let transport = MockTransport::new();
        let result = transport.update("ns", 99, &payload("a"));
        assert!(matches!(result, Err(SyncError::ServerError { status: 404, .. })));

        let created = transport.create("ns", &payload("a")).unwrap();
        let updated = transport.update("ns", created.id, &payload("a")).unwrap();
        assert_eq!(updated.id, created.id);
    }

    #[test]
    fn mock_injected_failures() {
        let transport = MockTransport::new();
        transport.fail_slug("bad");

        assert!(matches!(
            transport.create("ns", &payload("bad")),
            Err(SyncError::Transport(_))
        ));
        assert!(transport.create("ns", &payload("good")).is_ok());

        transport.clear_failures();
        assert!(transport.create("ns", &payload("bad")).is_ok());
        assert_eq!(transport.calls().len(), 3);
    }
}
