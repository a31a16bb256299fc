//! HTTP transport implementation.
//!
//! This module provides an HTTP-based [`RemoteStore`]. The actual HTTP
//! client is abstracted via a trait so the engine does not depend on a
//! particular library; the CLI plugs in a blocking reqwest client.

use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteStore;
use docmirror_protocol::{DocumentPayload, RemoteDocument};

/// Longest response excerpt carried in a [`SyncError::ServerError`].
const EXCERPT_LEN: usize = 200;

/// HTTP methods used by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Create.
    Post,
    /// Replace.
    Put,
}

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implementations send a JSON body and return the raw response. They are
/// responsible for credentials, headers, and the per-request timeout.
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response. `Err` means the request
    /// never produced a response (connection failure, timeout).
    fn send(&self, method: HttpMethod, url: &str, body: Vec<u8>) -> Result<HttpResponse, String>;
}

/// HTTP-based remote store.
///
/// Uses JSON request/response bodies:
/// - `POST {base}/repos/{namespace}/docs` creates
/// - `PUT {base}/repos/{namespace}/docs/{id}` updates
pub struct HttpTransport<C: HttpClient> {
    /// API root (e.g., "https://www.yuque.com/api/v2").
    base_url: String,
    /// HTTP client implementation.
    client: C,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send_json(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: &DocumentPayload,
    ) -> SyncResult<RemoteDocument> {
        let body = payload.encode()?;

        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(?method, %url, slug = %payload.slug, "sending document");
        let response = self
            .client
            .send(method, &url, body)
            .map_err(SyncError::Transport)?;

        if !response.is_success() {
            return Err(SyncError::ServerError {
                status: response.status,
                message: excerpt(&response.body),
            });
        }

        Ok(RemoteDocument::decode(&response.body)?)
    }
}

impl<C: HttpClient> RemoteStore for HttpTransport<C> {
    fn create(&self, namespace: &str, payload: &DocumentPayload) -> SyncResult<RemoteDocument> {
        self.send_json(HttpMethod::Post, &format!("/repos/{namespace}/docs"), payload)
    }

    fn update(
        &self,
        namespace: &str,
        id: u64,
        payload: &DocumentPayload,
    ) -> SyncResult<RemoteDocument> {
        self.send_json(
            HttpMethod::Put,
            &format!("/repos/{namespace}/docs/{id}"),
            payload,
        )
    }
}

fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
