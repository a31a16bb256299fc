//! Request and response bodies exchanged with the remote document store.

use crate::error::{ProtocolError, ProtocolResult};
use serde::{Deserialize, Serialize};

/// Body format understood by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// Markdown source.
    Markdown,
}

/// Payload for a create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// Document title.
    pub title: String,
    /// Identity token of the local file.
    pub slug: String,
    /// Visibility flag. Always `0` (private).
    pub public: u8,
    /// Body format.
    pub format: DocFormat,
    /// Raw document text.
    pub body: String,
}

impl DocumentPayload {
    /// Creates a private Markdown payload.
    pub fn markdown(
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            public: 0,
            format: DocFormat::Markdown,
            body: body.into(),
        }
    }

    /// Encodes to JSON.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// The `{"data": ...}` wrapper around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Wrapped value.
    pub data: T,
}

/// A document as returned by the remote store.
///
/// Only the id is interpreted. The full server representation is kept in
/// `raw` so callers can store it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDocument {
    /// Remote numeric id.
    pub id: u64,
    /// Verbatim server representation.
    pub raw: serde_json::Value,
}

impl RemoteDocument {
    /// Builds a remote document from the server's JSON object.
    pub fn from_value(raw: serde_json::Value) -> ProtocolResult<Self> {
        let id = raw
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .filter(|&id| id != 0)
            .ok_or(ProtocolError::MissingId)?;
        Ok(Self { id, raw })
    }

    /// Decodes a `{"data": {...}}` response body.
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(bytes)?;
        Self::from_value(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_wire_shape() {
        let payload = DocumentPayload::markdown("Hello", "abc", "# Hello\n");
        let value: serde_json::Value = serde_json::from_slice(&payload.encode().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "title": "Hello",
                "slug": "abc",
                "public": 0,
                "format": "markdown",
                "body": "# Hello\n",
            })
        );
    }

    #[test]
    fn decode_keeps_raw_representation() {
        let body = json!({
            "data": {
                "id": 42,
                "slug": "abc",
                "title": "Hello",
                "book_id": 7,
                "body_html": "<h1>Hello</h1>",
                "created_at": "2024-01-01T00:00:00.000Z"
            }
        });
        let doc = RemoteDocument::decode(body.to_string().as_bytes()).unwrap();

        assert_eq!(doc.id, 42);
        assert_eq!(doc.raw["slug"], "abc");
        assert_eq!(doc.raw["book_id"], 7);
    }

    #[test]
    fn decode_rejects_missing_id() {
        let body = json!({"data": {"slug": "abc"}}).to_string();
        assert!(matches!(
            RemoteDocument::decode(body.as_bytes()),
            Err(ProtocolError::MissingId)
        ));

        let body = json!({"data": {"id": 0}}).to_string();
        assert!(matches!(
            RemoteDocument::decode(body.as_bytes()),
            Err(ProtocolError::MissingId)
        ));
    }

    #[test]
    fn decode_rejects_error_bodies() {
        let body = json!({"status": 401, "message": "Unauthorized"}).to_string();
        assert!(matches!(
            RemoteDocument::decode(body.as_bytes()),
            Err(ProtocolError::Json(_))
        ));
    }
}
