//! The document record tracked for each local file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version tag written on every record.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// One tracked local file and what is known about its remote counterpart.
///
/// JSON keys stay compatible with existing `book.json` snapshots, which is
/// why some fields are renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Remote document id. `0` means not yet created remotely.
    #[serde(rename = "id", default)]
    pub remote_id: u64,
    /// Title derived from the first line of the file.
    #[serde(default)]
    pub title: String,
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Containing directory, relative to the base directory.
    #[serde(default)]
    pub dir: String,
    /// Identity token derived from `path`.
    pub slug: String,
    /// Normalized relative path of the file.
    #[serde(default)]
    pub path: String,
    /// Free-form version tag.
    #[serde(rename = "last_version", default)]
    pub version: String,
    /// Last local build or remote save.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Verbatim last-known server representation.
    #[serde(rename = "raw", default)]
    pub remote_snapshot: Option<serde_json::Value>,
}

impl Document {
    /// Creates a record that has never been uploaded.
    pub fn new(slug: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            remote_id: 0,
            title: String::new(),
            name: String::new(),
            dir: String::new(),
            slug: slug.into(),
            path: path.into(),
            version: DOCUMENT_VERSION.to_string(),
            updated_at: None,
            remote_snapshot: None,
        }
    }

    /// Returns true once the remote store has assigned an id.
    pub fn is_remote(&self) -> bool {
        self.remote_id != 0
    }

    /// Resolves the backing file against the base directory.
    ///
    /// Falls back to `dir/name` for records that predate the `path` field.
    pub fn file_path(&self, base_dir: &Path) -> PathBuf {
        if self.path.is_empty() {
            base_dir.join(&self.dir).join(&self.name)
        } else {
            base_dir.join(&self.path)
        }
    }
}
