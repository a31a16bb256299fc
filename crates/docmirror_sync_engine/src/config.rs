//! Configuration for the sync engine.

use docmirror_core::{IgnoreRules, SuffixMatch};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default API root of the remote store.
pub const DEFAULT_BASE_URL: &str = "https://www.yuque.com/api/v2";
/// Default namespace documents are created in.
pub const DEFAULT_NAMESPACE: &str = "tests/sync";
/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "book.json";
/// Default ignore file name.
pub const DEFAULT_IGNORE_FILE: &str = ".ignoresync";

/// Configuration for a sync run.
///
/// Built once at startup and passed by reference; nothing here is global.
#[derive(Clone)]
pub struct SyncConfig {
    /// API root of the remote store.
    pub base_url: String,
    /// Directory that is mirrored and holds the snapshot.
    pub base_dir: PathBuf,
    /// Ignore file name, relative to `base_dir`.
    pub ignore_file: String,
    /// Static credential sent with every request.
    pub token: String,
    /// Remote namespace (`owner/repo`).
    pub namespace: String,
    /// Snapshot file name, relative to `base_dir`.
    pub snapshot_file: String,
    /// File name suffixes eligible for mirroring.
    pub suffixes: Vec<String>,
    /// How `suffixes` are combined.
    pub suffix_match: SuffixMatch,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl SyncConfig {
    /// Creates a configuration for mirroring `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_dir: base_dir.into(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            token: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
            suffixes: vec![".md".to_string()],
            suffix_match: SuffixMatch::All,
            timeout: Duration::from_secs(5),
            user_agent: format!("docmirror/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the ignore file name.
    pub fn with_ignore_file(mut self, ignore_file: impl Into<String>) -> Self {
        self.ignore_file = ignore_file.into();
        self
    }

    /// Sets the credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the remote namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the snapshot file name.
    pub fn with_snapshot_file(mut self, snapshot_file: impl Into<String>) -> Self {
        self.snapshot_file = snapshot_file.into();
        self
    }

    /// Sets the eligible suffixes and how they are combined.
    pub fn with_suffixes(mut self, suffixes: Vec<String>, suffix_match: SuffixMatch) -> Self {
        self.suffixes = suffixes;
        self.suffix_match = suffix_match;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.base_dir.join(&self.snapshot_file)
    }

    /// Path of the ignore file.
    pub fn ignore_path(&self) -> PathBuf {
        self.base_dir.join(&self.ignore_file)
    }

    /// Loads the ignore rules, always excluding the snapshot and ignore files.
    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules::load(&self.ignore_path())
            .with_rule(&self.snapshot_file)
            .with_rule(&self.ignore_file)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("base_url", &self.base_url)
            .field("base_dir", &self.base_dir)
            .field("ignore_file", &self.ignore_file)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("namespace", &self.namespace)
            .field("snapshot_file", &self.snapshot_file)
            .field("suffixes", &self.suffixes)
            .field("suffix_match", &self.suffix_match)
            .field("timeout", &self.timeout)
            .finish()
    }
}
