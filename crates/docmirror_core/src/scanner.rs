//! Directory walker that yields the files eligible for mirroring.

use crate::ignore::IgnoreRules;
use crate::slug::normalize_path;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How a file name is checked against the configured suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixMatch {
    /// The name must end with every suffix.
    #[default]
    All,
    /// The name must end with at least one suffix.
    Any,
}

impl SuffixMatch {
    /// Checks a file name against the suffix list.
    pub fn matches(&self, name: &str, suffixes: &[String]) -> bool {
        match self {
            SuffixMatch::All => suffixes.iter().all(|s| name.ends_with(s.as_str())),
            SuffixMatch::Any => suffixes.iter().any(|s| name.ends_with(s.as_str())),
        }
    }
}

/// A file found by the scanner.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// File name.
    pub name: String,
    /// Containing directory relative to the scan root (`.` for the root).
    pub dir: String,
    /// Normalized path relative to the scan root.
    pub path: String,
}

/// Walks a directory tree applying exclusion rules and a suffix filter.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    rules: IgnoreRules,
    suffixes: Vec<String>,
    suffix_match: SuffixMatch,
}

impl Scanner {
    /// Creates a scanner over `root`.
    pub fn new(root: impl Into<PathBuf>, rules: IgnoreRules, suffixes: Vec<String>) -> Self {
        Self {
            root: root.into(),
            rules,
            suffixes,
            suffix_match: SuffixMatch::default(),
        }
    }

    /// Sets the suffix matching policy.
    pub fn with_suffix_match(mut self, suffix_match: SuffixMatch) -> Self {
        self.suffix_match = suffix_match;
        self
    }

    /// Walks the tree depth-first and lazily yields eligible files.
    ///
    /// Excluded directories are pruned without being descended into. A
    /// missing root produces an empty sequence.
    pub fn scan(&self) -> impl Iterator<Item = ScannedFile> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !self.is_excluded(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.to_scanned(&entry),
                Err(e) => {
                    tracing::debug!(
                        root = %self.root.display(),
                        error = %e,
                        "skipping unreadable entry"
                    );
                    None
                }
            })
    }

    fn relative(&self, path: &Path) -> String {
        normalize_path(path.strip_prefix(&self.root).unwrap_or(path))
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.rules.is_ignored(&self.relative(entry.path()), &name)
    }

    fn to_scanned(&self, entry: &DirEntry) -> Option<ScannedFile> {
        if !entry.file_type().is_file() {
            return None;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !self.suffix_match.matches(&name, &self.suffixes) {
            return None;
        }
        let path = self.relative(entry.path());
        let dir = entry
            .path()
            .parent()
            .map(|parent| self.relative(parent))
            .unwrap_or_else(|| ".".to_string());

        Some(ScannedFile { name, dir, path })
    }
}
