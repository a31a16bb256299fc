//! The document registry: records plus slug and remote-id indices.
//!
//! The registry is the only persisted state. It is loaded from a JSON
//! snapshot at start, mutated by the build and sync phases, and written back
//! once at the end of a run.

use crate::document::Document;
use crate::error::{CoreError, CoreResult};
use crate::scanner::ScannedFile;
use crate::slug::slug_for;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A record whose backing file was found on disk by [`Registry::reconcile_live`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDocument {
    /// Slug of the record.
    pub slug: String,
    /// Location of the backing file.
    pub file: PathBuf,
}

/// Ordered document records with O(1) lookup by slug and by remote id.
///
/// # Invariants
///
/// - Slugs are unique.
/// - A non-zero remote id belongs to at most one record.
/// - Both indices always point at the record they name.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
    documents: Vec<Document>,
    by_slug: HashMap<String, usize>,
    by_id: HashMap<u64, usize>,
}

impl Registry {
    /// Creates an empty registry that saves to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            documents: Vec::new(),
            by_slug: HashMap::new(),
            by_id: HashMap::new(),
        }
    }

    /// Loads a registry from a snapshot file.
    ///
    /// Never fails: an absent, unreadable or corrupt snapshot gives an empty
    /// registry so that bad state never blocks startup. A remote id claimed by
    /// more than one record stays with the first; later claimants are reset
    /// to local-only so the next sync creates them fresh.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut registry = Self::empty(path);

        let data = match fs::read(&registry.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return registry,
            Err(e) => {
                tracing::warn!(
                    path = %registry.path.display(),
                    error = %e,
                    "snapshot unreadable, starting empty"
                );
                return registry;
            }
        };

        let documents: Vec<Document> = match serde_json::from_slice(&data) {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(
                    path = %registry.path.display(),
                    error = %e,
                    "snapshot corrupt, starting empty"
                );
                return registry;
            }
        };

        for mut document in documents {
            if registry.by_slug.contains_key(&document.slug) {
                tracing::warn!(slug = %document.slug, "duplicate slug in snapshot, keeping first");
                continue;
            }
            if document.is_remote() && registry.by_id.contains_key(&document.remote_id) {
                tracing::warn!(
                    slug = %document.slug,
                    id = document.remote_id,
                    "remote id already claimed in snapshot, document will be created again"
                );
                document.remote_id = 0;
                document.remote_snapshot = None;
            }
            registry.append(document);
        }

        tracing::debug!(
            path = %registry.path.display(),
            documents = registry.len(),
            "snapshot loaded"
        );
        registry
    }

    /// Returns the snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterates records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Looks up a record by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Document> {
        self.by_slug.get(slug).map(|&idx| &self.documents[idx])
    }

    /// Looks up a record by remote id. Id `0` is never found.
    pub fn find_by_id(&self, id: u64) -> Option<&Document> {
        self.by_id.get(&id).map(|&idx| &self.documents[idx])
    }

    /// Appends a record.
    ///
    /// The caller must ensure no record with the same slug or the same
    /// non-zero remote id exists; use [`Registry::upsert_scanned`] for
    /// find-or-create.
    pub fn append(&mut self, document: Document) {
        debug_assert!(
            !self.by_slug.contains_key(&document.slug),
            "duplicate slug {}",
            document.slug
        );
        debug_assert!(
            !document.is_remote() || !self.by_id.contains_key(&document.remote_id),
            "duplicate remote id {}",
            document.remote_id
        );
        let idx = self.documents.len();
        self.by_slug.insert(document.slug.clone(), idx);
        if document.is_remote() {
            self.by_id.insert(document.remote_id, idx);
        }
        self.documents.push(document);
    }

    /// Finds or creates the record for a scanned file and refreshes its
    /// location metadata.
    ///
    /// Returns true if a new record was inserted.
    pub fn upsert_scanned(&mut self, file: &ScannedFile, now: DateTime<Utc>) -> bool {
        let slug = slug_for(&file.path);
        let (idx, inserted) = match self.by_slug.get(&slug) {
            Some(&idx) => (idx, false),
            None => {
                self.append(Document::new(slug, file.path.clone()));
                (self.documents.len() - 1, true)
            }
        };

        let document = &mut self.documents[idx];
        document.name.clone_from(&file.name);
        document.dir.clone_from(&file.dir);
        document.path.clone_from(&file.path);
        document.updated_at = Some(now);
        inserted
    }

    /// Copies a successful remote save into the record for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSlug`] if no record exists and
    /// [`CoreError::DuplicateRemoteId`] if `remote_id` belongs to another
    /// record. The record is left untouched on error.
    pub fn record_remote_save(
        &mut self,
        slug: &str,
        remote_id: u64,
        title: String,
        snapshot: serde_json::Value,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        let idx = *self
            .by_slug
            .get(slug)
            .ok_or_else(|| CoreError::UnknownSlug(slug.to_string()))?;

        if let Some(&owner) = self.by_id.get(&remote_id) {
            if owner != idx {
                return Err(CoreError::DuplicateRemoteId {
                    id: remote_id,
                    owner: self.documents[owner].slug.clone(),
                });
            }
        }

        let previous = self.documents[idx].remote_id;
        if previous != remote_id {
            if self.by_id.get(&previous) == Some(&idx) {
                self.by_id.remove(&previous);
            }
            if remote_id != 0 {
                self.by_id.insert(remote_id, idx);
            }
        }

        let document = &mut self.documents[idx];
        document.remote_id = remote_id;
        document.title = title;
        document.remote_snapshot = Some(snapshot);
        document.updated_at = Some(now);
        Ok(())
    }

    /// Drops every record whose backing file no longer exists.
    ///
    /// `exists` is asked about each record's file, resolved against
    /// `base_dir`. Survivors are returned in registry order, and after this
    /// call the registry holds exactly those records.
    pub fn reconcile_live<F>(&mut self, base_dir: &Path, mut exists: F) -> Vec<LiveDocument>
    where
        F: FnMut(&Path) -> bool,
    {
        let before = self.documents.len();
        self.documents.retain(|document| {
            let file = document.file_path(base_dir);
            let keep = exists(&file);
            if !keep {
                tracing::info!(
                    slug = %document.slug,
                    path = %document.path,
                    "file gone, dropping record"
                );
            }
            keep
        });
        if self.documents.len() != before {
            self.rebuild_indices();
        }

        self.documents
            .iter()
            .map(|document| LiveDocument {
                slug: document.slug.clone(),
                file: document.file_path(base_dir),
            })
            .collect()
    }

    /// Writes the snapshot to the registry's own path.
    pub fn save(&self) -> CoreResult<()> {
        self.save_to(&self.path)
    }

    /// Writes the snapshot atomically to `path`.
    ///
    /// The JSON is written to a sibling temporary file, synced, and renamed
    /// over the target. The temporary file never outlives a failed save.
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        let data = serde_json::to_vec_pretty(&self.documents)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

        let result = write_synced(&temp_path, &data).and_then(|()| fs::rename(&temp_path, path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), documents = self.len(), "snapshot saved");
        Ok(())
    }

    fn rebuild_indices(&mut self) {
        self.by_slug.clear();
        self.by_id.clear();
        for (idx, document) in self.documents.iter().enumerate() {
            self.by_slug.insert(document.slug.clone(), idx);
            if document.is_remote() {
                self.by_id.insert(document.remote_id, idx);
            }
        }
    }
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.write_all(b"\n")?;
    file.sync_all()
}
