//! Build and sync passes over the document registry.

use crate::config::SyncConfig;
use crate::content::read_document;
use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteStore;
use chrono::Utc;
use docmirror_core::{CoreError, LiveDocument, Registry, Scanner};
use docmirror_protocol::DocumentPayload;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of a build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files yielded by the scanner.
    pub scanned: usize,
    /// Records created for previously unseen slugs.
    pub inserted: usize,
    /// Records dropped because their file was gone (rebuild only).
    pub dropped: usize,
}

/// A document that could not be synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Slug of the record.
    pub slug: String,
    /// Backing file.
    pub path: PathBuf,
    /// Error description.
    pub error: String,
}

/// Outcome of a sync pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Build pass that preceded the sync, if run together.
    pub build: BuildReport,
    /// Documents created remotely.
    pub created: usize,
    /// Documents updated remotely.
    pub updated: usize,
    /// Records dropped because their file was gone.
    pub dropped: usize,
    /// Documents that failed and kept their previous state.
    pub failures: Vec<DocumentFailure>,
    /// Wall time of the pass.
    pub duration: Duration,
}

impl SyncReport {
    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if every live document synced.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Created,
    Updated,
}

/// Ensures every eligible file on disk has a record.
///
/// New slugs get a fresh record; existing records have their location
/// metadata and timestamp refreshed. Running this twice over an unchanged
/// tree inserts nothing the second time.
pub fn build_registry(config: &SyncConfig, registry: &mut Registry) -> BuildReport {
    let scanner = Scanner::new(&config.base_dir, config.ignore_rules(), config.suffixes.clone())
        .with_suffix_match(config.suffix_match);

    let now = Utc::now();
    let mut report = BuildReport::default();
    for file in scanner.scan() {
        report.scanned += 1;
        if registry.upsert_scanned(&file, now) {
            report.inserted += 1;
            tracing::debug!(path = %file.path, "new document");
        }
    }

    tracing::info!(
        scanned = report.scanned,
        inserted = report.inserted,
        "build complete"
    );
    report
}

/// Rebuilds the snapshot from disk without contacting the remote store.
///
/// Records whose file is gone are dropped before saving.
pub fn rebuild_registry(config: &SyncConfig, registry: &mut Registry) -> SyncResult<BuildReport> {
    let mut report = build_registry(config, registry);
    let before = registry.len();
    registry.reconcile_live(&config.base_dir, |path| path.is_file());
    report.dropped = before - registry.len();

    registry.save()?;
    tracing::info!(documents = registry.len(), dropped = report.dropped, "snapshot rebuilt");
    Ok(report)
}

/// Mirrors the local tree into a remote store.
///
/// The engine is strictly sequential: one scan, then one remote call per
/// document, then one snapshot write.
pub struct SyncEngine<T: RemoteStore> {
    config: SyncConfig,
    transport: T,
}

impl<T: RemoteStore> SyncEngine<T> {
    /// Creates a new sync engine.
    pub fn new(config: SyncConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Loads the registry from the configured snapshot path.
    pub fn load_registry(&self) -> Registry {
        Registry::load(self.config.snapshot_path())
    }

    /// Ensures every eligible file on disk has a record. See [`build_registry`].
    pub fn build(&self, registry: &mut Registry) -> BuildReport {
        build_registry(&self.config, registry)
    }

    /// Uploads every live record and copies the results back.
    ///
    /// Records whose file is gone are dropped first. A failing document is
    /// logged and skipped with its record unchanged; it never stops the
    /// pass.
    pub fn sync(&self, registry: &mut Registry) -> SyncReport {
        let start = Instant::now();
        let mut report = SyncReport::default();

        let before = registry.len();
        let live = registry.reconcile_live(&self.config.base_dir, |path| path.is_file());
        report.dropped = before - registry.len();

        for document in &live {
            match self.sync_document(registry, document) {
                Ok(Outcome::Created) => report.created += 1,
                Ok(Outcome::Updated) => report.updated += 1,
                Err(e) => {
                    tracing::warn!(
                        path = %document.file.display(),
                        error = %e,
                        "document sync failed"
                    );
                    report.failures.push(DocumentFailure {
                        slug: document.slug.clone(),
                        path: document.file.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.duration = start.elapsed();
        tracing::info!(
            created = report.created,
            updated = report.updated,
            failed = report.failed(),
            dropped = report.dropped,
            elapsed_ms = report.duration.as_millis() as u64,
            "sync complete"
        );
        report
    }

    /// Runs build, then sync, then saves the snapshot once.
    ///
    /// # Errors
    ///
    /// Only a failed snapshot write is an error. Remote changes made during
    /// the pass are not rolled back; the report travels with the error.
    pub fn run(&self, registry: &mut Registry) -> SyncResult<SyncReport> {
        let start = Instant::now();
        let build = self.build(registry);
        let mut report = self.sync(registry);
        report.build = build;
        report.duration = start.elapsed();

        if let Err(source) = registry.save() {
            tracing::error!(
                path = %registry.path().display(),
                error = %source,
                "snapshot write failed"
            );
            return Err(SyncError::Persist {
                source,
                report: Box::new(report),
            });
        }
        Ok(report)
    }

    /// Rebuilds the snapshot from disk. See [`rebuild_registry`].
    pub fn rebuild(&self, registry: &mut Registry) -> SyncResult<BuildReport> {
        rebuild_registry(&self.config, registry)
    }

    fn sync_document(&self, registry: &mut Registry, live: &LiveDocument) -> SyncResult<Outcome> {
        let content = read_document(&live.file)?;
        let remote_id = registry
            .find_by_slug(&live.slug)
            .map(|document| document.remote_id)
            .ok_or_else(|| CoreError::UnknownSlug(live.slug.clone()))?;

        let payload =
            DocumentPayload::markdown(content.title.clone(), live.slug.clone(), content.body);
        let namespace = &self.config.namespace;
        let (remote, outcome) = if remote_id == 0 {
            (self.transport.create(namespace, &payload)?, Outcome::Created)
        } else {
            (
                self.transport.update(namespace, remote_id, &payload)?,
                Outcome::Updated,
            )
        };

        registry.record_remote_save(&live.slug, remote.id, content.title, remote.raw, Utc::now())?;
        tracing::debug!(slug = %live.slug, id = remote.id, ?outcome, "document synced");
        Ok(outcome)
    }
}
