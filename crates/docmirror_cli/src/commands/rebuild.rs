//! Rebuild command implementation.

use super::{EXIT_OK, EXIT_PERSIST};
use docmirror_core::Registry;
use docmirror_sync_engine::{rebuild_registry, SyncConfig};
use tracing::{error, info};

/// Rewrites the snapshot from the files on disk without any remote calls.
pub fn run(config: &SyncConfig) -> u8 {
    info!("Rebuilding {:?}", config.snapshot_path());

    let mut registry = Registry::load(config.snapshot_path());
    match rebuild_registry(config, &mut registry) {
        Ok(report) => {
            println!(
                "Rebuilt {}: {} documents ({} new, {} dropped)",
                config.snapshot_path().display(),
                registry.len(),
                report.inserted,
                report.dropped
            );
            EXIT_OK
        }
        Err(e) => {
            error!(error = %e, "failed to write snapshot");
            EXIT_PERSIST
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rebuild_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();

        let code = run(&SyncConfig::new(dir.path()));
        assert_eq!(code, EXIT_OK);

        let saved: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("book.json")).unwrap()).unwrap();
        assert_eq!(saved.as_array().unwrap().len(), 1);
        assert_eq!(saved[0]["id"], 0);
    }

    #[test]
    fn rebuild_reports_unwritable_snapshot() {
        let dir = TempDir::new().unwrap();
        let config = SyncConfig::new(dir.path()).with_snapshot_file("missing/book.json");
        assert_eq!(run(&config), EXIT_PERSIST);
    }
}
