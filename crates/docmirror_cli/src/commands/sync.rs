//! Sync command implementation.

use super::{EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL, EXIT_PERSIST};
use crate::client::ReqwestClient;
use docmirror_sync_engine::{HttpTransport, SyncConfig, SyncEngine, SyncError, SyncReport};
use tracing::{error, info, warn};

/// Runs the sync command and returns the process exit code.
pub fn run(config: &SyncConfig) -> u8 {
    info!("Mirroring {:?} into {}", config.base_dir, config.namespace);
    if config.token.is_empty() {
        warn!("TOKEN is not set; requests will be sent without a credential");
    }

    let client = match ReqwestClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build HTTP client");
            return EXIT_CONFIG;
        }
    };
    let transport = HttpTransport::new(config.base_url.clone(), client);
    let engine = SyncEngine::new(config.clone(), transport);

    let mut registry = engine.load_registry();
    match engine.run(&mut registry) {
        Ok(report) => {
            print_report(&report);
            exit_code(&report)
        }
        Err(SyncError::Persist { source, report }) => {
            print_report(&report);
            error!(
                error = %source,
                "snapshot was not saved; remote changes from this run are not recorded"
            );
            EXIT_PERSIST
        }
        Err(e) => {
            error!(error = %e, "sync failed");
            EXIT_PERSIST
        }
    }
}

fn exit_code(report: &SyncReport) -> u8 {
    if report.is_clean() {
        EXIT_OK
    } else {
        EXIT_PARTIAL
    }
}

fn print_report(report: &SyncReport) {
    println!("docmirror sync");
    println!("==============");
    println!();
    println!("Scanned:  {} files", report.build.scanned);
    println!("New:      {}", report.build.inserted);
    println!("Created:  {}", report.created);
    println!("Updated:  {}", report.updated);
    println!("Dropped:  {}", report.dropped);
    println!("Failed:   {}", report.failed());
    println!("Elapsed:  {:.2}s", report.duration.as_secs_f64());

    if !report.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }
}
