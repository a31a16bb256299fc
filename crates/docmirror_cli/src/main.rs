//! docmirror CLI
//!
//! Mirrors a local Markdown tree into a remote document store.
//!
//! # Commands
//!
//! - `sync` - Build the registry and upload every document (default)
//! - `rebuild` - Rewrite the registry snapshot without remote calls
//! - `version` - Print version information
//! - `help` - Print usage
//!
//! # Environment
//!
//! - `BASE_API_URL` - API root of the remote store
//! - `BASE_DIR` - Directory to mirror (defaults to the current directory)
//! - `IGNORE_FILE` - Ignore file name inside `BASE_DIR` (defaults to `.ignoresync`)
//! - `TOKEN` - Credential sent with every request
//! - `BASE_NAMESPACE` - Remote namespace documents are written to

mod client;
mod commands;
mod settings;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Mirror local Markdown documents into a remote document store.
#[derive(Parser)]
#[command(name = "docmirror")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
enum Commands {
    /// Build the registry and upload every document
    Sync,

    /// Rewrite the registry snapshot without contacting the remote store
    Rebuild,

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Sync);
    if command == Commands::Version {
        println!("docmirror v{}", env!("CARGO_PKG_VERSION"));
        println!("snapshot schema v{}", docmirror_core::DOCUMENT_VERSION);
        return ExitCode::from(commands::EXIT_OK);
    }

    let config = match settings::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "cannot determine base directory");
            return ExitCode::from(commands::EXIT_CONFIG);
        }
    };

    let code = match command {
        Commands::Sync => commands::sync::run(&config),
        Commands::Rebuild => commands::rebuild::run(&config),
        Commands::Version => commands::EXIT_OK,
    };
    ExitCode::from(code)
}
