//! Run configuration read from the environment.

use docmirror_sync_engine::SyncConfig;
use std::io;
use std::path::PathBuf;

/// API root of the remote store.
pub const ENV_BASE_API_URL: &str = "BASE_API_URL";
/// Directory to mirror. Defaults to the current directory.
pub const ENV_BASE_DIR: &str = "BASE_DIR";
/// Ignore file name inside the base directory.
pub const ENV_IGNORE_FILE: &str = "IGNORE_FILE";
/// Static credential.
pub const ENV_TOKEN: &str = "TOKEN";
/// Remote namespace.
pub const ENV_BASE_NAMESPACE: &str = "BASE_NAMESPACE";

/// Builds the configuration from process environment variables.
pub fn from_env() -> io::Result<SyncConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Builds the configuration from any key lookup. Empty values count as unset.
pub fn from_lookup<F>(lookup: F) -> io::Result<SyncConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let base_dir = match get(ENV_BASE_DIR) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    let mut config = SyncConfig::new(base_dir);
    if let Some(url) = get(ENV_BASE_API_URL) {
        config = config.with_base_url(url);
    }
    if let Some(ignore_file) = get(ENV_IGNORE_FILE) {
        config = config.with_ignore_file(ignore_file);
    }
    if let Some(token) = get(ENV_TOKEN) {
        config = config.with_token(token);
    }
    if let Some(namespace) = get(ENV_BASE_NAMESPACE) {
        config = config.with_namespace(namespace);
    }
    Ok(config)
}
