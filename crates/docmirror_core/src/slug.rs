//! Path-derived document identity.
//!
//! A slug is the lowercase hex MD5 digest of a document's normalized relative
//! path. It survives content edits but changes when the file moves, so a
//! rename is seen as one document disappearing and another appearing.

use std::path::{Component, Path};

/// Length of a slug in hex characters.
pub const SLUG_LEN: usize = 32;

/// Computes the slug for a normalized relative path.
///
/// The digest is taken over the path string itself, never the file content.
pub fn slug_for(path: &str) -> String {
    format!("{:x}", md5::compute(path.as_bytes()))
}

/// Normalizes a relative path into the `/`-separated form used for slugs.
///
/// `.` components are dropped, so `./docs/a.md` and `docs/a.md` share an
/// identity. The root itself normalizes to `.`.
pub fn normalize_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
