//! CLI command implementations.

pub mod rebuild;
pub mod sync;

/// Everything succeeded.
pub const EXIT_OK: u8 = 0;
/// The snapshot could not be written.
pub const EXIT_PERSIST: u8 = 1;
/// The pass finished but some documents failed.
pub const EXIT_PARTIAL: u8 = 3;
/// Startup failed before any document was touched.
pub const EXIT_CONFIG: u8 = 4;
