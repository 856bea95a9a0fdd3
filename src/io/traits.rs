//! I/O trait definitions for route migration.
//!
//! The rewrite itself is pure; reading and writing route files goes through
//! [`FileSystem`] so the run driver can be exercised against an in-memory
//! implementation.

use crate::errors::{MigrateError, Result};
use std::path::Path;

/// File system operations trait.
///
/// Implementations should be thread-safe (`Send + Sync`) because files are
/// migrated in parallel.
pub trait FileSystem: Send + Sync {
    /// Read a file's full contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::Read` if:
    /// - The file doesn't exist
    /// - Permission is denied
    /// - The file isn't valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace a file's full contents.
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::Write` if:
    /// - Permission is denied
    /// - Disk is full
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}
