//! File system implementations of [`FileSystem`].
//!
//! ```rust,ignore
//! use params_migrate::io::{FileSystem, RealFileSystem};
//!
//! let fs = RealFileSystem::new();
//! let content = fs.read_to_string(Path::new("app/api/orders/[id]/route.ts"))?;
//! ```

use crate::errors::{MigrateError, Result};
use crate::io::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Production file system implementation.
///
/// Delegates directly to `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| MigrateError::read(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| MigrateError::write(path, e))
    }
}

/// In-memory file system, used by tests and dry runs over fixtures.
///
/// Paths can be marked read-only to simulate write failures.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    read_only: HashSet<PathBuf>,
    writes: RwLock<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    pub fn with_read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes
            .read()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| {
            MigrateError::read(path, io::Error::new(io::ErrorKind::NotFound, "No such file"))
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(MigrateError::write(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
            ));
        }

        let poisoned = || MigrateError::write(path, io::Error::other("lock poisoned"));
        self.files
            .write()
            .map_err(|_| poisoned())?
            .insert(path.to_path_buf(), content.to_string());
        self.writes
            .write()
            .map_err(|_| poisoned())?
            .push(path.to_path_buf());
        Ok(())
    }
}
