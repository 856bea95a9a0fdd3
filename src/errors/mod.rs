//! Error types for route migration.
//!
//! Only I/O and configuration problems are errors. A file or declaration
//! that does not have the targeted shape is a normal skip and never shows
//! up here.

pub mod collection;
pub mod summary;

pub use collection::{MigrationFailure, OperationType};
pub use summary::FailureSummary;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for migration operations
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The routes directory cannot be enumerated
    #[error("Cannot access routes directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route file cannot be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route file cannot be written back
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is unreadable or invalid
    #[error("Configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl MigrateError {
    pub fn discovery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Discovery { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Config { path, .. } => path,
        }
    }

    /// Whether the whole run must stop rather than skip one file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Discovery { .. } | Self::Config { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_messages_name_the_path() {
        let err = MigrateError::read(
            "app/api/[id]/route.ts",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );

        assert_eq!(
            err.to_string(),
            "Failed to read app/api/[id]/route.ts: Permission denied"
        );
        assert_eq!(err.path(), std::path::Path::new("app/api/[id]/route.ts"));
    }

    #[test]
    fn test_fatal_classification() {
        let not_found = || io::Error::new(io::ErrorKind::NotFound, "missing");

        assert!(MigrateError::discovery("app/api", not_found()).is_fatal());
        assert!(MigrateError::config(".params-migrate.toml", "bad").is_fatal());
        assert!(!MigrateError::read("a.ts", not_found()).is_fatal());
        assert!(!MigrateError::write("a.ts", not_found()).is_fatal());
    }
}
