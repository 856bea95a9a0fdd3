//! Per-file failure records for a migration run.
//!
//! Read and write failures are isolated to the file they happen on: the
//! run records them here and carries on with the remaining files.

use super::MigrateError;
use std::path::PathBuf;

/// Information about a file that could not be migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFailure {
    pub path: PathBuf,
    pub operation: OperationType,
    pub error: String, // String for Clone, preserves error message
}

impl MigrationFailure {
    pub fn new(path: PathBuf, operation: OperationType, error: impl std::fmt::Display) -> Self {
        Self {
            path,
            operation,
            error: error.to_string(),
        }
    }

    pub fn file_read(path: PathBuf, error: impl std::fmt::Display) -> Self {
        Self::new(path, OperationType::FileRead, error)
    }

    pub fn file_write(path: PathBuf, error: impl std::fmt::Display) -> Self {
        Self::new(path, OperationType::FileWrite, error)
    }
}

impl From<MigrateError> for MigrationFailure {
    fn from(error: MigrateError) -> Self {
        let path = error.path().to_path_buf();
        match error {
            MigrateError::Read { .. } => Self::file_read(path, error),
            MigrateError::Write { .. } => Self::file_write(path, error),
            MigrateError::Discovery { .. } | MigrateError::Config { .. } => {
                Self::new(path, OperationType::Other, error)
            }
        }
    }
}

/// Type of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationType {
    FileRead,
    FileWrite,
    Other,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "File read",
            Self::FileWrite => "File write",
            Self::Other => "Other",
        }
    }
}
