//! Command implementations.
//!
//! - **migrate**: rewrite dynamic route handlers to await their `params`

pub mod migrate;

pub use migrate::{
    failure_report, handle_migrate, migrate_file, report_lines, run_migration, FileReport,
    MigrateOptions, RunSummary, WriteMode, COMPLETION_SENTINEL,
};
