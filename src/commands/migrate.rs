//! One migration run: discover route files, transform each one, write back
//! the ones that changed and report.
//!
//! Files are independent of each other, so they are processed on the rayon
//! pool unless parallelism is turned off. Read and write failures are
//! recorded per file and never stop the run.

use crate::config::{MigrateConfig, RewriteConfig};
use crate::errors::{FailureSummary, MigrateError, MigrationFailure};
use crate::formatting::OutputFormatter;
use crate::io::{find_route_files, FileSystem};
use crate::rewrite::{transform, RouteFile, TransformationOutcome};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Printed once every file has been handled.
pub const COMPLETION_SENTINEL: &str = "Done!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite changed files in place
    Apply,
    /// Report what would change without writing
    DryRun,
}

#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub root: PathBuf,
    pub config: MigrateConfig,
    pub mode: WriteMode,
    pub parallel: bool,
}

/// Outcome for one file that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: TransformationOutcome,
}

/// Aggregated result of a run, in path order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failures: Vec<MigrationFailure>,
}

impl RunSummary {
    pub fn from_results(results: Vec<Result<FileReport, MigrationFailure>>) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result {
                Ok(report) => summary.reports.push(report),
                Err(failure) => summary.failures.push(failure),
            }
        }
        summary
    }

    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|report| report.outcome.changed)
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn files_scanned(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn sites_rewritten(&self) -> usize {
        self.reports.iter().map(|r| r.outcome.sites_rewritten).sum()
    }

    pub fn sites_injected(&self) -> usize {
        self.reports.iter().map(|r| r.outcome.sites_injected).sum()
    }
}

/// Reads, transforms and (in [`WriteMode::Apply`]) writes back one file.
///
/// The file is only written when the rendered text differs from what was
/// read.
pub fn migrate_file<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    rewrite: &RewriteConfig,
    mode: WriteMode,
) -> Result<FileReport, MigrateError> {
    let content = fs.read_to_string(path)?;
    let transformed = transform(&RouteFile::parse(path, &content), rewrite);

    let rendered = transformed.file.render();
    let mut outcome = transformed.outcome;
    outcome.changed = rendered != content;

    if outcome.changed && mode == WriteMode::Apply {
        fs.write(path, &rendered)?;
        log::info!(
            "{}: {} signature(s) rewritten, {} extraction(s) added",
            path.display(),
            outcome.sites_rewritten,
            outcome.sites_injected
        );
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
    })
}

/// Migrates every file in `files`, keeping their order in the summary.
pub fn run_migration<F: FileSystem>(
    fs: &F,
    files: &[PathBuf],
    rewrite: &RewriteConfig,
    mode: WriteMode,
    parallel: bool,
) -> RunSummary {
    let process = |path: &PathBuf| {
        migrate_file(fs, path, rewrite, mode).map_err(|e| {
            log::warn!("{}", e);
            MigrationFailure::from(e)
        })
    };

    let results: Vec<_> = if parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    RunSummary::from_results(results)
}

/// Discovers route files under `options.root` and migrates them.
///
/// # Errors
///
/// Only discovery problems are returned; per-file failures end up in the
/// summary.
pub fn handle_migrate<F: FileSystem>(
    fs: &F,
    options: &MigrateOptions,
) -> Result<RunSummary, MigrateError> {
    let files = find_route_files(&options.root, &options.config.discovery)?;
    log::info!("Scanning {} route file(s)", files.len());

    let summary = run_migration(
        fs,
        &files,
        &options.config.rewrite,
        options.mode,
        options.parallel,
    );

    log::info!(
        "{} of {} file(s) changed, {} signature(s) rewritten, {} extraction(s) added",
        summary.changed_count(),
        summary.files_scanned(),
        summary.sites_rewritten(),
        summary.sites_injected()
    );
    Ok(summary)
}

/// Console lines for stdout: one per changed file, then the sentinel.
pub fn report_lines(
    summary: &RunSummary,
    root: &Path,
    mode: WriteMode,
    formatter: &dyn OutputFormatter,
) -> Vec<String> {
    let label = match mode {
        WriteMode::Apply => formatter.success("Fixed:"),
        WriteMode::DryRun => formatter.warning("Would fix:"),
    };

    summary
        .changed()
        .map(|report| {
            let shown = report.path.strip_prefix(root).unwrap_or(&report.path);
            format!("{} {}", label, shown.display())
        })
        .chain(std::iter::once(COMPLETION_SENTINEL.to_string()))
        .collect()
}

/// Failure breakdown for stderr, `None` when every file was handled.
pub fn failure_report(summary: &RunSummary, formatter: &dyn OutputFormatter) -> Option<String> {
    if !summary.has_failures() {
        return None;
    }

    let details: String = summary
        .failures
        .iter()
        .map(|failure| format!("{} {}\n", formatter.error("error:"), failure.error))
        .collect();

    Some(format!(
        "{}{}",
        details,
        formatter.dim(&FailureSummary::from_failures(&summary.failures).report())
    ))
}
