//! Command-line interface for params-migrate
//!
//! - Argument parsing (`Cli`)
//! - Turning arguments and the loaded config into `MigrateOptions`
//! - Runtime setup (`setup`)

pub mod setup;

use crate::commands::{MigrateOptions, WriteMode};
use crate::config::{self, MigrateConfig};
use crate::errors::MigrateError;
use crate::formatting::FormattingConfig;
use clap::Parser;
use std::path::PathBuf;

pub use setup::{configure_thread_pool, init_logging, log_level};

#[derive(Parser, Debug)]
#[command(name = "params-migrate")]
#[command(
    about = "Rewrite dynamic route handlers to await their params",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Project root containing the routes directory
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to the nearest .params-migrate.toml)
    #[arg(short, long, env = "PARAMS_MIGRATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Routes directory relative to the root (overrides config)
    #[arg(long)]
    pub routes_dir: Option<PathBuf>,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if any file would change
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Disable parallel processing
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Number of worker threads (0 = all cores)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    pub jobs: usize,

    /// Plain output without colors
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    pub fn write_mode(&self) -> WriteMode {
        if self.dry_run || self.check {
            WriteMode::DryRun
        } else {
            WriteMode::Apply
        }
    }

    pub fn formatting_config(&self) -> FormattingConfig {
        if self.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        }
    }

    /// Loads the config (explicit path or discovered) and applies overrides.
    pub fn migrate_options(&self) -> Result<MigrateOptions, MigrateError> {
        let loaded = match &self.config {
            Some(path) => config::load_config_from(path)?,
            None => config::load_config(&self.root),
        };

        Ok(MigrateOptions {
            root: self.root.clone(),
            config: self.apply_overrides(loaded),
            mode: self.write_mode(),
            parallel: !self.no_parallel,
        })
    }

    fn apply_overrides(&self, mut config: MigrateConfig) -> MigrateConfig {
        if let Some(routes_dir) = &self.routes_dir {
            config.discovery.routes_dir = routes_dir.clone();
        }
        config
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
