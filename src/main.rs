use anyhow::{Context, Result};
use params_migrate::cli::{self, Cli};
use params_migrate::commands::{self, RunSummary};
use params_migrate::formatting::ColoredFormatter;
use params_migrate::io::RealFileSystem;
use params_migrate::MigrateError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            error_exit_code(&e)
        }
    }
}

// Fatal errors stop the run before any report; anything else is a failed run
fn error_exit_code(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<MigrateError>() {
        Some(e) if !e.is_fatal() => ExitCode::FAILURE,
        _ => ExitCode::from(2),
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let options = cli
        .migrate_options()
        .context("Failed to load configuration")?;

    if options.parallel {
        cli::configure_thread_pool(cli.jobs);
    }

    let summary = commands::handle_migrate(&RealFileSystem::new(), &options)
        .context("Route discovery failed")?;

    print_report(cli, &summary, &options.root);
    Ok(exit_code(cli, &summary))
}

// Side effect function for console output (I/O at edges)
fn print_report(cli: &Cli, summary: &RunSummary, root: &std::path::Path) {
    let formatter = ColoredFormatter::new(cli.formatting_config());

    let mut lines = commands::report_lines(summary, root, cli.write_mode(), &formatter);
    let sentinel = lines.pop();
    for line in lines {
        println!("{}", line);
    }
    if let Some(report) = commands::failure_report(summary, &formatter) {
        eprintln!("{}", report);
    }
    if let Some(sentinel) = sentinel {
        println!("{}", sentinel);
    }
}

// Pure function to determine the exit status
fn exit_code(cli: &Cli, summary: &RunSummary) -> ExitCode {
    if summary.has_failures() || (cli.check && summary.changed_count() > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
