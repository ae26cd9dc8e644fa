//! dirtrim command-line entry point.

#![forbid(unsafe_code)]

use std::sync::Arc;

use clap::{ArgAction, Parser};
use dirtrim_application::{TruncationReport, TruncationService};
use dirtrim_core::AppResult;
use dirtrim_infrastructure::OsFileSystem;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Trims a directory to a maximum number of files or immediate child
/// subdirectories, deleting the oldest entries first.
#[derive(Debug, Parser)]
#[command(
    name = "dirtrim",
    about = "Trims a directory to a maximum entry count, deleting the oldest entries first"
)]
struct CliArgs {
    /// Target directory to truncate.
    #[arg(short = 't', long = "target")]
    target: String,

    /// Truncate by immediate child directory count.
    #[arg(
        short = 'd',
        long = "directory",
        action = ArgAction::Set,
        default_value_t = false,
        value_name = "true|false"
    )]
    directory: bool,

    /// Truncate by file count.
    #[arg(
        short = 'f',
        long = "files",
        action = ArgAction::Set,
        default_value_t = false,
        value_name = "true|false"
    )]
    files: bool,

    /// Maximum number of entries to retain. Malformed values are logged
    /// and treated as 0.
    #[arg(short = 'c', long = "count", default_value = "0", value_name = "INT")]
    count: String,
}

fn main() {
    init_tracing();
    let args = CliArgs::parse();
    let count = parse_count(&args.count);

    match run(&args, count) {
        Ok(Some(report)) => {
            info!(
                target = %args.target,
                examined = report.examined,
                excess = report.excess,
                deleted = report.deleted_count(),
                "truncation finished"
            );
        }
        Ok(None) => {
            warn!("no truncation mode selected; pass --directory=true or --files=true");
        }
        Err(error) => {
            // Failures are logged, never signalled through the exit code.
            error!(target = %args.target, error = %error, "truncation failed");
        }
    }
}

fn run(args: &CliArgs, count: i64) -> AppResult<Option<TruncationReport>> {
    let service = TruncationService::new(args.target.as_str(), Arc::new(OsFileSystem::new()))?;

    if args.directory {
        return service.truncate_by_directory_count(count).map(Some);
    }
    if args.files {
        return service.truncate_by_file_count(count, false).map(Some);
    }

    Ok(None)
}

fn parse_count(raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(parse_error) => {
            error!(
                raw = raw,
                error = %parse_error,
                "count needs to be a number; using 0"
            );
            0
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
