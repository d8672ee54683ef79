//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Argument parsing
//! - Target directory and rules resolution
//! - Handing the run to the organizer with a terminal reporter
//! - Mapping the result to a process exit code

use crate::config::{ConfigError, DEFAULT_CONFIG_FILE, RuleSet};
use crate::organizer::{self, FsLister, OrganizeError, RunReport};
use crate::output::ConsoleReporter;
use crate::target::{self, TargetDir, TargetError};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Sort the entries of a directory into category subfolders.
#[derive(Debug, Clone, Parser)]
#[command(name = "dirsort", version, about)]
pub struct Cli {
    /// Directory to organize. Defaults to the DIR environment variable.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// JSON rules file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Env file to read DIR from. Defaults to .env in the working directory.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Show a progress bar while entries are moved.
    #[arg(long)]
    pub progress: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Errors that stop the CLI before or instead of a run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Organize(#[from] OrganizeError),
}

/// Exit code when the run could not start.
pub const EXIT_SETUP_FAILURE: u8 = 1;
/// Exit code when a move failure stopped the run.
pub const EXIT_RUN_STOPPED: u8 = 2;

/// Resolves the target directory and rules, then organizes the directory.
///
/// The target is resolved first: `--dir` if given, otherwise `DIR` from the
/// environment after loading the env file. Rules are loaded before any entry
/// is touched.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use dirsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["dirsort", "--dir", "/home/user/Downloads"]);
/// match run_cli(&cli) {
///     Ok(report) => println!("{} entries moved", report.moved.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunReport, CliError> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let target = resolve_target(cli)?;
    let rules = RuleSet::load(&cli.config)?;

    let mut reporter = ConsoleReporter::new(cli.progress);
    let report = organizer::run(&rules, target.path(), &FsLister, &mut reporter)?;
    Ok(report)
}

fn resolve_target(cli: &Cli) -> Result<TargetDir, TargetError> {
    if let Some(dir) = &cli.dir {
        return TargetDir::new(dir);
    }

    target::load_env_file(cli.env_file.as_deref())?;
    TargetDir::from_env()
}

/// Maps the outcome of `run_cli` to a process exit code.
pub fn exit_code(result: &Result<RunReport, CliError>) -> ExitCode {
    match result {
        Ok(report) if report.is_complete() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_RUN_STOPPED),
        Err(_) => ExitCode::from(EXIT_SETUP_FAILURE),
    }
}
