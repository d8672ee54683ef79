use clap::Parser;
use dirsort::cli::{Cli, exit_code, run_cli};
use dirsort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run_cli(&cli);

    if let Err(e) = &result {
        OutputFormatter::error(&format!("Error: {}", e));
    }

    exit_code(&result)
}
