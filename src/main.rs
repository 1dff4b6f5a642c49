//! Scaffold Studio
//!
//! Entity modeling, diagram layout and code preview for a project-scaffolding
//! service, from the command line.

use clap::Parser;
use std::process::ExitCode;
use studio_cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info, or debug with -v
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match studio_cli::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
