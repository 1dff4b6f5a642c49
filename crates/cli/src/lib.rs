//! # Studio CLI
//!
//! Command-line interface for Scaffold Studio.
//!
//! Every command reads a saved wizard snapshot (the `GenerationRequest`
//! JSON sent to the scaffolding service) as its model.
//!
//! ## Commands
//!
//! - `preview` - Render the code preview for one entity
//! - `layout` - Print diagram positions, connectors and groups
//! - `validate` - Check a model, failing on errors
//! - `technologies` - List the preview templates
//! - `generate` - Submit a model to the service and wait for the download
//!

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Parser)]
#[command(
    name = "scaffold-studio",
    version,
    about = "Entity modeling, diagram layout and code preview for project scaffolding"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the code preview for one entity
    Preview {
        /// Model file (generation snapshot JSON)
        model: PathBuf,
        /// Entity name
        #[arg(long, short)]
        entity: String,
        /// Technology name; defaults to the model's technology
        #[arg(long, short)]
        technology: Option<String>,
        /// Project name; defaults to the model's project name
        #[arg(long)]
        project_name: Option<String>,
    },
    /// Print diagram positions, connectors and connectivity groups
    Layout {
        model: PathBuf,
        /// Use the wider fullscreen grid
        #[arg(long)]
        fullscreen: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate a model; exits non-zero when errors are found
    Validate { model: PathBuf },
    /// List the supported preview technologies
    Technologies,
    /// Submit a model to the scaffolding service and wait for the result
    Generate { model: PathBuf },
}

/// Execute a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Preview {
            model,
            entity,
            technology,
            project_name,
        } => {
            let output = commands::preview(
                &model,
                &entity,
                technology.as_deref(),
                project_name.as_deref(),
            )?;
            println!("{}", output);
        }
        Commands::Layout {
            model,
            fullscreen,
            json,
        } => {
            println!("{}", commands::layout(&model, config, fullscreen, json)?);
        }
        Commands::Validate { model } => {
            let (output, ok) = commands::validate(&model)?;
            println!("{}", output);
            if !ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Technologies => {
            println!("{}", commands::technologies());
        }
        Commands::Generate { model } => {
            let url = commands::generate(&model, config).await?;
            println!("{}", url);
        }
    }
    Ok(ExitCode::SUCCESS)
}
