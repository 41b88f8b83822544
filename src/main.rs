//! frombones-build
//!
//! Derives Android packaging metadata for the FromBones port from its
//! external sources of truth and feeds it into the packaging pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use frombones_build::commands::{
    ApplyVersionCommand, BuildCommand, CleanAllCommand, ReportVersionCommand,
};

/// Build-configuration layer for the FromBones Android port
#[derive(Parser)]
#[command(name = "frombones-build", version, about)]
struct Cli {
    /// Project root containing the app module and the engine manifest
    #[arg(long, global = true, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the version and write it into the app module
    ApplyVersion,
    /// Derive the version and print the package identity
    ReportVersion {
        /// Emit machine-readable JSON instead of the plain report
        #[arg(long)]
        json: bool,
    },
    /// Run the external packaging build with all derived parameters
    Build {
        /// Build the signed, minified release variant
        #[arg(long)]
        release: bool,
    },
    /// Clean the external build and remove the native staging directory
    CleanAll,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let project_root = cli.project_root;

    match cli.command {
        Commands::ApplyVersion => ApplyVersionCommand { project_root }.execute().await,
        Commands::ReportVersion { json } => {
            ReportVersionCommand { project_root, json }.execute().await
        }
        Commands::Build { release } => {
            BuildCommand {
                project_root,
                release,
            }
            .execute()
            .await
        }
        Commands::CleanAll => CleanAllCommand { project_root }.execute().await,
    }
}
