mod approvals;
mod clean;
mod rows;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::approvals::ApprovalsCommands;

#[derive(Debug, Parser)]
#[command(name = "pim")]
#[command(about = "Product information data-cleaning console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize variant strings and print the result as JSON
    Normalize {
        /// Raw variant cells, e.g. "2 X 5KG"
        #[arg(required = true)]
        variants: Vec<String>,
    },
    /// Clean a JSON array of sheet rows and cache them under a workflow id
    Clean {
        /// Path to a JSON file holding an array of row objects
        #[arg(long)]
        input: PathBuf,
        /// Workflow id to cache under (a new one is generated when omitted)
        #[arg(long)]
        workflow: Option<String>,
        /// Skip the remote categorizer; every row is categorized as unknown
        #[arg(long)]
        offline: bool,
    },
    /// Print the image-conversion preview of a JSON array of sheet rows
    Preview {
        /// Path to a JSON file holding an array of row objects
        #[arg(long)]
        input: PathBuf,
    },
    /// Submit a cached workflow to the approval queue and clear it
    Push {
        #[arg(long)]
        workflow: String,
    },
    /// Review the approval queue
    Approvals {
        #[command(subcommand)]
        command: ApprovalsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // `normalize` and `preview` run without a backend, so a missing
    // PIM_API_BASE_URL only matters for the commands that need config.
    let config = pim_core::load_app_config_from_env();
    let fallback_level = config
        .as_ref()
        .map_or_else(|_| "info".to_owned(), |c| c.log_level.clone());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Normalize { variants } => clean::run_normalize(&variants)?,
        Commands::Preview { input } => clean::run_preview(&input)?,
        Commands::Clean {
            input,
            workflow,
            offline,
        } => clean::run_clean(&config?, &input, workflow, offline).await?,
        Commands::Push { workflow } => clean::run_push(&config?, &workflow).await?,
        Commands::Approvals { command } => approvals::run(&config?, command).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
