use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod doctor;
mod init_cmd;
mod plan_cmd;
mod run_cmd;
mod telemetry;

use cli::{Cli, Commands};
use pw_config::{CONFIG_FILE_NAME, PlotConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match cli.command {
        Commands::Init { force } => init_cmd::init(&config_path, force),
        Commands::Plan => {
            let config = load_config(&config_path)?;
            plan_cmd::plan(config)
        }
        Commands::Run { dry_run } => {
            let config = load_config(&config_path)?;
            run_cmd::run(config, dry_run).await
        }
        Commands::Doctor => {
            let config = load_config(&config_path)?;
            doctor::run_doctor(&config)
        }
    }
}

fn load_config(path: &std::path::Path) -> Result<PlotConfig> {
    if path.exists() {
        PlotConfig::load(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(PlotConfig::default())
    }
}
