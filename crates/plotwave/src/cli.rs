use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plotwave")]
#[command(about = "Wave scheduler for plot-generation batch jobs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./plotwave.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default plotwave.toml to the working directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the full decision trace without launching or sleeping
    Plan,

    /// Execute one full scheduling round
    Run {
        /// Print decisions instead of spawning jobs; no sleeps
        #[arg(long)]
        dry_run: bool,
    },

    /// Check executable availability, configuration, and device directories
    Doctor,
}
