//! Pleroo CLI Module
//! Command-line host for the update checker and lifecycle hooks

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pleroo")]
#[command(author = "Pleroo Team")]
#[command(version)]
#[command(about = "Monday.com integration plugin: update checks and lifecycle", long_about = None)]
pub struct Cli {
    /// Project directory holding pleroo.config.json (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Registry file (overrides the config and the per-user default)
    #[arg(short, long, global = true)]
    pub registry: Option<PathBuf>,

    /// Output format (json for scripting)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default pleroo.config.json
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Run one update check against the registry
    Check,

    /// Show installed version and any pending update
    Status,

    /// Record the plugin as installed in the registry
    Activate,

    /// Withdraw the plugin's pending update from the registry
    Deactivate,
}

impl Cli {
    pub fn get_project_dir(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
