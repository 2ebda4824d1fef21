//! CLI definitions for wsboot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wsboot CLI.
#[derive(Parser)]
#[command(name = "wsboot")]
#[command(about = "Discover, filter and deploy WebSocket endpoints")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path [default: config/wsboot.toml, then the user config]
    #[arg(short, long, global = true, env = "WSBOOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Deploy the endpoints of a scan manifest into a container
    Deploy {
        /// Scan manifest (TOML)
        manifest: PathBuf,

        /// Context path, overriding the configuration
        #[arg(long)]
        context_path: Option<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// Keep the host running until Ctrl-C
        #[arg(long)]
        wait: bool,
    },

    /// Show what a deployment would register, without registering
    Plan {
        /// Scan manifest (TOML)
        manifest: PathBuf,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Validate the configuration file
    CheckConfig,
}
