//! CLI for the psd payslip client.

mod commands;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use psd_core::config;
use std::path::PathBuf;

use commands::{run_config_path, run_submit};

/// Top-level CLI for the psd payslip client.
#[derive(Debug, Parser)]
#[command(name = "psd")]
#[command(about = "psd: payslip submission and download client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit credentials and download the returned payslip archive.
    Run {
        /// Server base URL (overrides the config file).
        #[arg(long, value_name = "URL")]
        server: Option<String>,

        /// Directory to save the download into (overrides the config file).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Username; prompted for when omitted.
        #[arg(long)]
        username: Option<String>,

        /// Replace an existing file with the same name.
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the active config file location.
    ConfigPath,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                server,
                output_dir,
                username,
                overwrite,
            } => run_submit(&cfg, server, output_dir, username, overwrite).await?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}
