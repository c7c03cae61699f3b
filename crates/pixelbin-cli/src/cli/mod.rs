//! CLI for the Pixelbin SDK.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pixelbin_core::config;
use std::path::PathBuf;

use commands::{run_app_info, run_build, run_list_files, run_parse, run_sign_url};

/// Top-level CLI for the Pixelbin SDK.
#[derive(Debug, Parser)]
#[command(name = "pixelbin")]
#[command(about = "Pixelbin: transformation URLs, signed URLs and platform API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a Pixelbin URL and print its structured form as JSON.
    Parse {
        /// Pixelbin CDN URL.
        url: String,
        /// The URL is served from a custom domain (no cloud name segment).
        #[arg(long)]
        custom_domain: bool,
    },

    /// Build a Pixelbin URL from a JSON object.
    Build {
        /// JSON file with the URL object, or `-` for stdin.
        input: PathBuf,
    },

    /// Sign a delivery URL for a private asset.
    SignUrl {
        /// URL to sign.
        url: String,
        /// Seconds until the signature expires.
        #[arg(long, default_value = "3600", value_name = "SECS")]
        expiry: u64,
        /// Access key id (sent as `pbt`).
        #[arg(long)]
        access_key: String,
        /// Access token used to compute the signature.
        #[arg(long)]
        token: String,
    },

    /// Show the app and organization owning the configured API secret.
    AppInfo,

    /// List files and folders.
    ListFiles {
        /// Folder to list.
        #[arg(long)]
        path: Option<String>,
        /// Search by name.
        #[arg(long)]
        name: Option<String>,
        /// Walk every page instead of only the first.
        #[arg(long)]
        all: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!(domain = %cfg.domain, cdn = %cfg.cdn_base_url, "loaded config");

        match cli.command {
            CliCommand::Parse { url, custom_domain } => run_parse(&url, custom_domain)?,
            CliCommand::Build { input } => run_build(&input, &cfg)?,
            CliCommand::SignUrl {
                url,
                expiry,
                access_key,
                token,
            } => run_sign_url(&url, expiry, &access_key, &token)?,
            CliCommand::AppInfo => run_app_info(&cfg).await?,
            CliCommand::ListFiles { path, name, all } => {
                run_list_files(&cfg, path, name, all).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
