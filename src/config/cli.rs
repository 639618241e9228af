//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pd-hook-audit: PagerDuty webhook auditor
///
/// Lists every service in a PagerDuty account with its Opsmatic webhook
/// status, and optionally installs the webhook where it is missing.
#[derive(Debug, Parser)]
#[command(name = "pd-hook-audit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// PagerDuty account subdomain (required for run mode)
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub subdomain: Option<String>,

    /// PagerDuty API key (required for run mode)
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Opsmatic integration token (required for run mode)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Install the webhook on every service missing it
    #[arg(long = "add-hooks")]
    pub add_hooks: bool,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for pd-hook-audit
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "pd-hook-audit.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
