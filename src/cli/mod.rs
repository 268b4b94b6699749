//! CLI entry point for tokengate.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tokengate CLI
#[derive(Parser, Debug)]
#[command(name = "tokengate", version, about = "OAuth2 implicit-grant helper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the authorization URL for a page
    Url(UrlArgs),
    /// Print the token fields carried by a URL fragment as JSON
    Strip(StripArgs),
    /// Report whether requests to a URL need a bearer token
    Check(CheckArgs),
    /// Fetch a fresh token silently and store it
    Refresh(RefreshArgs),
}

/// Where options come from: an optional file, layered under `TOKENGATE_*`
/// environment variables.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON or TOML options file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `tokengate url`.
#[derive(Parser, Debug)]
pub struct UrlArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Page the redirect starts from
    #[arg(short, long)]
    pub location: String,
}

/// Arguments for `tokengate strip`.
#[derive(Parser, Debug)]
pub struct StripArgs {
    /// URL whose fragment holds the token
    pub url: String,
}

/// Arguments for `tokengate check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Request URL to classify
    pub url: String,
}

/// Arguments for `tokengate refresh`.
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Page the refresh is made for
    #[arg(short, long)]
    pub location: String,

    /// Session file (defaults to ~/.tokengate/session.json)
    #[arg(long)]
    pub storage: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
