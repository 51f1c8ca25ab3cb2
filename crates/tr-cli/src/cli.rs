use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tailorent")]
#[command(about = "TailoRent session and marketplace CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config.toml and TR_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
