use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "torzhok-bot",
    version,
    about = "Telegram bot guiding visitors through the sights of Torzhok",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Attractions JSON file.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Bot API endpoint (for self-hosted API servers).
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Bot token; prefer the TELEGRAM_TOKEN environment variable.
    #[arg(long)]
    pub token: Option<String>,
}
