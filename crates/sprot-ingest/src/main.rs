//! sprot-ingest - UniProtKB flat-file loader

use anyhow::Result;
use clap::Parser;
use sprot_common::logging::{init_logging, LogConfig, LogLevel};
use sprot_ingest::{commands, Cli, LoaderConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("sprot-ingest")
        .build()
        .overlay_env()?;

    let _guard = init_logging(&log_config)?;

    let config = LoaderConfig::from_env()?;
    commands::run(cli.command, &config)
}
