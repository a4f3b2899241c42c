//! Main entry point for Rolecall.

use anyhow::{Context, Result};
use clap::Parser;
use rolecall_bot::{init_logging, RolecallBot};
use rolecall_config::ConfigLoader;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directive, overrides the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ConfigLoader::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    let _log_guard = init_logging(&config.logging)?;
    info!(guilds = config.guilds.len(), "Starting Rolecall");

    let bot = RolecallBot::new(config);
    if let Err(e) = bot.start().await {
        error!(error = %e, "Bot stopped with an error");
        return Err(e.into());
    }

    info!("Rolecall has shut down");
    Ok(())
}
