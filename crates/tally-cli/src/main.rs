//! Tally CLI - Natural-language spending extraction
//!
//! Usage:
//!   tally parse "spent 680 yen on a latte"   Parse an utterance
//!   tally classify "ramen for dinner"        Show category probabilities
//!   tally categories                         List categories and currencies
//!   tally serve --port 3000                  Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Parse { text, json, date } => {
            commands::cmd_parse(config, &text, json, date.as_deref())
        }
        Commands::Classify { text, top } => commands::cmd_classify(config, &text, top),
        Commands::Categories => commands::cmd_categories(),
        Commands::Serve {
            port,
            host,
            static_dir,
            allow_origins,
        } => {
            commands::cmd_serve(config, &host, port, static_dir.as_deref(), allow_origins).await
        }
    }
}
