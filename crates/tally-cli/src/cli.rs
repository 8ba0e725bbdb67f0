//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Turn spoken spending into expense records
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Natural-language spending extraction", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Parser config file (defaults to the user override, then built-in settings)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a spending utterance into an expense record
    Parse {
        /// Utterance, e.g. "I spent 680 yen on matcha latte at Doutor"
        text: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        /// Processing date (YYYY-MM-DD) that relative dates resolve against
        #[arg(long)]
        date: Option<String>,
    },

    /// Show category probabilities for a piece of text
    Classify {
        /// Text to classify
        text: String,

        /// Number of categories to show
        #[arg(short, long, default_value = "3")]
        top: usize,
    },

    /// List categories and currencies
    Categories,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },
}
