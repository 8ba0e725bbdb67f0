//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::load_parser;

pub async fn cmd_serve(
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allow_origins: Vec<String>,
) -> Result<()> {
    let parser = load_parser(config_path)?;

    println!("🚀 Starting Tally web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(path) = config_path {
        println!("   Config: {}", path.display());
    }
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allow_origins.is_empty() {
        println!("   CORS origins: {}", allow_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;

    let config = tally_server::ServerConfig {
        allowed_origins: allow_origins,
    };

    tally_server::serve_with_config(parser, host, port, static_dir_str, config).await?;

    Ok(())
}
