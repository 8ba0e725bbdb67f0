//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (load_parser, processing time)
//! - `parse` - Parse and classify commands
//! - `categories` - Category and currency listings
//! - `serve` - Web server command

pub mod categories;
pub mod core;
pub mod parse;
pub mod serve;

// Re-export command functions for main.rs
pub use categories::*;
pub use self::core::*;
pub use parse::*;
pub use serve::*;
