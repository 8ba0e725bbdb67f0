//! CLI command tests

use std::io::Write;

use chrono::{NaiveDate, Timelike};
use clap::Parser;
use tally_core::{Category, Currency};

use crate::cli::{Cli, Commands};
use crate::commands::{self, format_spending};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_args() {
    let cli = Cli::try_parse_from([
        "tally",
        "parse",
        "spent 5 dollars on coffee",
        "--json",
        "--date",
        "2024-03-15",
    ])
    .unwrap();

    match cli.command {
        Commands::Parse { text, json, date } => {
            assert_eq!(text, "spent 5 dollars on coffee");
            assert!(json);
            assert_eq!(date.as_deref(), Some("2024-03-15"));
        }
        _ => panic!("expected parse command"),
    }
    assert!(cli.config.is_none());
    assert!(!cli.verbose);
}

#[test]
fn test_serve_args() {
    let cli = Cli::try_parse_from([
        "tally",
        "-v",
        "serve",
        "--allow-origin",
        "http://localhost:5173",
        "--allow-origin",
        "http://localhost:4173",
        "--config",
        "parser.toml",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.config.unwrap().to_str(), Some("parser.toml"));
    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            allow_origins,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(static_dir.is_none());
            assert_eq!(allow_origins.len(), 2);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_missing_text_is_rejected() {
    assert!(Cli::try_parse_from(["tally", "parse"]).is_err());
    assert!(Cli::try_parse_from(["tally", "classify"]).is_err());
}

// ========== Shared Utility Tests ==========

#[test]
fn test_processing_time_fixed_date() {
    let now = commands::processing_time(Some("2024-03-15")).unwrap();
    assert_eq!(now.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(now.hour(), 12);
}

#[test]
fn test_processing_time_invalid_date() {
    assert!(commands::processing_time(Some("15/03/2024")).is_err());
    assert!(commands::processing_time(Some("2024-02-30")).is_err());
}

#[test]
fn test_load_parser_default() {
    let parser = commands::load_parser(None).unwrap();
    assert!(parser.model().vocabulary_size() > 0);
}

#[test]
fn test_load_parser_from_config() {
    let file = write_config("[currency]\ndefault = \"JPY\"\n");
    let parser = commands::load_parser(Some(file.path())).unwrap();
    assert_eq!(parser.config().default_currency, Currency::Jpy);

    let now = commands::processing_time(Some("2024-03-15")).unwrap();
    let parsed = parser.parse_at("ramen 900", now).unwrap();
    assert_eq!(parsed.currency, Currency::Jpy);
    assert_eq!(parsed.amount, 900.0);
}

#[test]
fn test_load_parser_bad_config() {
    let file = write_config("[currency]\ndefault = \"EUR\"\n");
    let err = commands::load_parser(Some(file.path())).unwrap_err();
    assert!(format!("{:#}", err).contains("EUR"));
}

// ========== Command Tests ==========

#[test]
fn test_cmd_parse() {
    assert!(commands::cmd_parse(None, "spent 5 dollars on coffee", false, None).is_ok());
    assert!(commands::cmd_parse(None, "spent 5 dollars on coffee", true, Some("2024-03-15")).is_ok());
}

#[test]
fn test_cmd_parse_blank_text() {
    assert!(commands::cmd_parse(None, "   ", false, None).is_err());
}

#[test]
fn test_cmd_classify() {
    assert!(commands::cmd_classify(None, "ramen for dinner", 3).is_ok());
    assert!(commands::cmd_classify(None, "xyzzy", 0).is_ok());
}

#[test]
fn test_cmd_categories() {
    assert!(commands::cmd_categories().is_ok());
}

#[test]
fn test_format_spending() {
    let parser = commands::load_parser(None).unwrap();
    let now = commands::processing_time(Some("2024-03-15")).unwrap();
    let parsed = parser
        .parse_at("I spent 680 yen on matcha latte at Doutor yesterday", now)
        .unwrap();
    assert_eq!(parsed.category, Category::Coffee);

    let out = format_spending(&parsed);
    assert!(out.contains("Coffee ¥680"));
    assert!(out.contains("Location:    Doutor"));
    assert!(out.contains("Date:        2024-03-14"));
    assert!(out.contains("Confidence:  100%"));
    assert!(!out.contains("please review"));
}

#[test]
fn test_format_spending_low_confidence() {
    let parser = commands::load_parser(None).unwrap();
    let now = commands::processing_time(Some("2024-03-15")).unwrap();
    let parsed = parser.parse_at("lunch 12", now).unwrap();

    let out = format_spending(&parsed);
    assert!(out.contains("$12.00"));
    assert!(!out.contains("Location:"));

    let parsed = parser.parse_at("hmm", now).unwrap();
    assert!(format_spending(&parsed).contains("please review"));
}
