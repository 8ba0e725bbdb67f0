//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use tally_core::{ParserConfig, SpendingParser};

/// Load the parser configuration and build a parser from it
pub fn load_parser(config_path: Option<&Path>) -> Result<SpendingParser> {
    let config = ParserConfig::load(config_path).context("Failed to load parser config")?;
    debug!(
        default_currency = %config.default_currency,
        policy = config.description_policy.as_str(),
        custom_corpus = config.training.is_some(),
        "Parser config loaded"
    );
    SpendingParser::new(config).context("Failed to build category model")
}

/// Processing instant for a `--date` override, or now
///
/// A fixed date is taken at noon UTC so it stays on the same calendar day.
pub fn processing_time(date: Option<&str>) -> Result<DateTime<Utc>> {
    match date {
        Some(date) => {
            let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .context("Invalid --date format (use YYYY-MM-DD)")?;
            let noon = NaiveTime::from_hms_opt(12, 0, 0).context("Invalid processing time")?;
            Ok(day.and_time(noon).and_utc())
        }
        None => Ok(Utc::now()),
    }
}
