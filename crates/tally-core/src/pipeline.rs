//! Utterance to spending record pipeline
//!
//! Stages run strictly forward: entities, then amount/currency, description
//! and date (each from the entities or text alone), then category, then
//! confidence. Nothing here performs I/O.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classifier::CategoryModel;
use crate::config::ParserConfig;
use crate::confidence;
use crate::dates::resolve_date;
use crate::description::describe;
use crate::entities::extract_entities;
use crate::error::{Error, Result};
use crate::models::ParsedSpending;
use crate::money::resolve_money;

/// Turns free-form spending utterances into `ParsedSpending` records
#[derive(Debug, Clone)]
pub struct SpendingParser {
    config: ParserConfig,
    model: Arc<CategoryModel>,
}

impl SpendingParser {
    /// Create a parser, training a classifier if the config carries a corpus
    pub fn new(config: ParserConfig) -> Result<Self> {
        let model = config.build_model()?;
        Ok(Self { config, model })
    }

    /// Create a parser around an already trained classifier
    pub fn with_model(config: ParserConfig, model: Arc<CategoryModel>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn model(&self) -> &CategoryModel {
        &self.model
    }

    /// Parse an utterance as of now
    pub fn parse(&self, text: &str) -> Result<ParsedSpending> {
        self.parse_at(text, Utc::now())
    }

    /// Parse an utterance as of `now`
    ///
    /// Relative dates resolve against `now`'s UTC calendar date, which is also
    /// the date when the utterance mentions none. The same text and instant
    /// always give the same record.
    pub fn parse_at(&self, text: &str, now: DateTime<Utc>) -> Result<ParsedSpending> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("text is empty".into()));
        }

        let entities = extract_entities(text);
        let money = resolve_money(
            &entities.money,
            &entities.amounts,
            self.config.default_currency,
        );
        let description = describe(text, &entities, self.config.description_policy);
        let date = resolve_date(text, now.date_naive());
        let classification =
            self.model
                .categorize(text, &description, self.config.min_confidence);
        let confidence =
            confidence::score(&entities, money.amount, &description, &self.config.weights);

        debug!(
            amount = money.amount,
            currency = %money.currency,
            category = %classification.category,
            classifier_confidence = classification.confidence,
            %date,
            confidence,
            "Parsed spending"
        );

        Ok(ParsedSpending {
            amount: money.amount,
            currency: money.currency,
            category: classification.category,
            description,
            location: entities.primary_location().unwrap_or_default().to_string(),
            date,
            confidence,
            timestamp: now,
        })
    }
}

impl Default for SpendingParser {
    fn default() -> Self {
        Self::with_model(ParserConfig::default(), CategoryModel::builtin())
    }
}
