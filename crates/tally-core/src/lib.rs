//! Tally Core Library
//!
//! Turns spoken or typed spending utterances ("I spent 680 yen on matcha latte
//! at Doutor") into structured expense records:
//! - Entity extraction (amounts, currencies, money, places, organizations, dates)
//! - Amount and currency resolution
//! - Description generation
//! - Naive Bayes category classification
//! - Relative and absolute date resolution
//! - Confidence scoring
//! - TOML parser configuration

pub mod classifier;
pub mod confidence;
pub mod config;
pub mod dates;
pub mod description;
pub mod entities;
pub mod error;
pub mod models;
pub mod money;
pub mod numbers;
pub mod pipeline;

pub use classifier::{CategoryModel, Classification, TrainingDocument};
pub use confidence::{ConfidenceWeights, Signal};
pub use config::ParserConfig;
pub use dates::{resolve_date, DateMention};
pub use description::{DescriptionPolicy, PLACEHOLDER_DESCRIPTION};
pub use entities::extract_entities;
pub use error::{Error, Result};
pub use models::{
    Category, CategoryOption, Currency, CurrencyOption, ExtractedEntities, ParsedSpending,
};
pub use money::{resolve_money, Money};
pub use pipeline::SpendingParser;
