//! Description generation

use serde::{Deserialize, Serialize};

use crate::models::ExtractedEntities;
use crate::money::currency_for_marker;

/// Placeholder description used when nothing better is available
pub const PLACEHOLDER_DESCRIPTION: &str = "Voice expense";

const SPENDING_VERBS: &[&str] = &["bought", "purchased", "purchase", "spent", "paid", "got"];

const PREPOSITIONS: &[&str] = &["on", "for", "at", "in", "with"];

/// How the description of a parsed expense is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionPolicy {
    /// The utterance as spoken
    #[default]
    Verbatim,
    /// The words after the spending verb, without amounts and filler
    Condensed,
}

impl DescriptionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbatim => "verbatim",
            Self::Condensed => "condensed",
        }
    }
}

impl std::str::FromStr for DescriptionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbatim" => Ok(Self::Verbatim),
            "condensed" => Ok(Self::Condensed),
            _ => Err(format!("Unknown description policy: {}", s)),
        }
    }
}

/// Build the description for an utterance; never returns an empty string
pub fn describe(text: &str, entities: &ExtractedEntities, policy: DescriptionPolicy) -> String {
    let described = match policy {
        DescriptionPolicy::Verbatim => text.trim().to_string(),
        DescriptionPolicy::Condensed => condense(text, entities),
    };
    if described.is_empty() {
        PLACEHOLDER_DESCRIPTION.to_string()
    } else {
        described
    }
}

fn condense(text: &str, entities: &ExtractedEntities) -> String {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
                .to_string()
        })
        .filter(|w| !w.is_empty())
        .collect();

    let filler: Vec<String> = entities
        .amounts
        .iter()
        .chain(&entities.currencies)
        .chain(&entities.money)
        .flat_map(|span| span.split_whitespace().map(str::to_string))
        .collect();

    let verb = words
        .iter()
        .position(|w| SPENDING_VERBS.contains(&w.to_lowercase().as_str()));

    if let Some(index) = verb {
        let kept: Vec<&str> = words[index + 1..]
            .iter()
            .filter(|w| {
                let lower = w.to_lowercase();
                !filler.contains(&lower)
                    && !PREPOSITIONS.contains(&lower.as_str())
                    && !lower.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
                    && currency_for_marker(&lower).is_none()
            })
            .map(String::as_str)
            .collect();
        if !kept.is_empty() {
            return kept.join(" ");
        }
    }

    entities
        .organizations
        .first()
        .or_else(|| entities.places.first())
        .cloned()
        .unwrap_or_else(|| text.trim().to_string())
}
