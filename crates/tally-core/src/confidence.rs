//! Extraction confidence scoring

use serde::{Deserialize, Serialize};

use crate::description::PLACEHOLDER_DESCRIPTION;
use crate::models::ExtractedEntities;

/// Evidence that contributes to the confidence of a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A positive amount was resolved
    Amount,
    /// The description is more than the placeholder
    Description,
    /// A place or organization was recognized
    Location,
    /// The utterance mentioned a date
    Date,
}

impl Signal {
    pub fn all() -> &'static [Signal] {
        &[Self::Amount, Self::Description, Self::Location, Self::Date]
    }
}

/// Weight of each signal; the defaults sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub amount: f64,
    pub description: f64,
    pub location: f64,
    pub date: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            amount: 0.4,
            description: 0.3,
            location: 0.2,
            date: 0.1,
        }
    }
}

impl ConfidenceWeights {
    pub fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Amount => self.amount,
            Signal::Description => self.description,
            Signal::Location => self.location,
            Signal::Date => self.date,
        }
    }
}

/// Signals present in a parse, in declaration order
pub fn signals(entities: &ExtractedEntities, amount: f64, description: &str) -> Vec<Signal> {
    Signal::all()
        .iter()
        .copied()
        .filter(|signal| match signal {
            Signal::Amount => amount > 0.0,
            Signal::Description => {
                !description.trim().is_empty() && description != PLACEHOLDER_DESCRIPTION
            }
            Signal::Location => {
                !entities.places.is_empty() || !entities.organizations.is_empty()
            }
            Signal::Date => !entities.dates.is_empty(),
        })
        .collect()
}

/// Sum the weights of the present signals, rounded to two decimals and
/// clamped to [0, 1]
///
/// Weights that are not finite count as zero.
pub fn score(
    entities: &ExtractedEntities,
    amount: f64,
    description: &str,
    weights: &ConfidenceWeights,
) -> f64 {
    let total: f64 = signals(entities, amount, description)
        .into_iter()
        .map(|s| weights.weight(s))
        .filter(|w| w.is_finite())
        .sum();
    ((total * 100.0).round() / 100.0).clamp(0.0, 1.0)
}
