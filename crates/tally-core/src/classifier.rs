//! Spending category classifier
//!
//! A multinomial naive Bayes model over bag-of-words token counts, trained once
//! from a small hand-written corpus of keyword documents per category. The
//! trained model is immutable; share it behind an `Arc`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Category;

/// Classifications below this confidence are reported as `Category::Other`
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Additive smoothing for unseen token/category pairs
const SMOOTHING: f64 = 0.1;

/// Built-in training corpus: representative keywords and brands per category
const DEFAULT_CORPUS: &[(Category, &str)] = &[
    // Coffee
    (Category::Coffee, "coffee latte espresso cappuccino americano"),
    (Category::Coffee, "starbucks doutor tullys coffee shop cafe"),
    (Category::Coffee, "coffee bean coffee break frappuccino komeda blue bottle"),
    (Category::Coffee, "iced coffee hot coffee matcha latte tea drink"),
    // Dining
    (Category::Dining, "restaurant lunch dinner breakfast meal"),
    (Category::Dining, "pizza burger sandwich sushi ramen noodles"),
    (Category::Dining, "mcdonalds burger king kfc yoshinoya sukiya izakaya bistro"),
    (Category::Dining, "takeout delivery ubereats bento diner"),
    // Groceries
    (Category::Groceries, "grocery groceries food supermarket market"),
    (Category::Groceries, "vegetables fruits meat bread milk eggs rice"),
    (Category::Groceries, "walmart costco target whole foods trader joes aeon grocery store"),
    (Category::Groceries, "lawson familymart eleven indomaret alfamart convenience snacks"),
    // Transportation
    (Category::Transportation, "transport bus train taxi uber lyft grab gojek"),
    (Category::Transportation, "gasoline fuel parking toll subway"),
    (Category::Transportation, "car bike scooter metro station fare commute"),
    // Shopping
    (Category::Shopping, "bought purchase shop mall store"),
    (Category::Shopping, "clothes shoes bag accessories shirt"),
    (Category::Shopping, "amazon ebay online shopping uniqlo daiso ikea"),
    // Entertainment
    (Category::Entertainment, "movie theater cinema concert game entertainment"),
    (Category::Entertainment, "netflix spotify youtube steam subscription"),
    (Category::Entertainment, "ticket show performance event karaoke"),
    // Utilities
    (Category::Utilities, "electricity water gas internet phone"),
    (Category::Utilities, "bill payment utility service rent"),
    (Category::Utilities, "mobile plan wifi electric bill"),
    // Health
    (Category::Health, "medicine pharmacy doctor hospital dentist"),
    (Category::Health, "vitamin supplement health care clinic"),
    (Category::Health, "cvs walgreens matsumoto kiyoshi drugstore"),
    // Education
    (Category::Education, "book course class education study"),
    (Category::Education, "school university college tuition"),
    (Category::Education, "udemy coursera kinokuniya textbook lesson"),
    // Hobby
    (Category::Hobby, "hobby craft art music instrument"),
    (Category::Hobby, "gym fitness workout exercise yoga"),
    (Category::Hobby, "camera guitar painting gardening"),
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "i", "we", "my", "me", "our", "on", "at", "for", "in", "with", "to", "of",
    "and", "or", "some", "from", "it", "is", "was", "this", "that", "just",
];

/// One training document: a short keyword phrase labelled with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingDocument {
    pub category: Category,
    pub text: String,
}

impl TrainingDocument {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// The built-in training corpus
pub fn default_corpus() -> Vec<TrainingDocument> {
    DEFAULT_CORPUS
        .iter()
        .map(|(category, text)| TrainingDocument::new(*category, *text))
        .collect()
}

/// A category with its posterior probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f64,
}

/// Light suffix stemming so plural and singular forms share a token
/// ("groceries"/"grocery", "movies"/"movie", "tickets"/"ticket")
fn stem(word: &str) -> String {
    let mut w = word.to_string();
    if w.len() > 4 && w.ends_with("ies") {
        w.truncate(w.len() - 2);
    } else if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") {
        w.truncate(w.len() - 1);
    }
    if w.len() > 3 && w.ends_with('y') {
        w.truncate(w.len() - 1);
        w.push('i');
    } else if w.len() > 3 && w.ends_with("ie") {
        w.truncate(w.len() - 1);
    }
    w
}

/// Split text into classifier tokens
///
/// Lower-cases, drops apostrophes, splits on anything that is not
/// alphanumeric, and skips stop words and pure numbers.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\'', "")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1)
        .filter(|t| !STOP_WORDS.contains(t))
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .map(stem)
        .collect()
}

/// Per-category token statistics
#[derive(Debug, Default)]
struct ClassStats {
    documents: usize,
    token_counts: HashMap<String, usize>,
    total_tokens: usize,
}

/// Trained category model
///
/// Read-only after training, so one instance can serve concurrent requests
/// without locking.
#[derive(Debug)]
pub struct CategoryModel {
    classes: BTreeMap<Category, ClassStats>,
    vocabulary: HashSet<String>,
    total_documents: usize,
}

static BUILTIN: OnceLock<Arc<CategoryModel>> = OnceLock::new();

impl CategoryModel {
    /// Train a model from labelled documents
    pub fn train(documents: &[TrainingDocument]) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::Training("training corpus is empty".into()));
        }
        if let Some(doc) = documents.iter().find(|d| tokenize(&d.text).is_empty()) {
            return Err(Error::Training(format!(
                "training document for '{}' has no usable words: {:?}",
                doc.category, doc.text
            )));
        }
        Ok(Self::fit(documents))
    }

    /// Model trained on the built-in corpus, trained at most once per process
    pub fn builtin() -> Arc<CategoryModel> {
        BUILTIN
            .get_or_init(|| Arc::new(Self::fit(&default_corpus())))
            .clone()
    }

    fn fit(documents: &[TrainingDocument]) -> Self {
        let mut classes: BTreeMap<Category, ClassStats> = BTreeMap::new();
        let mut vocabulary = HashSet::new();

        for doc in documents {
            let stats = classes.entry(doc.category).or_default();
            stats.documents += 1;
            for token in tokenize(&doc.text) {
                *stats.token_counts.entry(token.clone()).or_insert(0) += 1;
                stats.total_tokens += 1;
                vocabulary.insert(token);
            }
        }

        debug!(
            documents = documents.len(),
            categories = classes.len(),
            vocabulary = vocabulary.len(),
            "Trained category model"
        );

        Self {
            classes,
            vocabulary,
            total_documents: documents.len(),
        }
    }

    /// Categories the model can predict
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.classes.keys().copied()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Rank every trained category by posterior probability, highest first
    ///
    /// Probabilities sum to 1. Words the model never saw are ignored, so text
    /// with no known words ranks by class priors alone.
    pub fn classify(&self, text: &str) -> Vec<Classification> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| self.vocabulary.contains(t))
            .collect();
        let vocab = self.vocabulary.len() as f64;

        let log_scores: Vec<(Category, f64)> = self
            .classes
            .iter()
            .map(|(category, stats)| {
                let prior = (stats.documents as f64 / self.total_documents as f64).ln();
                let denominator = stats.total_tokens as f64 + SMOOTHING * vocab;
                let likelihood: f64 = tokens
                    .iter()
                    .map(|t| {
                        let count = stats.token_counts.get(t).copied().unwrap_or(0) as f64;
                        ((count + SMOOTHING) / denominator).ln()
                    })
                    .sum();
                (*category, prior + likelihood)
            })
            .collect();

        let max = log_scores
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let norm: f64 = log_scores.iter().map(|(_, s)| (s - max).exp()).sum();

        let mut ranked: Vec<Classification> = log_scores
            .into_iter()
            .map(|(category, s)| Classification {
                category,
                confidence: (s - max).exp() / norm,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        ranked
    }

    /// Assign a category to an utterance and its description
    ///
    /// Classifies the two combined; a top confidence below `min_confidence`
    /// is reported as `Category::Other` with that same confidence.
    pub fn categorize(
        &self,
        utterance: &str,
        description: &str,
        min_confidence: f64,
    ) -> Classification {
        let combined = format!("{} {}", utterance, description).to_lowercase();
        let top = self.classify(&combined).into_iter().next();

        match top {
            Some(c) if c.confidence >= min_confidence => c,
            Some(c) => {
                debug!(
                    category = %c.category,
                    confidence = c.confidence,
                    "Low classifier confidence, using other"
                );
                Classification {
                    category: Category::Other,
                    confidence: c.confidence,
                }
            }
            None => Classification {
                category: Category::Other,
                confidence: 0.0,
            },
        }
    }
}
