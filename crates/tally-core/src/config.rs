//! Parser configuration
//!
//! Loaded from TOML. The default configuration is compiled into the binary;
//! users can override it by placing a `parser.toml` in
//! `~/.local/share/tally/config/` or by passing an explicit path.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::classifier::{CategoryModel, TrainingDocument, DEFAULT_MIN_CONFIDENCE};
use crate::confidence::ConfidenceWeights;
use crate::description::DescriptionPolicy;
use crate::error::{Error, Result};
use crate::models::{Category, Currency};

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/parser.toml");

/// Settings for a `SpendingParser`
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Currency used when an utterance names none
    pub default_currency: Currency,
    /// Classifier confidence below which the category becomes `other`
    pub min_confidence: f64,
    pub description_policy: DescriptionPolicy,
    pub weights: ConfidenceWeights,
    /// Replacement training corpus; `None` uses the built-in one
    pub training: Option<Vec<TrainingDocument>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            description_policy: DescriptionPolicy::default(),
            weights: ConfidenceWeights::default(),
            training: None,
        }
    }
}

impl ParserConfig {
    /// Load configuration (explicit path, then user override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (content, source) = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                (read_config(path)?, path.display().to_string())
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => (read_config(&path)?, path.display().to_string()),
                None => (DEFAULT_CONFIG.to_string(), "embedded".to_string()),
            },
        };

        debug!(source = %source, "Loading parser config");
        parse_config(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Classifier for this configuration
    ///
    /// Without a custom corpus this is the shared built-in model.
    pub fn build_model(&self) -> Result<Arc<CategoryModel>> {
        match &self.training {
            Some(documents) => Ok(Arc::new(CategoryModel::train(documents)?)),
            None => Ok(CategoryModel::builtin()),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("parser.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    currency: Option<RawCurrency>,
    classifier: Option<RawClassifier>,
    description: Option<RawDescription>,
    confidence: Option<RawConfidence>,
    training: Option<Vec<RawTraining>>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    min_confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDescription {
    policy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    amount: Option<f64>,
    description: Option<f64>,
    location: Option<f64>,
    date: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTraining {
    category: String,
    documents: Vec<String>,
}

fn parse_config(content: &str) -> Result<ParserConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ParserConfig::default();

    if let Some(code) = raw.currency.and_then(|c| c.default) {
        config.default_currency = code.parse().map_err(Error::Config)?;
    }

    if let Some(min) = raw.classifier.and_then(|c| c.min_confidence) {
        if !(0.0..=1.0).contains(&min) {
            return Err(Error::Config(format!(
                "classifier.min_confidence must be between 0 and 1, got {}",
                min
            )));
        }
        config.min_confidence = min;
    }

    if let Some(policy) = raw.description.and_then(|d| d.policy) {
        config.description_policy = policy.parse().map_err(Error::Config)?;
    }

    if let Some(confidence) = raw.confidence {
        let weights = &mut config.weights;
        for (slot, value) in [
            (&mut weights.amount, confidence.amount),
            (&mut weights.description, confidence.description),
            (&mut weights.location, confidence.location),
            (&mut weights.date, confidence.date),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::Config(format!(
                        "confidence weights must be finite and not negative, got {}",
                        value
                    )));
                }
                *slot = value;
            }
        }
    }

    if let Some(sections) = raw.training {
        let mut documents = Vec::new();
        for section in sections {
            let category: Category = section.category.parse().map_err(Error::Config)?;
            documents.extend(
                section
                    .documents
                    .into_iter()
                    .map(|text| TrainingDocument::new(category, text)),
            );
        }
        if documents.is_empty() {
            return Err(Error::Config(
                "[[training]] sections contain no documents".into(),
            ));
        }
        config.training = Some(documents);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.default_currency, Currency::Usd);
        assert_eq!(config.min_confidence, 0.3);
        assert_eq!(config.description_policy, DescriptionPolicy::Verbatim);
        assert_eq!(config.weights, ConfidenceWeights::default());
        assert!(config.training.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), ParserConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
[currency]
default = "JPY"

[description]
policy = "condensed"

[confidence]
date = 0.0
"#,
        )
        .unwrap();
        assert_eq!(config.default_currency, Currency::Jpy);
        assert_eq!(config.description_policy, DescriptionPolicy::Condensed);
        assert_eq!(config.weights.date, 0.0);
        assert_eq!(config.weights.amount, 0.4);
        assert_eq!(config.min_confidence, DEFAULT_MIN_CONFIDENCE);
    }

    #[test]
    fn test_training_sections() {
        let config = parse_config(
            r#"
[[training]]
category = "coffee"
documents = ["kopi susu", "kopi tubruk"]

[[training]]
category = "transportation"
documents = ["ojek angkot"]
"#,
        )
        .unwrap();
        let training = config.training.as_ref().unwrap();
        assert_eq!(training.len(), 3);
        assert_eq!(training[2].category, Category::Transportation);

        let model = config.build_model().unwrap();
        assert_eq!(model.categories().count(), 2);
    }

    #[test]
    fn test_invalid_values() {
        let err = parse_config("[currency]\ndefault = \"EUR\"").unwrap_err();
        assert!(err.to_string().contains("EUR"));

        assert!(parse_config("[classifier]\nmin_confidence = 1.5").is_err());
        assert!(parse_config("[confidence]\namount = -0.1").is_err());
        assert!(parse_config("[confidence]\namount = nan").is_err());
        assert!(parse_config("[confidence]\ndate = inf").is_err());
        assert!(parse_config("[classifier]\nmin_confidence = nan").is_err());
        assert!(parse_config("[description]\npolicy = \"smart\"").is_err());
        assert!(parse_config("[[training]]\ncategory = \"pets\"\ndocuments = [\"dog food\"]").is_err());
        assert!(parse_config("[[training]]\ncategory = \"coffee\"\ndocuments = []").is_err());
        assert!(parse_config("[typo]\nx = 1").is_err());
        assert!(parse_config("not toml [").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[currency]\ndefault = \"IDR\"").unwrap();

        let config = ParserConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_currency, Currency::Idr);
    }

    #[test]
    fn test_load_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ParserConfig::load(Some(&missing)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("tally/config/parser.toml"));
        }
    }
}
