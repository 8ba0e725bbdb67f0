//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Spending category assigned to an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Hobby,
    Transportation,
    Entertainment,
    Utilities,
    Dining,
    Shopping,
    Health,
    Education,
    Coffee,
    /// Catch-all for anything the classifier is not confident about
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Hobby => "hobby",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Dining => "dining",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Education => "education",
            Self::Coffee => "coffee",
            Self::Other => "other",
        }
    }

    /// Human-readable label for the UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Hobby => "Hobby",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Dining => "Dining",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Coffee => "Coffee",
            Self::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Groceries => "🛒",
            Self::Hobby => "🎨",
            Self::Transportation => "🚗",
            Self::Entertainment => "🎬",
            Self::Utilities => "⚡",
            Self::Dining => "🍽️",
            Self::Shopping => "🛍️",
            Self::Health => "🏥",
            Self::Education => "📚",
            Self::Coffee => "☕",
            Self::Other => "📝",
        }
    }

    /// Get all categories, in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Hobby,
            Self::Transportation,
            Self::Entertainment,
            Self::Utilities,
            Self::Dining,
            Self::Shopping,
            Self::Health,
            Self::Education,
            Self::Coffee,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" | "grocery" => Ok(Self::Groceries),
            "hobby" => Ok(Self::Hobby),
            "transportation" | "transport" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" => Ok(Self::Utilities),
            "dining" => Ok(Self::Dining),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "education" => Ok(Self::Education),
            "coffee" => Ok(Self::Coffee),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Currency code of a spending amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Jpy,
    Idr,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Jpy => "JPY",
            Self::Idr => "IDR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Jpy => "Japanese Yen",
            Self::Idr => "Indonesian Rupiah",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Jpy => "¥",
            Self::Idr => "Rp",
        }
    }

    pub fn all() -> &'static [Currency] {
        &[Self::Usd, Self::Jpy, Self::Idr]
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "JPY" => Ok(Self::Jpy),
            "IDR" => Ok(Self::Idr),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed spans pulled out of an utterance
///
/// Each list is filled by an independent recognizer and keeps the order in
/// which spans first appear in the text. Nothing is deduplicated, and the same
/// number may show up both in `amounts` and inside a `money` span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Bare numbers ("680", "25.50", "twenty five")
    pub amounts: Vec<String>,
    /// Currency words and symbols ("yen", "$")
    pub currencies: Vec<String>,
    /// Number coupled with a currency marker ("680 yen", "$25")
    pub money: Vec<String>,
    /// Geographic locations
    pub places: Vec<String>,
    /// Businesses and brands
    pub organizations: Vec<String>,
    /// Absolute and relative date expressions
    pub dates: Vec<String>,
}

impl ExtractedEntities {
    /// Check if nothing at all was recognized
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
            && self.currencies.is_empty()
            && self.money.is_empty()
            && self.places.is_empty()
            && self.organizations.is_empty()
            && self.dates.is_empty()
    }

    /// First place, else first organization
    pub fn primary_location(&self) -> Option<&str> {
        self.places
            .first()
            .or_else(|| self.organizations.first())
            .map(String::as_str)
    }
}

/// Result of parsing one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSpending {
    pub amount: f64,
    pub currency: Currency,
    pub category: Category,
    pub description: String,
    /// Empty when no place or organization was recognized
    pub location: String,
    pub date: NaiveDate,
    /// Advisory score in [0, 1]
    pub confidence: f64,
    /// When parsing happened
    pub timestamp: DateTime<Utc>,
}

/// Category entry for option listings
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub value: Category,
    pub label: &'static str,
    pub emoji: &'static str,
}

impl From<Category> for CategoryOption {
    fn from(category: Category) -> Self {
        Self {
            value: category,
            label: category.label(),
            emoji: category.emoji(),
        }
    }
}

/// Currency entry for option listings
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyOption {
    pub value: Currency,
    pub label: &'static str,
    pub symbol: &'static str,
}

impl From<Currency> for CurrencyOption {
    fn from(currency: Currency) -> Self {
        Self {
            value: currency,
            label: currency.label(),
            symbol: currency.symbol(),
        }
    }
}
