//! Entity extraction for spending utterances
//!
//! Each entity type has its own recognizer and they run independently over the
//! case-folded utterance. A recognizer that finds nothing leaves its list
//! empty; none of them can fail.
//!
//! Brands and places come from small gazetteers, so they are reported with
//! the gazetteer's display casing ("Doutor", "Tokyo") rather than the folded
//! text. Venues introduced with "at" that are not in the gazetteer are
//! reported title-cased.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dates;
use crate::models::ExtractedEntities;
use crate::numbers::{self, Word};

/// Currency words recognized after a number ("680 yen") or on their own
pub(crate) const CURRENCY_WORDS: &str = "yen|jpy|dollars|dollar|usd|bucks|rupiahs|rupiah|idr|rp";

/// Businesses and brands: (display name, aliases in folded form)
const ORGANIZATIONS: &[(&str, &[&str])] = &[
    ("Starbucks", &["starbucks"]),
    ("Doutor", &["doutor"]),
    ("Tully's", &["tully's", "tullys"]),
    ("Blue Bottle", &["blue bottle"]),
    ("Komeda", &["komeda"]),
    ("Walmart", &["walmart"]),
    ("Costco", &["costco"]),
    ("Target", &["target"]),
    ("Whole Foods", &["whole foods"]),
    ("Trader Joe's", &["trader joe's", "trader joes"]),
    ("Aeon", &["aeon"]),
    ("7-Eleven", &["7-eleven", "seven eleven", "seven-eleven", "7 eleven"]),
    ("Lawson", &["lawson"]),
    ("FamilyMart", &["familymart", "family mart"]),
    ("Indomaret", &["indomaret"]),
    ("Alfamart", &["alfamart"]),
    ("McDonald's", &["mcdonald's", "mcdonalds", "mcdonald"]),
    ("Burger King", &["burger king"]),
    ("KFC", &["kfc"]),
    ("Yoshinoya", &["yoshinoya"]),
    ("Sukiya", &["sukiya"]),
    ("Amazon", &["amazon"]),
    ("eBay", &["ebay"]),
    ("Uniqlo", &["uniqlo"]),
    ("Daiso", &["daiso"]),
    ("Ikea", &["ikea"]),
    ("Uber", &["uber"]),
    ("Lyft", &["lyft"]),
    ("Grab", &["grab"]),
    ("Gojek", &["gojek"]),
    ("Netflix", &["netflix"]),
    ("Spotify", &["spotify"]),
    ("YouTube", &["youtube"]),
    ("Steam", &["steam"]),
    ("Matsumoto Kiyoshi", &["matsumoto kiyoshi", "matsukiyo"]),
    ("CVS", &["cvs"]),
    ("Walgreens", &["walgreens"]),
    ("Kinokuniya", &["kinokuniya"]),
    ("Udemy", &["udemy"]),
    ("Coursera", &["coursera"]),
];

/// Geographic locations: (display name, aliases in folded form)
const PLACES: &[(&str, &[&str])] = &[
    ("Tokyo", &["tokyo"]),
    ("Shibuya", &["shibuya"]),
    ("Shinjuku", &["shinjuku"]),
    ("Ginza", &["ginza"]),
    ("Akihabara", &["akihabara"]),
    ("Harajuku", &["harajuku"]),
    ("Ikebukuro", &["ikebukuro"]),
    ("Roppongi", &["roppongi"]),
    ("Yokohama", &["yokohama"]),
    ("Osaka", &["osaka"]),
    ("Kyoto", &["kyoto"]),
    ("Nagoya", &["nagoya"]),
    ("Sapporo", &["sapporo"]),
    ("Fukuoka", &["fukuoka"]),
    ("Kobe", &["kobe"]),
    ("Jakarta", &["jakarta"]),
    ("Bandung", &["bandung"]),
    ("Surabaya", &["surabaya"]),
    ("Yogyakarta", &["yogyakarta", "jogja"]),
    ("Bali", &["bali"]),
    ("Singapore", &["singapore"]),
    ("Seoul", &["seoul"]),
    ("New York", &["new york", "nyc"]),
    ("San Francisco", &["san francisco"]),
    ("Los Angeles", &["los angeles"]),
    ("Seattle", &["seattle"]),
    ("Chicago", &["chicago"]),
    ("Boston", &["boston"]),
    ("London", &["london"]),
    ("Paris", &["paris"]),
    ("Japan", &["japan"]),
    ("Indonesia", &["indonesia"]),
];

/// Words that end a venue name introduced by "at"
const VENUE_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "in", "into", "it", "my", "of", "on", "or",
    "the", "this", "that", "to", "with", "was", "is", "i", "we", "me", "so", "but", "then",
    "about", "around", "after", "before", "last", "today", "tonight", "yesterday", "tomorrow",
    "ago", "morning", "afternoon", "evening", "night", "noon", "midnight",
];

/// Words after "at" that describe a time or a generic spot, not a venue
const NOT_VENUES: &[&str] = &[
    "home", "work", "school", "office", "lunch", "lunchtime", "dinner", "breakfast", "least",
    "most", "once", "all", "first",
];

static DIGIT_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d[\d,]*(?:\.\d+)?\b").expect("valid regex"));

static CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{})\b|[$¥]", CURRENCY_WORDS)).expect("valid regex")
});

/// "$25", "¥ 680", "usd 10"
static PREFIX_MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[$¥]|\b(?:usd|jpy|idr|rp)\.?)\s?\d[\d,]*(?:\.\d+)?\b").expect("valid regex")
});

/// "680 yen", "25 dollars", "25$"
static SUFFIX_MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b\d[\d,]*(?:\.\d+)?\s?(?:(?:{})\b|[$¥])",
        CURRENCY_WORDS
    ))
    .expect("valid regex")
});

/// Alias lookup compiled into one alternation, longest alias first
struct Gazetteer {
    pattern: Regex,
    display: HashMap<&'static str, &'static str>,
}

impl Gazetteer {
    fn new(entries: &[(&'static str, &'static [&'static str])]) -> Self {
        let mut aliases: Vec<&'static str> = Vec::new();
        let mut display = HashMap::new();
        for (name, names) in entries {
            for alias in names.iter() {
                aliases.push(*alias);
                display.insert(*alias, *name);
            }
        }
        aliases.sort_by_key(|a| std::cmp::Reverse(a.len()));
        let alternation = aliases
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("valid regex");
        Self { pattern, display }
    }

    fn find(&self, lowered: &str) -> Vec<Span> {
        self.pattern
            .find_iter(lowered)
            .filter_map(|m| {
                self.display.get(m.as_str()).map(|name| Span {
                    start: m.start(),
                    end: m.end(),
                    text: name.to_string(),
                })
            })
            .collect()
    }
}

static ORGANIZATION_GAZETTEER: Lazy<Gazetteer> = Lazy::new(|| Gazetteer::new(ORGANIZATIONS));
static PLACE_GAZETTEER: Lazy<Gazetteer> = Lazy::new(|| Gazetteer::new(PLACES));

/// A recognized piece of text with its byte range in the folded utterance
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    text: String,
}

impl Span {
    fn from_range(lowered: &str, start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: lowered[start..end].to_string(),
        }
    }

    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn overlaps_any(&self, others: &[Span]) -> bool {
        others.iter().any(|o| self.overlaps(o))
    }
}

fn texts(mut spans: Vec<Span>) -> Vec<String> {
    spans.sort_by_key(|s| s.start);
    spans.into_iter().map(|s| s.text).collect()
}

fn is_currency_word(word: &str) -> bool {
    CURRENCY_WORDS.split('|').any(|c| c == word)
}

/// Runs of spelled-out number words, as (first word index, word count)
fn spelled_runs(words: &[Word<'_>]) -> Vec<(usize, usize)> {
    let texts: Vec<&str> = words.iter().map(|w| w.text).collect();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < texts.len() {
        if numbers::starts_spelled(&texts[i..]) {
            if let Some((_, consumed)) = numbers::parse_spelled(&texts[i..]) {
                runs.push((i, consumed));
                i += consumed;
                continue;
            }
        }
        i += 1;
    }
    runs
}

fn find_amounts(
    lowered: &str,
    words: &[Word<'_>],
    runs: &[(usize, usize)],
    excluded: &[Span],
) -> Vec<Span> {
    let mut spans: Vec<Span> = DIGIT_AMOUNT
        .find_iter(lowered)
        .map(|m| Span::from_range(lowered, m.start(), m.end()))
        .collect();
    spans.extend(
        runs.iter()
            .map(|&(i, n)| Span::from_range(lowered, words[i].start, words[i + n - 1].end)),
    );
    spans.retain(|s| !s.overlaps_any(excluded));
    spans
}

fn find_currencies(lowered: &str) -> Vec<Span> {
    CURRENCY
        .find_iter(lowered)
        .map(|m| Span::from_range(lowered, m.start(), m.end()))
        .collect()
}

fn find_money(
    lowered: &str,
    words: &[Word<'_>],
    runs: &[(usize, usize)],
    excluded: &[Span],
) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for m in PREFIX_MONEY
        .find_iter(lowered)
        .chain(SUFFIX_MONEY.find_iter(lowered))
    {
        let span = Span::from_range(lowered, m.start(), m.end());
        if !span.overlaps_any(&spans) {
            spans.push(span);
        }
    }

    // "twenty five dollars"
    for &(i, n) in runs {
        let Some(next) = words.get(i + n) else { continue };
        if is_currency_word(next.text) {
            let span = Span::from_range(lowered, words[i].start, next.end);
            if !span.overlaps_any(&spans) {
                spans.push(span);
            }
        }
    }

    spans.retain(|s| !s.overlaps_any(excluded));
    spans
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Venue names after "at" that no gazetteer knows ("at blue moon diner")
///
/// Takes up to three name-like words and stops at stop words, numbers, and
/// currency words.
fn find_venues(words: &[Word<'_>], lowered: &str, known: &[Span]) -> Vec<Span> {
    let mut spans = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if word.text != "at" {
            continue;
        }
        // "at the station" names a generic spot
        let first = i + 1;
        if words.get(first).map(|w| w.text) == Some("the") {
            continue;
        }
        let mut j = first;
        while j < words.len() && j - first < 3 {
            let w = words[j].text;
            let is_name_word = w.chars().next().is_some_and(|c| c.is_alphabetic())
                && w.chars().all(|c| c.is_alphabetic() || matches!(c, '\'' | '&' | '-'));
            if !is_name_word
                || VENUE_STOP_WORDS.contains(&w)
                || numbers::is_number_word(w)
                || is_currency_word(w)
            {
                break;
            }
            j += 1;
        }
        if j == first || NOT_VENUES.contains(&words[first].text) {
            continue;
        }
        let range = Span::from_range(lowered, words[first].start, words[j - 1].end);
        if range.overlaps_any(known) {
            continue;
        }
        spans.push(Span {
            text: title_case(&range.text),
            ..range
        });
    }
    spans
}

/// Extract typed entity spans from an utterance
///
/// The text is case-folded first; every list keeps first-occurrence order.
/// Numbers that belong to a date phrase ("march 3rd", "3 days ago") or to a
/// brand name ("7-eleven") are not reported as amounts or money.
pub fn extract_entities(text: &str) -> ExtractedEntities {
    let lowered = text.to_lowercase();
    let words = numbers::split_words(&lowered);

    let date_spans: Vec<Span> = dates::find_dates(&lowered)
        .into_iter()
        .map(|m| Span {
            start: m.start,
            end: m.end,
            text: m.text,
        })
        .collect();

    let organizations = ORGANIZATION_GAZETTEER.find(&lowered);
    let places = PLACE_GAZETTEER.find(&lowered);

    let mut not_numbers = date_spans.clone();
    not_numbers.extend(organizations.iter().cloned());

    let runs = spelled_runs(&words);
    let amounts = find_amounts(&lowered, &words, &runs, &not_numbers);
    let money = find_money(&lowered, &words, &runs, &not_numbers);
    let currencies = find_currencies(&lowered);

    let mut known = organizations.clone();
    known.extend(places.iter().cloned());
    let mut organizations = organizations;
    organizations.extend(find_venues(&words, &lowered, &known));

    let entities = ExtractedEntities {
        amounts: texts(amounts),
        currencies: texts(currencies),
        money: texts(money),
        places: texts(places),
        organizations: texts(organizations),
        dates: texts(date_spans),
    };

    debug!(?entities, "Extracted entities");
    entities
}
