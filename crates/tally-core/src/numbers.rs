//! Number recognition helpers
//!
//! Speech-to-text often spells amounts out ("six hundred eighty yen"), so the
//! extractor and the resolvers need to read English number words as well as
//! digit groups with thousands separators.

/// A whitespace-delimited word with its byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Word<'a> {
    /// Word with trailing punctuation removed
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split text into words, keeping byte offsets and dropping trailing punctuation
pub(crate) fn split_words(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut end = start;
        while let Some(&(i, ch)) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            end = i + ch.len_utf8();
            chars.next();
        }
        let raw = &text[start..end];
        let trimmed =
            raw.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'));
        if !trimmed.is_empty() {
            words.push(Word {
                text: trimmed,
                start,
                end: start + trimmed.len(),
            });
        }
    }
    words
}

const ONES: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

const TENS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const MAGNITUDES: &[(&str, u64)] = &[
    ("thousand", 1_000),
    ("million", 1_000_000),
    ("billion", 1_000_000_000),
];

fn ones(w: &str) -> Option<u64> {
    ONES.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

fn tens(w: &str) -> Option<u64> {
    TENS.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

fn magnitude(w: &str) -> Option<u64> {
    MAGNITUDES.iter().find(|(name, _)| *name == w).map(|(_, v)| *v)
}

/// "twenty-three"
fn hyphenated(w: &str) -> Option<u64> {
    let (left, right) = w.split_once('-')?;
    let t = tens(left)?;
    let o = ones(right)?;
    (1..=9).contains(&o).then_some(t + o)
}

/// Check if a word can start or continue a spelled-out number
pub(crate) fn is_number_word(w: &str) -> bool {
    ones(w).is_some()
        || tens(w).is_some()
        || hyphenated(w).is_some()
        || w == "hundred"
        || magnitude(w).is_some()
}

/// Parse a value below one hundred starting at `i`
/// Returns (value, words_consumed)
fn parse_small(words: &[&str], i: usize) -> Option<(u64, usize)> {
    let w = *words.get(i)?;
    if let Some(v) = hyphenated(w) {
        return Some((v, 1));
    }
    if let Some(t) = tens(w) {
        if let Some(o) = words.get(i + 1).and_then(|next| ones(next)) {
            if (1..=9).contains(&o) {
                return Some((t + o, 2));
            }
        }
        return Some((t, 1));
    }
    ones(w).map(|v| (v, 1))
}

/// "hundred" or a magnitude word
fn is_scale_word(w: &str) -> bool {
    w == "hundred" || magnitude(w).is_some()
}

/// Check if a run of words starting here can be a spelled-out number
///
/// Besides number words this accepts an article in front of a scale word
/// ("a thousand").
pub(crate) fn starts_spelled(words: &[&str]) -> bool {
    match words {
        [article, next, ..] if matches!(*article, "a" | "an") => is_scale_word(next),
        [first, ..] => is_number_word(first),
        [] => false,
    }
}

/// Parse a spelled-out number at the start of `words`
///
/// Handles "six hundred eighty", "twenty five", "two thousand and fifty".
/// A leading scale word counts once ("a thousand", "hundred"). Consecutive
/// small numbers without a magnitude in between ("seven eleven") are not
/// summed: parsing stops after the first one.
///
/// Returns (value, words_consumed)
pub(crate) fn parse_spelled(words: &[&str]) -> Option<(u64, usize)> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut i = 0;
    let mut found_any = false;
    let mut open_for_small = true;

    if let [article, next, ..] = words {
        if matches!(*article, "a" | "an") && is_scale_word(next) {
            current = 1;
            found_any = true;
            i = 1;
        }
    }

    while i < words.len() {
        let w = words[i];

        if w == "and" && found_any {
            match parse_small(words, i + 1) {
                Some(_) if open_for_small => {
                    i += 1;
                    continue;
                }
                _ => break,
            }
        }

        if w == "hundred" && !found_any {
            current = 100;
            found_any = true;
            i += 1;
            continue;
        }

        if w == "hundred" && current > 0 && current < 100 {
            current *= 100;
            open_for_small = true;
            i += 1;
            continue;
        }

        if let Some(m) = magnitude(w) {
            found_any = true;
            total += current.max(1) * m;
            current = 0;
            open_for_small = true;
            i += 1;
            continue;
        }

        if !open_for_small {
            break;
        }

        match parse_small(words, i) {
            Some((v, consumed)) => {
                found_any = true;
                current += v;
                i += consumed;
                open_for_small = false;
            }
            None => break,
        }
    }

    found_any.then_some((total + current, i))
}

/// Parse text that is entirely a spelled-out number
pub fn words_to_number(text: &str) -> Option<f64> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    match parse_spelled(&words) {
        Some((value, consumed)) if consumed == words.len() => Some(value as f64),
        _ => None,
    }
}

/// Parse a digit amount, ignoring thousands separators
///
/// Returns `None` for anything that is not a finite, non-negative number.
pub fn parse_digits(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse an amount span, either digits or spelled-out words
pub fn parse_amount(text: &str) -> Option<f64> {
    parse_digits(text).or_else(|| words_to_number(&text.to_lowercase()))
}
