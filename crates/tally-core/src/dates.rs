//! Date expression recognition and resolution
//!
//! Finds absolute ("march 3rd", "2024-03-03", "3/3") and relative
//! ("yesterday", "last week", "3 days ago", "last friday") date phrases in
//! case-folded text and resolves them against the processing date.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entities::CURRENCY_WORDS;
use crate::numbers;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

const ORDINALS: &[(&str, u32)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
    ("twentieth", 20),
    ("thirtieth", 30),
];

/// Alternation matching ordinal day words, compounds first
fn ordinal_pattern() -> String {
    let simple: Vec<&str> = ORDINALS.iter().map(|(name, _)| *name).collect();
    let units = simple[..9].join("|");
    format!("(?:twenty|thirty)[- ](?:{})|{}", units, simple.join("|"))
}

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?P<month>{months})\.?\s+(?:the\s+)?(?:(?P<dnum>\d{{1,2}})(?:st|nd|rd|th)?|(?P<dword>{ord}))\b(?P<yearpart>,\s*(?P<year>(?:19|20)\d{{2}})\b)?",
        months = MONTHS,
        ord = ordinal_pattern()
    ))
    .expect("valid regex")
});

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:the\s+)?(?:(?P<dnum>\d{{1,2}})(?:st|nd|rd|th)?|(?P<dword>{ord}))\s+(?:of\s+)?(?P<month>{months})\b(?P<yearpart>,\s*(?P<year>(?:19|20)\d{{2}})\b)?",
        months = MONTHS,
        ord = ordinal_pattern()
    ))
    .expect("valid regex")
});

/// Currency marker right after a phrase ("march 3, 2000 yen")
static CURRENCY_AFTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s?(?:(?:{})\b|[$¥](?:\D|$))", CURRENCY_WORDS))
        .expect("valid regex")
});

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})\b").expect("valid regex")
});

static SLASH_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<month>\d{1,2})/(?P<day>\d{1,2})(?:/(?P<year>\d{4}|\d{2}))?\b")
        .expect("valid regex")
});

static RELATIVE_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<word>(?:the\s+)?day\s+before\s+yesterday|yesterday|today|tonight|tomorrow|this\s+(?:morning|afternoon|evening))\b",
    )
    .expect("valid regex")
});

static AGO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<count>\d+|a\s+couple\s+of|a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\s+(?P<unit>day|week|month)s?\s+ago\b",
    )
    .expect("valid regex")
});

static LAST_PERIOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:last|past|previous)\s+(?P<unit>week|month)\b").expect("valid regex")
});

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<prefix>last\s+|on\s+|this\s+past\s+)?(?P<day>monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("valid regex")
});

/// What a date phrase means, before it is pinned to a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateExpr {
    /// Offset in days from the processing date (negative = past)
    DayOffset(i64),
    DaysAgo(u64),
    WeeksAgo(u64),
    MonthsAgo(u32),
    /// Monday of the previous week
    LastWeek,
    /// First day of the previous month
    LastMonth,
    /// Most recent such weekday; `strict` skips today
    Weekday { day: Weekday, strict: bool },
    Calendar {
        year: Option<i32>,
        month: u32,
        day: u32,
    },
}

/// A date phrase found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMention {
    /// Matched text as it appears in the (case-folded) input
    pub text: String,
    pub start: usize,
    pub end: usize,
    expr: DateExpr,
}

impl DateMention {
    /// Pin the phrase to a calendar date relative to `today`
    ///
    /// Returns `None` when the phrase names an impossible date ("february 30")
    /// or the arithmetic leaves chrono's supported range.
    pub fn resolve(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self.expr {
            DateExpr::DayOffset(offset) if offset >= 0 => {
                today.checked_add_days(Days::new(offset as u64))
            }
            DateExpr::DayOffset(offset) => today.checked_sub_days(Days::new(offset.unsigned_abs())),
            DateExpr::DaysAgo(n) => today.checked_sub_days(Days::new(n)),
            DateExpr::WeeksAgo(n) => today.checked_sub_days(Days::new(n.checked_mul(7)?)),
            DateExpr::MonthsAgo(n) => today.checked_sub_months(Months::new(n)),
            DateExpr::LastWeek => {
                let since_monday = u64::from(today.weekday().num_days_from_monday());
                today.checked_sub_days(Days::new(since_monday + 7))
            }
            DateExpr::LastMonth => today
                .with_day(1)?
                .checked_sub_months(Months::new(1)),
            DateExpr::Weekday { day, strict } => {
                let diff = (i64::from(today.weekday().num_days_from_monday())
                    - i64::from(day.num_days_from_monday()))
                .rem_euclid(7);
                let diff = if strict && diff == 0 { 7 } else { diff };
                today.checked_sub_days(Days::new(diff as u64))
            }
            DateExpr::Calendar { year, month, day } => {
                NaiveDate::from_ymd_opt(year.unwrap_or_else(|| today.year()), month, day)
            }
        }
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ordinal_day(word: &str) -> Option<u32> {
    let normalized = word.replace('-', " ");
    let mut parts = normalized.split_whitespace();
    let first = parts.next()?;
    let lookup = |w: &str| ORDINALS.iter().find(|(name, _)| *name == w).map(|(_, v)| *v);
    match parts.next() {
        None => lookup(first),
        Some(unit) => {
            let tens = match first {
                "twenty" => 20,
                "thirty" => 30,
                _ => return None,
            };
            lookup(unit).filter(|u| *u < 10).map(|u| tens + u)
        }
    }
}

fn weekday(name: &str) -> Option<Weekday> {
    name.parse::<Weekday>().ok()
}

fn calendar_from(caps: &Captures<'_>) -> Option<DateExpr> {
    let month = month_number(caps.name("month")?.as_str())?;
    let day = match (caps.name("dnum"), caps.name("dword")) {
        (Some(d), _) => d.as_str().parse().ok()?,
        (None, Some(w)) => ordinal_day(w.as_str())?,
        _ => return None,
    };
    let year = caps.name("year").and_then(|y| y.as_str().parse().ok());
    Some(DateExpr::Calendar { year, month, day })
}

fn numeric_from(caps: &Captures<'_>) -> Option<DateExpr> {
    let month = caps.name("month")?.as_str().parse().ok()?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let year = match caps.name("year") {
        Some(y) if y.as_str().len() == 2 => Some(2000 + y.as_str().parse::<i32>().ok()?),
        Some(y) => Some(y.as_str().parse().ok()?),
        None => None,
    };
    Some(DateExpr::Calendar { year, month, day })
}

fn relative_from(caps: &Captures<'_>) -> Option<DateExpr> {
    let word = caps.name("word")?.as_str();
    let offset = if word.contains("before") {
        -2
    } else if word == "yesterday" {
        -1
    } else if word == "tomorrow" {
        1
    } else {
        0
    };
    Some(DateExpr::DayOffset(offset))
}

fn ago_from(caps: &Captures<'_>) -> Option<DateExpr> {
    let count = caps.name("count")?.as_str();
    let n: u64 = match count {
        "a" | "an" => 1,
        c if c.starts_with("a couple") => 2,
        c => c
            .parse()
            .ok()
            .or_else(|| numbers::words_to_number(c).map(|v| v as u64))?,
    };
    match caps.name("unit")?.as_str() {
        "day" => Some(DateExpr::DaysAgo(n)),
        "week" => Some(DateExpr::WeeksAgo(n)),
        _ => u32::try_from(n).ok().map(DateExpr::MonthsAgo),
    }
}

fn last_period_from(caps: &Captures<'_>) -> Option<DateExpr> {
    match caps.name("unit")?.as_str() {
        "week" => Some(DateExpr::LastWeek),
        _ => Some(DateExpr::LastMonth),
    }
}

fn weekday_from(caps: &Captures<'_>) -> Option<DateExpr> {
    let day = weekday(caps.name("day")?.as_str())?;
    let strict = caps
        .name("prefix")
        .map(|p| p.as_str().trim_start().starts_with("last") || p.as_str().contains("past"))
        .unwrap_or(false);
    Some(DateExpr::Weekday { day, strict })
}

type Recognizer = (&'static Lazy<Regex>, fn(&Captures<'_>) -> Option<DateExpr>);

static RECOGNIZERS: [Recognizer; 8] = [
    (&MONTH_DAY, calendar_from),
    (&DAY_MONTH, calendar_from),
    (&ISO_DATE, numeric_from),
    (&SLASH_DATE, numeric_from),
    (&RELATIVE_DAY, relative_from),
    (&AGO, ago_from),
    (&LAST_PERIOD, last_period_from),
    (&WEEKDAY, weekday_from),
];

/// Find date phrases in case-folded text, in order of appearance
///
/// When phrases overlap, the one starting first wins, then the longer one.
pub fn find_dates(lowered: &str) -> Vec<DateMention> {
    let mut found: Vec<DateMention> = Vec::new();
    for (re, build) in RECOGNIZERS.iter() {
        for caps in re.captures_iter(lowered) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(mut expr) = build(&caps) else { continue };
            let mut end = whole.end();
            // A trailing year that is really an amount ("march 3, 2000 yen")
            if let (Some(part), DateExpr::Calendar { month, day, .. }) =
                (caps.name("yearpart"), expr)
            {
                if CURRENCY_AFTER.is_match(&lowered[end..]) {
                    expr = DateExpr::Calendar {
                        year: None,
                        month,
                        day,
                    };
                    end = part.start();
                }
            }
            found.push(DateMention {
                text: lowered[whole.start()..end].to_string(),
                start: whole.start(),
                end,
                expr,
            });
        }
    }

    found.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
    });

    let mut mentions: Vec<DateMention> = Vec::with_capacity(found.len());
    for mention in found {
        if mentions.last().map_or(true, |last| mention.start >= last.end) {
            mentions.push(mention);
        }
    }
    mentions
}

/// Resolve the spending date of an utterance
///
/// Re-scans the text for date phrases and returns the first one that pins to a
/// valid calendar date; with none, the spending happened `today`.
pub fn resolve_date(text: &str, today: NaiveDate) -> NaiveDate {
    find_dates(&text.to_lowercase())
        .iter()
        .find_map(|mention| mention.resolve(today))
        .unwrap_or(today)
}
