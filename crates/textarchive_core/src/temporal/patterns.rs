//! Ordered time/date notation tables.
//!
//! # Responsibility
//! - Recognize candidate date/time substrings in free-form text.
//! - Strip recognized notations to derive event descriptions.
//!
//! # Invariants
//! - Tables are tried strictly in declared order; the first notation that
//!   matches anywhere wins, even if a later notation matches further left.
//! - Returned substrings borrow from the input text.

use once_cell::sync::Lazy;
use regex::Regex;

/// One entry of a notation table.
pub struct Notation {
    /// Short stable name used in diagnostics.
    pub name: &'static str,
    regex: Regex,
}

impl Notation {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("valid temporal notation regex"),
        }
    }

    /// Returns the leftmost substring matched by this notation.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Time notations, highest priority first.
///
/// The hour-dot form absorbs an optional meridiem prefix so that the raw
/// substring carries the half-day marker into canonicalization.
pub static TIME_NOTATIONS: Lazy<Vec<Notation>> = Lazy::new(|| {
    vec![
        Notation::new("clock_colon", r"\d{1,2}[:：]\d{2}"),
        Notation::new("hour_dot", r"(?:上午|下午|晚上|早上)?\d{1,2}点\d{0,2}分?"),
        Notation::new("meridiem_hour_dot", r"(?:上午|下午|晚上|早上)\d{1,2}点"),
        Notation::new("hour_am_pm", r"\d{1,2}\s*(?:am|pm|AM|PM)"),
    ]
});

/// Date notations, highest priority first.
pub static DATE_NOTATIONS: Lazy<Vec<Notation>> = Lazy::new(|| {
    vec![
        Notation::new("full_date", r"\d{4}[-/年]\d{1,2}[-/月]\d{1,2}日?"),
        Notation::new("month_day", r"\d{1,2}[-/月]\d{1,2}日?"),
        Notation::new("relative_day", r"明天|后天|今天|昨天"),
        Notation::new("relative_period", r"下周|下月|本周|本月"),
        Notation::new("weekday", r"(?:周|星期)[一二三四五六日天]"),
    ]
});

/// Returns the raw time substring picked by notation rank.
pub fn find_time(text: &str) -> Option<&str> {
    first_by_rank(&TIME_NOTATIONS, text)
}

/// Returns the raw date substring picked by notation rank.
pub fn find_date(text: &str) -> Option<&str> {
    first_by_rank(&DATE_NOTATIONS, text)
}

pub fn has_time(text: &str) -> bool {
    TIME_NOTATIONS.iter().any(|notation| notation.is_match(text))
}

pub fn has_date(text: &str) -> bool {
    DATE_NOTATIONS.iter().any(|notation| notation.is_match(text))
}

/// Removes every time and date notation from `text` and trims the rest.
///
/// Time notations are removed before date notations, each table in order.
pub fn strip_temporal(text: &str) -> String {
    let mut remaining = text.to_string();
    for notation in TIME_NOTATIONS.iter().chain(DATE_NOTATIONS.iter()) {
        remaining = notation.regex.replace_all(&remaining, "").into_owned();
    }
    remaining.trim().to_string()
}

fn first_by_rank<'t>(notations: &[Notation], text: &'t str) -> Option<&'t str> {
    notations.iter().find_map(|notation| notation.find(text))
}
