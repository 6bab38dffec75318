//! Canonicalization of matched date/time substrings.
//!
//! # Responsibility
//! - Convert raw time notations into `HH:MM`.
//! - Convert raw date notations into `YYYY-MM-DD`, resolving relative words
//!   against the caller's `today` snapshot.
//!
//! # Invariants
//! - Unparseable or out-of-range input is a miss, never a panic.
//! - Misses are logged with metadata only; the raw text is not logged.
//! - Relative resolution depends only on the `today` argument.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits regex"));
static SLASH_DASH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})").expect("valid full date regex")
});
static CJK_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})年").expect("valid year regex"));
static CJK_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})月").expect("valid month regex"));
static CJK_DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})日").expect("valid day regex"));
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/月](\d{1,2})").expect("valid month-day regex")
});

const AFTERNOON_MARKERS: &[&str] = &["下午", "晚上"];
const MORNING_MARKERS: &[&str] = &["上午", "早上"];

/// Relative single-day words and their offset from `today`.
const RELATIVE_DAYS: &[(&str, i64)] = &[("今天", 0), ("明天", 1), ("后天", 2), ("昨天", -1)];

/// Which table a missed substring came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Time,
    Date,
}

impl TemporalKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Date => "date",
        }
    }
}

/// A notation matched but could not be canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationMiss {
    pub kind: TemporalKind,
    pub raw: String,
}

impl NormalizationMiss {
    fn new(kind: TemporalKind, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
        }
    }
}

impl Display for NormalizationMiss {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot canonicalize {} notation `{}`", self.kind.as_str(), self.raw)
    }
}

impl Error for NormalizationMiss {}

/// Canonicalizes a raw time notation to `HH:MM`, or `None` on a miss.
pub fn normalize_time(raw: &str) -> Option<String> {
    try_normalize_time(raw).map_err(log_miss).ok()
}

/// Canonicalizes a raw date notation to `YYYY-MM-DD`, or `None` on a miss.
pub fn normalize_date(raw: &str, today: NaiveDate) -> Option<String> {
    try_normalize_date(raw, today).map_err(log_miss).ok()
}

/// Canonicalizes a raw time notation, reporting the miss explicitly.
///
/// Rules:
/// - `H:MM` / `H：MM` -> zero-padded.
/// - `H点[M分]` -> `下午`/`晚上` add 12 below noon; `上午`/`早上` map 12 to 0.
/// - `H am|pm` -> `pm` adds 12 below noon; `am` maps 12 to 0; minute is 0.
pub fn try_normalize_time(raw: &str) -> Result<String, NormalizationMiss> {
    let miss = || NormalizationMiss::new(TemporalKind::Time, raw);
    let (hour, minute) = parse_clock(raw).ok_or_else(miss)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(|time| time.format("%H:%M").to_string())
        .ok_or_else(miss)
}

/// Canonicalizes a raw date notation, reporting the miss explicitly.
///
/// Relative-period and weekday words have no canonical form and always miss.
pub fn try_normalize_date(raw: &str, today: NaiveDate) -> Result<String, NormalizationMiss> {
    let miss = || NormalizationMiss::new(TemporalKind::Date, raw);
    let date = resolve_date(raw, today).ok_or_else(miss)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn parse_clock(raw: &str) -> Option<(u32, u32)> {
    if raw.contains(':') || raw.contains('：') {
        let unified = raw.replace('：', ":");
        let (hour, minute) = unified.split_once(':')?;
        return Some((first_number(hour)?, first_number(minute)?));
    }

    if let Some((before, after)) = raw.split_once('点') {
        let mut hour = first_number(before)?;
        let minute = match DIGITS_RE.find(after) {
            Some(digits) => digits.as_str().parse().ok()?,
            None => 0,
        };
        if contains_any(raw, AFTERNOON_MARKERS) {
            if hour < 12 {
                hour += 12;
            }
        } else if contains_any(raw, MORNING_MARKERS) && hour == 12 {
            hour = 0;
        }
        return Some((hour, minute));
    }

    let lowered = raw.to_lowercase();
    if lowered.contains("pm") {
        let hour = first_number(raw)?;
        return Some((if hour < 12 { hour + 12 } else { hour }, 0));
    }
    if lowered.contains("am") {
        let hour = first_number(raw)?;
        return Some((if hour == 12 { 0 } else { hour }, 0));
    }

    None
}

fn resolve_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(offset) = RELATIVE_DAYS
        .iter()
        .find(|(word, _)| raw.contains(word))
        .map(|(_, offset)| *offset)
    {
        return shift_days(today, offset);
    }

    if let Some(caps) = SLASH_DASH_DATE_RE.captures(raw) {
        return ymd(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }

    if raw.contains('年') && raw.contains('月') {
        let year = CJK_YEAR_RE.captures(raw)?[1].parse().ok()?;
        let month = CJK_MONTH_RE.captures(raw)?[1].parse().ok()?;
        let day = match CJK_DAY_RE.captures(raw) {
            Some(caps) => caps[1].parse().ok()?,
            None => 1,
        };
        return ymd(year, month, day);
    }

    if let Some(caps) = MONTH_DAY_RE.captures(raw) {
        return ymd(today.year(), caps[1].parse().ok()?, caps[2].parse().ok()?);
    }

    None
}

fn shift_days(today: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        today.checked_add_days(magnitude)
    } else {
        today.checked_sub_days(magnitude)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn first_number(value: &str) -> Option<u32> {
    DIGITS_RE.find(value)?.as_str().parse().ok()
}

fn contains_any(value: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| value.contains(needle))
}

fn log_miss(miss: NormalizationMiss) -> NormalizationMiss {
    warn!(
        "event=normalize_miss module=temporal status=degraded kind={} raw_chars={}",
        miss.kind.as_str(),
        miss.raw.chars().count()
    );
    miss
}
