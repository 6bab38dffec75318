//! Deterministic signal-weighted classifier.
//!
//! # Responsibility
//! - Score how event-like and how note-like a text is.
//! - Pick a category when the remote classifier is unavailable.
//!
//! # Invariants
//! - Pure: the same text always yields the same scores.
//! - Both scores stay within `[0, 1]`.
//! - Ties resolve to `Category::Note`.

use crate::model::classification::Category;
use crate::temporal::{has_date, has_time};

const TIME_SIGNAL_WEIGHT: f64 = 0.4;
const DATE_SIGNAL_WEIGHT: f64 = 0.3;
const EVENT_KEYWORD_WEIGHT: f64 = 0.1;
const EVENT_KEYWORD_CAP: f64 = 0.3;

const MEMO_BASE_SCORE: f64 = 0.4;
const MEMO_KEYWORD_WEIGHT: f64 = 0.15;
const MEMO_KEYWORD_CAP: f64 = 0.3;
const LONG_UNTIMED_BONUS: f64 = 0.25;
const LONG_TEXT_CHARS: usize = 50;

/// Scheduling vocabulary, matched as lowercase substrings.
pub const EVENT_KEYWORDS: &[&str] = &[
    "会议", "约", "预约", "安排", "计划", "提醒", "待办",
    "明天", "今天", "后天", "下周", "下月",
    "点", "时", "分", "上午", "下午", "晚上", "早上",
    "meeting", "appointment", "schedule", "plan", "todo",
    "am", "pm", "tomorrow", "today",
];

/// Note-taking vocabulary, matched as lowercase substrings.
pub const NOTE_KEYWORDS: &[&str] = &[
    "记录", "笔记", "想法", "感想", "总结", "心得", "日记",
    "备忘", "提示", "注意", "重要",
    "note", "memo", "idea", "thought", "diary", "journal",
];

/// Independent likelihood scores for one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicScore {
    pub event_score: f64,
    pub memo_score: f64,
}

impl HeuristicScore {
    /// Picks the winning category and its confidence.
    ///
    /// Event wins only on a strictly greater score.
    pub fn decide(&self) -> (Category, f64) {
        if self.event_score > self.memo_score {
            (Category::Event, self.event_score)
        } else {
            (Category::Note, self.memo_score)
        }
    }
}

/// Scores `text` for both categories.
pub fn score(text: &str) -> HeuristicScore {
    let lowered = text.to_lowercase();
    let timed = has_time(text);

    HeuristicScore {
        event_score: event_score(text, &lowered, timed),
        memo_score: memo_score(text, &lowered, timed),
    }
}

fn event_score(text: &str, lowered: &str, timed: bool) -> f64 {
    let mut score = 0.0;
    if timed {
        score += TIME_SIGNAL_WEIGHT;
    }
    if has_date(text) {
        score += DATE_SIGNAL_WEIGHT;
    }
    let hits = keyword_hits(lowered, EVENT_KEYWORDS);
    score += (hits as f64 * EVENT_KEYWORD_WEIGHT).min(EVENT_KEYWORD_CAP);
    score.clamp(0.0, 1.0)
}

fn memo_score(text: &str, lowered: &str, timed: bool) -> f64 {
    let mut score = MEMO_BASE_SCORE;
    let hits = keyword_hits(lowered, NOTE_KEYWORDS);
    score += (hits as f64 * MEMO_KEYWORD_WEIGHT).min(MEMO_KEYWORD_CAP);
    if text.chars().count() > LONG_TEXT_CHARS && !timed {
        score += LONG_UNTIMED_BONUS;
    }
    score.clamp(0.0, 1.0)
}

fn keyword_hits(lowered: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count()
}
