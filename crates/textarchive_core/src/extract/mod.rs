//! Category-specific field extraction.
//!
//! # Responsibility
//! - Build `EventFields` from temporal notations in the text.
//! - Build `NoteFields` from summary and keyword-tag rules.
//!
//! # Invariants
//! - Extraction never fails; missing data degrades to `None`/empty values.

pub mod event;
pub mod note;

use crate::model::classification::{Category, ExtractedFields};
use chrono::NaiveDate;

pub use event::extract_event;
pub use note::{extract_note, DEFAULT_SUMMARY_MAX_CHARS};

/// Dispatches to the extractor matching a chosen category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldExtractor {
    summary_max_chars: usize,
}

impl FieldExtractor {
    pub fn new(summary_max_chars: usize) -> Self {
        Self { summary_max_chars }
    }

    /// Extracts the payload for `category` from `text`.
    pub fn extract(&self, category: Category, text: &str, today: NaiveDate) -> ExtractedFields {
        match category {
            Category::Event => ExtractedFields::Event(extract_event(text, today)),
            Category::Note => ExtractedFields::Note(extract_note(text, self.summary_max_chars)),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MAX_CHARS)
    }
}
