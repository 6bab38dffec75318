//! Classification result model.
//!
//! # Responsibility
//! - Define the category/confidence/extracted-fields shape returned by the engine.
//! - Keep the serialized form aligned with the archive API wire schema.
//!
//! # Invariants
//! - `EventFields::has_time_info()` is true iff a date or a time was canonicalized.
//! - `NoteFields::content` is the classified input, verbatim.
//! - `confidence` is always within `[0, 1]`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category chosen for one piece of free-form text.
///
/// Serialized as `schedule` / `memo` to match the archive API naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Scheduled event with optional date/time.
    #[serde(rename = "schedule")]
    Event,
    /// Free-form note.
    #[serde(rename = "memo")]
    Note,
}

impl Category {
    /// Returns the wire label for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "schedule",
            Self::Note => "memo",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields extracted from event-like text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventFields")]
pub struct EventFields {
    date: Option<String>,
    time: Option<String>,
    description: String,
    has_time_info: bool,
}

impl EventFields {
    /// Builds event fields from canonical date/time values.
    ///
    /// `has_time_info` is derived, never supplied.
    pub fn new(date: Option<String>, time: Option<String>, description: impl Into<String>) -> Self {
        let has_time_info = date.is_some() || time.is_some();
        Self {
            date,
            time,
            description: description.into(),
            has_time_info,
        }
    }

    /// Canonical `YYYY-MM-DD` date, when one was recognized and resolved.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Canonical `HH:MM` time, when one was recognized and resolved.
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Input text with temporal notations removed.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_time_info(&self) -> bool {
        self.has_time_info
    }
}

#[derive(Deserialize)]
struct RawEventFields {
    date: Option<String>,
    time: Option<String>,
    description: String,
    has_time_info: bool,
}

impl TryFrom<RawEventFields> for EventFields {
    type Error = EventFieldsError;

    fn try_from(raw: RawEventFields) -> Result<Self, Self::Error> {
        let fields = EventFields::new(raw.date, raw.time, raw.description);
        if fields.has_time_info != raw.has_time_info {
            return Err(EventFieldsError::InconsistentTimeInfo {
                declared: raw.has_time_info,
            });
        }
        Ok(fields)
    }
}

/// Rejection reason for externally supplied event fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFieldsError {
    InconsistentTimeInfo { declared: bool },
}

impl Display for EventFieldsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InconsistentTimeInfo { declared } => write!(
                f,
                "has_time_info ({declared}) must equal whether date or time is present"
            ),
        }
    }
}

impl Error for EventFieldsError {}

/// Structured fields extracted from note-like text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFields {
    /// Input text, verbatim.
    pub content: String,
    /// Content truncated to the configured length, `...` appended when cut.
    pub summary: String,
    /// Topic tags in keyword-group order, without duplicates.
    pub tags: Vec<String>,
}

/// Category-specific payload of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedFields {
    Event(EventFields),
    Note(NoteFields),
}

impl ExtractedFields {
    /// Returns the category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            Self::Event(_) => Category::Event,
            Self::Note(_) => Category::Note,
        }
    }

    pub fn as_event(&self) -> Option<&EventFields> {
        match self {
            Self::Event(fields) => Some(fields),
            Self::Note(_) => None,
        }
    }

    pub fn as_note(&self) -> Option<&NoteFields> {
        match self {
            Self::Note(fields) => Some(fields),
            Self::Event(_) => None,
        }
    }
}

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub category: Category,
    pub confidence: f64,
    #[serde(rename = "extracted_data")]
    pub extracted: ExtractedFields,
    pub needs_manual_selection: bool,
}

impl ClassificationResult {
    /// Builds a result and applies the manual-selection gate.
    ///
    /// Confidence is clamped into `[0, 1]`.
    pub fn new(
        category: Category,
        confidence: f64,
        extracted: ExtractedFields,
        gate: ConfidenceGate,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        Self {
            category,
            confidence,
            extracted,
            needs_manual_selection: gate.needs_manual_selection(confidence),
        }
    }

    /// Fixed result returned for empty or whitespace-only input.
    pub fn empty_input(gate: ConfidenceGate) -> Self {
        Self::new(
            Category::Note,
            EMPTY_INPUT_CONFIDENCE,
            ExtractedFields::Note(NoteFields::default()),
            gate,
        )
    }
}

/// Confidence reported for blank input.
pub const EMPTY_INPUT_CONFIDENCE: f64 = 0.5;

/// Default manual-selection threshold.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Rule that flags low-confidence results for human disambiguation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f64,
}

impl ConfidenceGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns whether a result with `confidence` must be confirmed by a human.
    pub fn needs_manual_selection(&self, confidence: f64) -> bool {
        confidence < self.threshold
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}
