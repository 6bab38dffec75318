//! Storage-facing projections of classification results.
//!
//! # Responsibility
//! - Map extracted fields onto the shapes the persistence layer stores.
//! - Assign a stable identity to every projected record.
//!
//! # Invariants
//! - `uuid` is never nil.
//! - `ScheduleRecord::original_text` is the raw classified input.
//! - `MemoRecord::content` equals the note content verbatim.

use crate::model::classification::{ClassificationResult, EventFields, ExtractedFields, NoteFields};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to projected records.
pub type RecordId = Uuid;

/// Separator used by the memo `tags` storage column.
pub const TAG_COLUMN_SEPARATOR: &str = ",";

/// Validation error for record projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NilUuid,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "record uuid must not be nil"),
        }
    }
}

impl Error for RecordValidationError {}

/// Schedule item as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub uuid: RecordId,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: String,
    pub original_text: String,
}

/// Memo as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRecord {
    pub uuid: RecordId,
    pub content: String,
    pub summary: String,
    pub tags: Vec<String>,
}

impl MemoRecord {
    /// Renders tags as the comma-separated storage column.
    ///
    /// Returns `None` for an empty tag set (nullable column).
    pub fn tags_column(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        Some(self.tags.join(TAG_COLUMN_SEPARATOR))
    }
}

/// Record ready to hand over to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArchiveRecord {
    Schedule(ScheduleRecord),
    Memo(MemoRecord),
}

impl ArchiveRecord {
    /// Projects extracted fields with a freshly generated id.
    pub fn from_fields(extracted: ExtractedFields, original_text: impl Into<String>) -> Self {
        Self::project(Uuid::new_v4(), extracted, original_text.into())
    }

    /// Projects extracted fields with a caller-provided id.
    ///
    /// Used when the storage layer has already allocated the identity.
    pub fn with_id(
        uuid: RecordId,
        extracted: ExtractedFields,
        original_text: impl Into<String>,
    ) -> Result<Self, RecordValidationError> {
        if uuid.is_nil() {
            return Err(RecordValidationError::NilUuid);
        }
        Ok(Self::project(uuid, extracted, original_text.into()))
    }

    pub fn uuid(&self) -> RecordId {
        match self {
            Self::Schedule(record) => record.uuid,
            Self::Memo(record) => record.uuid,
        }
    }

    fn project(uuid: RecordId, extracted: ExtractedFields, original_text: String) -> Self {
        match extracted {
            ExtractedFields::Event(fields) => {
                Self::Schedule(schedule_record(uuid, fields, original_text))
            }
            ExtractedFields::Note(fields) => Self::Memo(memo_record(uuid, fields)),
        }
    }
}

impl ClassificationResult {
    /// Consumes the result and projects it into a storable record.
    pub fn into_record(self, original_text: impl Into<String>) -> ArchiveRecord {
        ArchiveRecord::from_fields(self.extracted, original_text)
    }
}

fn schedule_record(uuid: RecordId, fields: EventFields, original_text: String) -> ScheduleRecord {
    ScheduleRecord {
        uuid,
        date: fields.date().map(str::to_string),
        time: fields.time().map(str::to_string),
        description: fields.description().to_string(),
        original_text,
    }
}

fn memo_record(uuid: RecordId, fields: NoteFields) -> MemoRecord {
    MemoRecord {
        uuid,
        content: fields.content,
        summary: fields.summary,
        tags: fields.tags,
    }
}
