//! Core classification engine for the text archive assistant.
//! Decides whether free-form text is a scheduled event or a note and
//! extracts the matching structured fields.

pub mod config;
pub mod engine;
pub mod extract;
pub mod logging;
pub mod model;
pub mod remote;
pub mod scorer;
pub mod temporal;

pub use config::{ConfigError, EngineConfig};
pub use engine::{ClassificationEngine, EngineError, MANUAL_CONFIDENCE};
pub use extract::{extract_event, extract_note, FieldExtractor};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::classification::{
    Category, ClassificationResult, ConfidenceGate, EventFields, ExtractedFields, NoteFields,
    DEFAULT_CONFIDENCE_THRESHOLD,
};
pub use model::record::{ArchiveRecord, MemoRecord, RecordId, ScheduleRecord};
pub use remote::{RemoteError, RemoteInferenceAdapter, RemoteVerdict};
pub use scorer::{score, HeuristicScore};
pub use temporal::{
    find_date, find_time, normalize_date, normalize_time, NormalizationMiss, TemporalKind,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
