//! Classification orchestrator.
//!
//! # Responsibility
//! - Route text through the remote classifier first, the heuristic scorer
//!   on any remote failure.
//! - Apply the manual-selection gate identically on both paths.
//! - Offer a synchronous heuristic-only entry point for callers without an
//!   async runtime.
//!
//! # Invariants
//! - Classification entry points never fail for any input.
//! - Blank input short-circuits to the fixed empty-input result.
//! - One call uses one `today` snapshot for every date it resolves.
//! - The engine holds no mutable state; share it by reference.

use crate::config::{ConfigError, EngineConfig};
use crate::extract::FieldExtractor;
use crate::model::classification::{Category, ClassificationResult, ConfidenceGate};
use crate::remote::RemoteInferenceAdapter;
use crate::scorer;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Confidence assigned to a category chosen by a human.
pub const MANUAL_CONFIDENCE: f64 = 1.0;

/// Engine construction error.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    HttpClient(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::HttpClient(message) => write!(f, "{message}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::HttpClient(_) => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Which path produced a result; used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassifyPath {
    Empty,
    Remote,
    Heuristic,
    Manual,
}

impl ClassifyPath {
    fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Remote => "remote",
            Self::Heuristic => "heuristic",
            Self::Manual => "manual",
        }
    }
}

/// Text classification engine.
///
/// Construct once at the composition root and pass by reference.
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    remote: Option<RemoteInferenceAdapter>,
    extractor: FieldExtractor,
    gate: ConfidenceGate,
}

impl ClassificationEngine {
    /// Builds an engine; the remote path is wired only when `llm_enabled`.
    ///
    /// # Errors
    /// - Returns `EngineError::Config` when `config` fails validation.
    /// - Returns `EngineError::HttpClient` when the HTTP client cannot be built.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let remote = if config.llm_enabled {
            Some(RemoteInferenceAdapter::new(config).map_err(EngineError::HttpClient)?)
        } else {
            None
        };

        info!(
            "event=engine_init module=engine status=ok remote={} threshold={}",
            remote.is_some(),
            config.confidence_threshold
        );

        Ok(Self {
            remote,
            extractor: FieldExtractor::new(config.summary_max_chars),
            gate: ConfidenceGate::new(config.confidence_threshold),
        })
    }

    /// Heuristic-only engine with default thresholds.
    pub fn offline() -> Self {
        Self {
            remote: None,
            extractor: FieldExtractor::default(),
            gate: ConfidenceGate::default(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Returns whether `confidence` falls below the manual-selection threshold.
    pub fn needs_manual_selection(&self, confidence: f64) -> bool {
        self.gate.needs_manual_selection(confidence)
    }

    /// Classifies `text`, trying the remote classifier before the heuristic.
    ///
    /// Remote failures are logged and recovered; this never fails.
    pub async fn classify(&self, text: &str, today: NaiveDate) -> ClassificationResult {
        if is_blank(text) {
            return self.empty_result(text);
        }

        if let Some(remote) = &self.remote {
            match remote.infer(text, today).await {
                Ok(result) => return self.finish(ClassifyPath::Remote, text, result),
                Err(err) => warn!(
                    "event=remote_fallback module=engine status=degraded kind={} error={}",
                    err.kind(),
                    err
                ),
            }
        }

        self.finish(ClassifyPath::Heuristic, text, self.heuristic(text, today))
    }

    /// Same as [`Self::classify`] with `today` captured from the local clock.
    pub async fn classify_now(&self, text: &str) -> ClassificationResult {
        let today = Local::now().date_naive();
        self.classify(text, today).await
    }

    /// Classifies `text` with the deterministic scorer only; never suspends.
    pub fn classify_heuristic_only(&self, text: &str, today: NaiveDate) -> ClassificationResult {
        if is_blank(text) {
            return self.empty_result(text);
        }
        self.finish(ClassifyPath::Heuristic, text, self.heuristic(text, today))
    }

    /// Extracts fields for a category chosen by the user.
    ///
    /// The result carries full confidence and never needs manual selection.
    pub fn classify_as(
        &self,
        text: &str,
        category: Category,
        today: NaiveDate,
    ) -> ClassificationResult {
        let extracted = self.extractor.extract(category, text, today);
        let result = ClassificationResult::new(category, MANUAL_CONFIDENCE, extracted, self.gate);
        self.finish(ClassifyPath::Manual, text, result)
    }

    fn empty_result(&self, text: &str) -> ClassificationResult {
        let result = ClassificationResult::empty_input(self.gate);
        self.finish(ClassifyPath::Empty, text, result)
    }

    fn heuristic(&self, text: &str, today: NaiveDate) -> ClassificationResult {
        let (category, confidence) = scorer::score(text).decide();
        let extracted = self.extractor.extract(category, text, today);
        ClassificationResult::new(category, confidence, extracted, self.gate)
    }

    fn finish(
        &self,
        path: ClassifyPath,
        text: &str,
        result: ClassificationResult,
    ) -> ClassificationResult {
        info!(
            "event=classify module=engine status=ok path={} text_chars={} category={} confidence={:.2} manual={}",
            path.as_str(),
            text.chars().count(),
            result.category,
            result.confidence,
            result.needs_manual_selection
        );
        result
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
