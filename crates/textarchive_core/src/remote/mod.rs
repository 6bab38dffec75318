//! Remote language-model classification.
//!
//! # Responsibility
//! - Delegate the category decision to an external chat-completions endpoint.
//! - Report every failure as a typed `RemoteError`; never guess a result.
//!
//! # Invariants
//! - Each call is bounded by the configured timeout.
//! - A timeout is reported exactly like any other unavailability.

mod adapter;
pub mod wire;

pub use adapter::RemoteInferenceAdapter;
pub use wire::RemoteVerdict;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one remote inference attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Network failure, timeout or non-success status.
    Unavailable(String),
    /// Body is not a known envelope, or the verdict JSON is invalid/incomplete.
    Malformed(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "remote classifier unavailable: {details}"),
            Self::Malformed(details) => write!(f, "remote classifier reply malformed: {details}"),
        }
    }
}

impl Error for RemoteError {}

impl RemoteError {
    /// Short stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Malformed(_) => "malformed",
        }
    }
}
