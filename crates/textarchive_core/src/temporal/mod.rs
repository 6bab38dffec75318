//! Temporal notation recognition and canonicalization.
//!
//! # Responsibility
//! - Find date/time substrings using ranked notation tables.
//! - Canonicalize them against a per-call `today` snapshot.
//!
//! # See also
//! - `crate::extract::event` for the consumer of both halves.

pub mod normalize;
pub mod patterns;

pub use normalize::{
    normalize_date, normalize_time, try_normalize_date, try_normalize_time, NormalizationMiss,
    TemporalKind,
};
pub use patterns::{find_date, find_time, has_date, has_time, strip_temporal};
