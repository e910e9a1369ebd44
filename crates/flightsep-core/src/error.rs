//! Error kinds for the analysis engine.
//!
//! `AnalysisIssue` never crosses the facade: a flight with an issue is
//! skipped or degraded and the issue is logged. `ConfigError` and
//! `ScanError` are the only errors callers can observe.

use thiserror::Error;

/// Per-flight input problems that degrade gracefully.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisIssue {
    #[error("flight {flight_id}: {dropped_tokens} unparseable route token(s), {usable_points} usable waypoint(s)")]
    MalformedRoute {
        flight_id: String,
        dropped_tokens: usize,
        usable_points: usize,
    },

    #[error("flight {flight_id}: no usable departure time")]
    MissingDeparture { flight_id: String },

    #[error("flight {flight_id}: route segment {segment} has zero length")]
    DegenerateSegment { flight_id: String, segment: usize },
}

/// Invalid analysis settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("scan cancelled")]
    Cancelled,
}
