//! Flight-plan separation analysis.
//!
//! Samples every flight's planned trajectory over a shared time horizon,
//! reports each pairwise separation violation, and clusters the violations
//! into geographic hotspots.

pub mod config;
pub mod engine;
pub mod error;
pub mod hotspot;
pub mod models;
pub mod route;
pub mod scanner;
pub mod spatial;
pub mod trajectory;

pub use config::{AnalysisConfig, ExecutionMode};
pub use engine::{analyze, AnalysisEngine};
pub use error::{AnalysisIssue, ConfigError, ScanError};
pub use hotspot::aggregate;
pub use models::{AnalysisResult, Conflict, Coordinate, Flight, Hotspot, Position};
pub use route::{parse_route, parse_route_report, route_tokens, waypoint_index, ParsedRoute};
pub use scanner::{is_violation, scan, separation, CancelToken, ConflictScanner, Horizon};
pub use spatial::haversine_nm;
pub use trajectory::{position_at, Trajectory};
