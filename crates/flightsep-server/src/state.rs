//! Shared server state.

use std::sync::atomic::{AtomicU64, Ordering};

use flightsep_core::AnalysisEngine;

/// Application state. The engine is stateless; only a request counter moves.
pub struct AppState {
    engine: AnalysisEngine,
    analyses_run: AtomicU64,
}

impl AppState {
    pub fn new(engine: AnalysisEngine) -> Self {
        Self {
            engine,
            analyses_run: AtomicU64::new(0),
        }
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Record one analysis and return its sequence number.
    pub fn next_analysis(&self) -> u64 {
        self.analyses_run.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn analyses_run(&self) -> u64 {
        self.analyses_run.load(Ordering::Relaxed)
    }
}
