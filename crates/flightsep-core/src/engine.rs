//! Analysis facade.
//!
//! The only entry point adapters use: scan the flight set, cluster the
//! conflicts, hand back both. Nothing survives between calls.

use std::time::Instant;

use crate::config::AnalysisConfig;
use crate::error::{ConfigError, ScanError};
use crate::hotspot::aggregate;
use crate::models::{AnalysisResult, Flight};
use crate::scanner::{CancelToken, ConflictScanner};

/// Analyze `flights` with the default configuration.
pub fn analyze(flights: &[Flight]) -> AnalysisResult {
    AnalysisEngine::default().analyze(flights)
}

/// Separation analysis with a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Conflicts and hotspots for `flights`. Empty input yields an empty result.
    pub fn analyze(&self, flights: &[Flight]) -> AnalysisResult {
        self.execute(flights, None).unwrap_or_default()
    }

    /// Like [`analyze`](Self::analyze), abandoning the scan once `cancel` fires.
    pub fn analyze_with_cancel(
        &self,
        flights: &[Flight],
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, ScanError> {
        self.execute(flights, Some(cancel))
    }

    fn execute(
        &self,
        flights: &[Flight],
        cancel: Option<&CancelToken>,
    ) -> Result<AnalysisResult, ScanError> {
        if flights.is_empty() {
            return Ok(AnalysisResult::default());
        }

        let started = Instant::now();
        let scanner = ConflictScanner::new(flights, &self.config);
        let conflicts = scanner.run(cancel)?;
        let hotspots = aggregate(&conflicts, &self.config);

        tracing::info!(
            flights = flights.len(),
            positioned = scanner.trajectories().len(),
            conflicts = conflicts.len(),
            hotspots = hotspots.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "separation analysis complete"
        );

        Ok(AnalysisResult {
            conflicts,
            hotspots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_result() {
        let result = analyze(&[]);
        assert!(result.conflicts.is_empty());
        assert!(result.hotspots.is_empty());
    }

    #[test]
    fn flights_without_departures_are_empty_result() {
        let flights = vec![Flight::new("A", "45N/75W"), Flight::new("B", "45N/75W")];
        assert_eq!(analyze(&flights), AnalysisResult::default());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = AnalysisConfig {
            grid_cell_degrees: -0.5,
            ..Default::default()
        };
        assert!(AnalysisEngine::new(config).is_err());
    }

    #[test]
    fn hotspots_cover_every_conflict() {
        let flights = vec![
            Flight::new("A", "0N/0E").departing_at(1_700_000_000.0),
            Flight::new("B", "0N/0.01E").departing_at(1_700_000_000.0),
        ];
        let engine = AnalysisEngine::new(AnalysisConfig {
            horizon_padding_seconds: 300.0,
            ..Default::default()
        })
        .unwrap();
        let result = engine.analyze(&flights);
        assert_eq!(result.conflicts.len(), 6);
        let total: usize = result.hotspots.iter().map(|h| h.conflict_count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn cancelled_analysis_surfaces_no_result() {
        let flights = vec![
            Flight::new("A", "0N/0E").departing_at(1_700_000_000.0),
            Flight::new("B", "0N/0.01E").departing_at(1_700_000_000.0),
        ];
        let cancel = CancelToken::new();
        cancel.cancel();
        let engine = AnalysisEngine::default();
        assert_eq!(
            engine.analyze_with_cancel(&flights, &cancel),
            Err(ScanError::Cancelled)
        );
    }
}
