//! Sampled all-pairs conflict scanning.
//!
//! The horizon runs from the earliest departure to the latest departure plus
//! padding. At every sample each positioned flight is checked against every
//! other; samples are independent, so the parallel mode hands whole samples
//! to rayon and merges the per-sample results back in time order.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::{AnalysisConfig, ExecutionMode};
use crate::error::ScanError;
use crate::models::{Conflict, Flight, Position};
use crate::spatial::haversine_nm;
use crate::trajectory::Trajectory;

/// Cooperative cancellation for a running scan.
///
/// Checked between samples; a cancelled scan yields no partial result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Sample times covered by a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    samples: usize,
}

impl Horizon {
    /// Horizon spanning every trajectory, or `None` when there is nothing to sample.
    pub fn covering(trajectories: &[Trajectory], config: &AnalysisConfig) -> Option<Self> {
        let (start, latest) = trajectories.iter().map(Trajectory::departure_time).fold(
            None,
            |acc: Option<(f64, f64)>, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            },
        )?;

        let interval = config.sample_interval_seconds;
        if !interval.is_finite() || interval <= 0.0 {
            tracing::warn!(interval, "sample interval is not positive, skipping scan");
            return None;
        }

        let end = latest + config.horizon_padding_seconds;
        let Some(samples) = Self::count_samples(start, end, interval, config.max_samples) else {
            tracing::warn!(
                start,
                end,
                interval,
                max_samples = config.max_samples,
                "horizon exceeds the sample limit, skipping scan"
            );
            return None;
        };

        Some(Self {
            start,
            end,
            interval,
            samples,
        })
    }

    /// Samples in `[start, end]`, or `None` when the span is unusable or over `limit`.
    fn count_samples(start: f64, end: f64, interval: f64, limit: usize) -> Option<usize> {
        let steps = ((end - start) / interval).floor();
        if !steps.is_finite() || steps < 0.0 || steps >= limit as f64 {
            return None;
        }
        (steps as usize).checked_add(1).filter(|&count| count <= limit)
    }

    /// Number of samples, counting both endpoints when they align.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn sample_time(&self, index: usize) -> f64 {
        self.start + index as f64 * self.interval
    }
}

/// Horizontal (NM) and vertical (ft) separation between two positions.
pub fn separation(a: &Position, b: &Position) -> (f64, f64) {
    let horizontal = haversine_nm(a.lat, a.lon, b.lat, b.lon);
    let vertical = (a.altitude_ft - b.altitude_ft).abs();
    (horizontal, vertical)
}

/// Whether a separation breaks both minima. Exactly-at-minimum is not a violation.
pub fn is_violation(horizontal_nm: f64, vertical_ft: f64, config: &AnalysisConfig) -> bool {
    horizontal_nm < config.horizontal_threshold_nm && vertical_ft < config.vertical_threshold_ft
}

/// Conflict scanner over one immutable flight set.
pub struct ConflictScanner<'a> {
    config: &'a AnalysisConfig,
    trajectories: Vec<Trajectory>,
    horizon: Option<Horizon>,
}

impl<'a> ConflictScanner<'a> {
    /// Prepare trajectories for every flight that can be positioned.
    pub fn new(flights: &[Flight], config: &'a AnalysisConfig) -> Self {
        let mut trajectories = Vec::with_capacity(flights.len());
        for flight in flights {
            match Trajectory::build(flight, config) {
                Ok(trajectory) => {
                    for issue in trajectory.issues() {
                        tracing::debug!(flight_id = %flight.id, "{}", issue);
                    }
                    trajectories.push(trajectory);
                }
                Err(issue) => {
                    tracing::debug!(flight_id = %flight.id, "excluding flight: {}", issue);
                }
            }
        }

        let horizon = Horizon::covering(&trajectories, config);
        Self {
            config,
            trajectories,
            horizon,
        }
    }

    pub fn horizon(&self) -> Option<Horizon> {
        self.horizon
    }

    /// Flights that take part in the scan, in input order.
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Conflicts at one sample, in pair discovery order.
    pub fn scan_sample(&self, index: usize) -> Vec<Conflict> {
        let Some(horizon) = self.horizon else {
            return Vec::new();
        };
        let time = horizon.sample_time(index);

        let positioned: Vec<(&str, Position)> = self
            .trajectories
            .iter()
            .filter_map(|traj| Some((traj.flight_id(), traj.position_at(time)?)))
            .collect();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut conflicts = Vec::new();
        for i in 0..positioned.len() {
            let (id_a, pos_a) = positioned[i];
            for &(id_b, pos_b) in &positioned[i + 1..] {
                let (horizontal, vertical) = separation(&pos_a, &pos_b);
                if !is_violation(horizontal, vertical, self.config) {
                    continue;
                }

                let key = if id_a <= id_b { (id_a, id_b) } else { (id_b, id_a) };
                if !seen.insert(key) {
                    continue;
                }

                conflicts.push(Conflict {
                    flight_id_a: id_a.to_string(),
                    flight_id_b: id_b.to_string(),
                    time_epoch: time,
                    lat: (pos_a.lat + pos_b.lat) / 2.0,
                    lon: (pos_a.lon + pos_b.lon) / 2.0,
                    altitude_ft: (pos_a.altitude_ft + pos_b.altitude_ft) / 2.0,
                    horizontal_distance_nm: horizontal,
                    vertical_distance_ft: vertical,
                    position_a: pos_a.coordinate(),
                    position_b: pos_b.coordinate(),
                });
            }
        }
        conflicts
    }

    /// Scan the whole horizon using the configured execution mode.
    pub fn run(&self, cancel: Option<&CancelToken>) -> Result<Vec<Conflict>, ScanError> {
        let Some(horizon) = self.horizon else {
            return Ok(Vec::new());
        };
        let samples = horizon.sample_count();
        let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

        tracing::debug!(
            flights = self.trajectories.len(),
            samples,
            mode = ?self.config.execution,
            "scanning horizon"
        );

        let per_sample: Vec<Vec<Conflict>> = match self.config.execution {
            ExecutionMode::Sequential => {
                let mut out = Vec::new();
                for index in 0..samples {
                    if cancelled() {
                        return Err(ScanError::Cancelled);
                    }
                    out.push(self.scan_sample(index));
                }
                out
            }
            ExecutionMode::Parallel => (0..samples)
                .into_par_iter()
                .with_min_len(self.config.parallel_min_samples.max(1))
                .map(|index| {
                    if cancelled() {
                        Err(ScanError::Cancelled)
                    } else {
                        Ok(self.scan_sample(index))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(per_sample.into_iter().flatten().collect())
    }
}

/// Scan `flights` for conflicts using `config`.
pub fn scan(flights: &[Flight], config: &AnalysisConfig) -> Vec<Conflict> {
    ConflictScanner::new(flights, config)
        .run(None)
        .unwrap_or_default()
}
