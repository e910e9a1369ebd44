//! Server configuration from environment.

use std::env;

use flightsep_core::{AnalysisConfig, ExecutionMode};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub analysis: AnalysisConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let mut analysis = AnalysisConfig::default();
        if env_flag("FLIGHTSEP_PARALLEL") {
            analysis.execution = ExecutionMode::Parallel;
        }
        if let Some(nm) = env_f64("FLIGHTSEP_HORIZONTAL_NM") {
            analysis.horizontal_threshold_nm = nm;
        }
        if let Some(ft) = env_f64("FLIGHTSEP_VERTICAL_FT") {
            analysis.vertical_threshold_ft = ft;
        }
        if let Some(secs) = env_f64("FLIGHTSEP_SAMPLE_INTERVAL_S") {
            analysis.sample_interval_seconds = secs;
        }
        if let Some(limit) = env::var("FLIGHTSEP_MAX_SAMPLES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            analysis.max_samples = limit;
        }

        Self {
            server_port: env::var("FLIGHTSEP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            analysis,
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
