//! Analysis thresholds and fallback values.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the scanner walks the sample horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One sample after another on the calling thread
    #[default]
    Sequential,
    /// Samples spread across the rayon pool
    Parallel,
}

/// Configuration for a separation analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cruise speed used when a flight has none (knots)
    pub default_speed_knots: f64,
    /// Cruise altitude used when a flight has none (feet)
    pub default_altitude_ft: f64,
    /// Minimum horizontal separation (nautical miles)
    pub horizontal_threshold_nm: f64,
    /// Minimum vertical separation (feet)
    pub vertical_threshold_ft: f64,
    /// Spacing between samples (seconds)
    pub sample_interval_seconds: f64,
    /// Hotspot grid cell edge (degrees)
    pub grid_cell_degrees: f64,
    /// Time added after the latest departure to close the horizon (seconds)
    pub horizon_padding_seconds: f64,
    /// Conflicts kept per hotspot
    pub hotspot_sample_limit: usize,
    pub execution: ExecutionMode,
    /// Smallest run of samples handed to one rayon task
    pub parallel_min_samples: usize,
    /// Longest horizon the scanner will walk, in samples
    pub max_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_speed_knots: 400.0,
            default_altitude_ft: 35_000.0,
            horizontal_threshold_nm: 5.0,
            vertical_threshold_ft: 2000.0,
            sample_interval_seconds: 60.0,
            grid_cell_degrees: 0.5,
            horizon_padding_seconds: 4.0 * 3600.0,
            hotspot_sample_limit: 10,
            execution: ExecutionMode::Sequential,
            parallel_min_samples: 16,
            max_samples: 1_000_000,
        }
    }
}

impl AnalysisConfig {
    /// Same settings, parallel execution.
    pub fn parallel(mut self) -> Self {
        self.execution = ExecutionMode::Parallel;
        self
    }

    /// Reject values that would stall the sampler or poison arithmetic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("default_speed_knots", self.default_speed_knots),
            ("horizontal_threshold_nm", self.horizontal_threshold_nm),
            ("vertical_threshold_ft", self.vertical_threshold_ft),
            ("sample_interval_seconds", self.sample_interval_seconds),
            ("grid_cell_degrees", self.grid_cell_degrees),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("default_altitude_ft", self.default_altitude_ft),
            ("horizon_padding_seconds", self.horizon_padding_seconds),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.hotspot_sample_limit == 0 {
            return Err(ConfigError::ZeroLimit("hotspot_sample_limit"));
        }
        if self.parallel_min_samples == 0 {
            return Err(ConfigError::ZeroLimit("parallel_min_samples"));
        }
        if self.max_samples == 0 {
            return Err(ConfigError::ZeroLimit("max_samples"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.horizon_padding_seconds, 14_400.0);
        assert_eq!(config.execution, ExecutionMode::Sequential);
    }

    #[test]
    fn rejects_zero_interval() {
        let config = AnalysisConfig {
            sample_interval_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "sample_interval_seconds", .. })
        ));
    }

    #[test]
    fn rejects_nan_threshold() {
        let config = AnalysisConfig {
            horizontal_threshold_nm: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"horizontal_threshold_nm": 3.0, "execution": "parallel"}"#)
                .unwrap();
        assert_eq!(config.horizontal_threshold_nm, 3.0);
        assert_eq!(config.vertical_threshold_ft, 2000.0);
        assert_eq!(config.execution, ExecutionMode::Parallel);
    }
}
