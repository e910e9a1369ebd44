//! Core data models for separation analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A filed flight plan.
///
/// Field names follow the flight files the planners export (`ACID`,
/// `departure time`, `aircraft speed`); snake_case names are accepted too.
/// Malformed fields decode to `None`/empty rather than failing the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(default, alias = "ACID", alias = "acid", deserialize_with = "lenient_id")]
    pub id: String,
    /// Space-separated waypoint tokens, e.g. `49.64N/92.114W 47.50N/69.88W`
    #[serde(default, deserialize_with = "lenient_string")]
    pub route: String,
    /// Epoch seconds
    #[serde(
        default,
        rename = "departure time",
        alias = "departure_time",
        deserialize_with = "lenient_number"
    )]
    pub departure_time: Option<f64>,
    #[serde(
        default,
        rename = "aircraft speed",
        alias = "speed_knots",
        deserialize_with = "lenient_number"
    )]
    pub speed_knots: Option<f64>,
    #[serde(
        default,
        rename = "altitude",
        alias = "altitude_ft",
        deserialize_with = "lenient_number"
    )]
    pub altitude_ft: Option<f64>,
}

impl Flight {
    /// Create a flight with only an id and route.
    pub fn new(id: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route: route.into(),
            departure_time: None,
            speed_knots: None,
            altitude_ft: None,
        }
    }

    pub fn departing_at(mut self, epoch_seconds: f64) -> Self {
        self.departure_time = Some(epoch_seconds);
        self
    }

    pub fn with_speed(mut self, knots: f64) -> Self {
        self.speed_knots = Some(knots);
        self
    }

    pub fn with_altitude(mut self, feet: f64) -> Self {
        self.altitude_ft = Some(feet);
        self
    }

    /// Departure time if it can anchor a trajectory.
    ///
    /// Zero counts as missing, matching how flight files mark an unset time.
    /// Negative epochs are kept.
    pub fn usable_departure(&self) -> Option<f64> {
        self.departure_time.filter(|t| t.is_finite() && *t != 0.0)
    }
}

/// A latitude/longitude pair in degrees, N/E positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Position of one flight at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
}

impl Position {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Separation violation between two flights at one sample time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Flight listed first in the input
    pub flight_id_a: String,
    pub flight_id_b: String,
    /// Sample time, epoch seconds
    pub time_epoch: f64,
    /// Midpoint between the two aircraft
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
    pub horizontal_distance_nm: f64,
    pub vertical_distance_ft: f64,
    /// Raw positions of each aircraft at detection
    pub position_a: Coordinate,
    pub position_b: Coordinate,
}

impl Conflict {
    /// Detection time as a UTC timestamp.
    pub fn detected_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.time_epoch.floor();
        let nanos = ((self.time_epoch - secs) * 1e9) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// Whether `id` is one of the two flights.
    pub fn involves(&self, id: &str) -> bool {
        self.flight_id_a == id || self.flight_id_b == id
    }
}

/// Grid cell where conflicts concentrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub lat_center: f64,
    pub lon_center: f64,
    /// Total conflicts in the cell
    pub conflict_count: usize,
    /// Earliest conflicts in the cell, capped by the configured limit
    pub sample_conflicts: Vec<Conflict>,
}

/// Output of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub conflicts: Vec<Conflict>,
    pub hotspots: Vec<Hotspot>,
}

impl AnalysisResult {
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}
