//! Time-parameterised flight trajectories.
//!
//! A trajectory flies the route polyline at constant cruise speed from the
//! departure time. Segment lengths are great-circle distances, but the
//! position inside a segment is a plain linear blend of latitude and
//! longitude, so results drift from the true great circle near the poles
//! and across the antimeridian.

use chrono::{DateTime, Utc};

use crate::config::AnalysisConfig;
use crate::error::AnalysisIssue;
use crate::models::{Coordinate, Flight, Position};
use crate::route::parse_route_report;
use crate::spatial::haversine_nm;

/// A flight's route prepared for repeated position queries.
#[derive(Debug, Clone)]
pub struct Trajectory {
    flight_id: String,
    points: Vec<Coordinate>,
    /// `segment_lengths_nm[i]` spans `points[i]..points[i + 1]`
    segment_lengths_nm: Vec<f64>,
    total_distance_nm: f64,
    departure_time: f64,
    speed_nm_per_s: f64,
    altitude_ft: f64,
    issues: Vec<AnalysisIssue>,
}

impl Trajectory {
    /// Prepare a trajectory, or explain why the flight can never be positioned.
    pub fn build(flight: &Flight, config: &AnalysisConfig) -> Result<Self, AnalysisIssue> {
        let departure_time =
            flight
                .usable_departure()
                .ok_or_else(|| AnalysisIssue::MissingDeparture {
                    flight_id: flight.id.clone(),
                })?;

        let parsed = parse_route_report(&flight.route);
        if parsed.points.is_empty() {
            return Err(AnalysisIssue::MalformedRoute {
                flight_id: flight.id.clone(),
                dropped_tokens: parsed.dropped_tokens.len(),
                usable_points: 0,
            });
        }

        let mut issues = Vec::new();
        if !parsed.dropped_tokens.is_empty() {
            issues.push(AnalysisIssue::MalformedRoute {
                flight_id: flight.id.clone(),
                dropped_tokens: parsed.dropped_tokens.len(),
                usable_points: parsed.points.len(),
            });
        }

        let segment_lengths_nm: Vec<f64> = parsed
            .points
            .windows(2)
            .map(|pair| haversine_nm(pair[0].lat, pair[0].lon, pair[1].lat, pair[1].lon))
            .collect();
        for (segment, length) in segment_lengths_nm.iter().enumerate() {
            if *length <= 0.0 {
                issues.push(AnalysisIssue::DegenerateSegment {
                    flight_id: flight.id.clone(),
                    segment,
                });
            }
        }
        let total_distance_nm = segment_lengths_nm.iter().sum();

        let speed_knots = flight
            .speed_knots
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(config.default_speed_knots);
        let altitude_ft = flight
            .altitude_ft
            .filter(|a| a.is_finite())
            .unwrap_or(config.default_altitude_ft);

        Ok(Self {
            flight_id: flight.id.clone(),
            points: parsed.points,
            segment_lengths_nm,
            total_distance_nm,
            departure_time,
            speed_nm_per_s: speed_knots / 3600.0,
            altitude_ft,
            issues,
        })
    }

    pub fn flight_id(&self) -> &str {
        &self.flight_id
    }

    pub fn departure_time(&self) -> f64 {
        self.departure_time
    }

    pub fn total_distance_nm(&self) -> f64 {
        self.total_distance_nm
    }

    /// Non-fatal problems found while preparing the trajectory.
    pub fn issues(&self) -> &[AnalysisIssue] {
        &self.issues
    }

    /// Seconds from departure to the final waypoint.
    pub fn transit_seconds(&self) -> f64 {
        if self.speed_nm_per_s > 0.0 {
            self.total_distance_nm / self.speed_nm_per_s
        } else {
            0.0
        }
    }

    /// Estimated arrival at the final waypoint.
    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        let arrival = self.departure_time + self.transit_seconds();
        DateTime::from_timestamp(arrival.floor() as i64, 0)
    }

    /// Distance flown along the route by `time`, capped at the route length.
    pub fn distance_flown_nm(&self, time: f64) -> Option<f64> {
        let elapsed = time - self.departure_time;
        if elapsed < 0.0 {
            return None;
        }
        Some((elapsed * self.speed_nm_per_s).min(self.total_distance_nm))
    }

    /// Position at `time` (epoch seconds); `None` before departure.
    pub fn position_at(&self, time: f64) -> Option<Position> {
        let elapsed = time - self.departure_time;
        if elapsed < 0.0 {
            return None;
        }

        let first = self.points.first()?;
        let last = self.points.last()?;
        if self.points.len() == 1 {
            return Some(self.at(*first));
        }

        let transit = self.transit_seconds();
        if transit <= 0.0 || elapsed > transit {
            return Some(self.at(*last));
        }

        let mut remaining = elapsed * self.speed_nm_per_s;
        for (i, &length) in self.segment_lengths_nm.iter().enumerate() {
            // Duplicate waypoints are passed through instantly.
            if length <= 0.0 {
                continue;
            }
            if remaining <= length {
                let ratio = remaining / length;
                let from = self.points[i];
                let to = self.points[i + 1];
                return Some(self.at(Coordinate::new(
                    from.lat + (to.lat - from.lat) * ratio,
                    from.lon + (to.lon - from.lon) * ratio,
                )));
            }
            remaining -= length;
        }

        Some(self.at(*last))
    }

    fn at(&self, point: Coordinate) -> Position {
        Position {
            lat: point.lat,
            lon: point.lon,
            altitude_ft: self.altitude_ft,
        }
    }
}

/// Position of `flight` at `time`, parsing its route on every call.
///
/// Prefer [`Trajectory::build`] when querying the same flight repeatedly.
pub fn position_at(flight: &Flight, time: f64, config: &AnalysisConfig) -> Option<Position> {
    Trajectory::build(flight, config).ok()?.position_at(time)
}
