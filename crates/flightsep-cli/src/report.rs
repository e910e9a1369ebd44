//! Human-readable summaries.

use chrono::DateTime;
use flightsep_core::{AnalysisResult, Conflict};

fn format_time(epoch: f64) -> String {
    DateTime::from_timestamp(epoch.floor() as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%SZ").to_string())
        .unwrap_or_else(|| format!("{epoch}"))
}

fn format_conflict(conflict: &Conflict) -> String {
    format!(
        "  {} {:>8} <-> {:<8} {:7.3}N {:8.3}E {:>6.0}ft  h={:.2}NM v={:.0}ft",
        format_time(conflict.time_epoch),
        conflict.flight_id_a,
        conflict.flight_id_b,
        conflict.lat,
        conflict.lon,
        conflict.altitude_ft,
        conflict.horizontal_distance_nm,
        conflict.vertical_distance_ft,
    )
}

/// Summary of a result: totals, the first `top` conflicts, the `top` busiest hotspots.
pub fn summary_lines(result: &AnalysisResult, top: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{} conflict(s), {} hotspot(s)",
        result.conflicts.len(),
        result.hotspots.len()
    )];

    if !result.conflicts.is_empty() {
        lines.push("Conflicts:".to_string());
        lines.extend(result.conflicts.iter().take(top).map(format_conflict));
        if result.conflicts.len() > top {
            lines.push(format!("  ... {} more", result.conflicts.len() - top));
        }
    }

    if !result.hotspots.is_empty() {
        lines.push("Hotspots:".to_string());
        for hotspot in result.hotspots.iter().take(top) {
            lines.push(format!(
                "  {:7.2}N {:8.2}E  {} conflict(s)",
                hotspot.lat_center, hotspot.lon_center, hotspot.conflict_count
            ));
        }
    }

    lines
}
