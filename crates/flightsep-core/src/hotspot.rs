//! Grid clustering of conflicts into hotspots.

use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::models::{Conflict, Hotspot};
use crate::spatial::{bin_center, grid_bin};

/// Bin conflicts into grid cells and rank the cells by conflict count.
///
/// A conflict is binned by the position of its first aircraft (`position_a`),
/// not by the recorded midpoint. Cells with equal counts keep the order in
/// which they were first hit.
pub fn aggregate(conflicts: &[Conflict], config: &AnalysisConfig) -> Vec<Hotspot> {
    let cell = config.grid_cell_degrees;
    let limit = config.hotspot_sample_limit;

    let mut cells: HashMap<(i64, i64), usize> = HashMap::new();
    let mut hotspots: Vec<Hotspot> = Vec::new();

    for conflict in conflicts {
        let key = (
            grid_bin(conflict.position_a.lat, cell),
            grid_bin(conflict.position_a.lon, cell),
        );
        let slot = *cells.entry(key).or_insert_with(|| {
            hotspots.push(Hotspot {
                lat_center: bin_center(key.0, cell),
                lon_center: bin_center(key.1, cell),
                conflict_count: 0,
                sample_conflicts: Vec::new(),
            });
            hotspots.len() - 1
        });

        let hotspot = &mut hotspots[slot];
        hotspot.conflict_count += 1;
        if hotspot.sample_conflicts.len() < limit {
            hotspot.sample_conflicts.push(conflict.clone());
        }
    }

    hotspots.sort_by(|a, b| b.conflict_count.cmp(&a.conflict_count));
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn conflict_at(lat: f64, lon: f64, time_epoch: f64) -> Conflict {
        Conflict {
            flight_id_a: "A".into(),
            flight_id_b: "B".into(),
            time_epoch,
            lat: lat + 10.0,
            lon: lon + 10.0,
            altitude_ft: 30_000.0,
            horizontal_distance_nm: 1.0,
            vertical_distance_ft: 0.0,
            position_a: Coordinate::new(lat, lon),
            position_b: Coordinate::new(lat + 10.0, lon + 10.0),
        }
    }

    #[test]
    fn ranks_cells_by_count() {
        let config = AnalysisConfig::default();
        let mut conflicts = Vec::new();
        for k in 0..3 {
            conflicts.push(conflict_at(10.1, 20.1, k as f64));
        }
        for k in 0..7 {
            conflicts.push(conflict_at(45.2, -75.3, 100.0 + k as f64));
        }

        let hotspots = aggregate(&conflicts, &config);
        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].conflict_count, 7);
        assert_eq!(hotspots[0].sample_conflicts.len(), 7);
        assert_eq!(hotspots[0].lat_center, 45.25);
        assert_eq!(hotspots[0].lon_center, -75.25);
        assert_eq!(hotspots[1].conflict_count, 3);
        assert_eq!(hotspots[1].lat_center, 10.25);
        assert_eq!(hotspots[1].lon_center, 20.25);
    }

    #[test]
    fn caps_samples_but_counts_everything() {
        let config = AnalysisConfig::default();
        let conflicts: Vec<Conflict> = (0..25)
            .map(|k| conflict_at(0.1, 0.1, k as f64))
            .collect();

        let hotspots = aggregate(&conflicts, &config);
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].conflict_count, 25);
        assert_eq!(hotspots[0].sample_conflicts.len(), 10);
        let times: Vec<f64> = hotspots[0]
            .sample_conflicts
            .iter()
            .map(|c| c.time_epoch)
            .collect();
        assert_eq!(times, (0..10).map(|k| k as f64).collect::<Vec<_>>());
    }

    #[test]
    fn bins_by_first_aircraft_not_midpoint() {
        let config = AnalysisConfig::default();
        let hotspots = aggregate(&[conflict_at(-0.1, -0.1, 0.0)], &config);
        assert_eq!(hotspots[0].lat_center, -0.25);
        assert_eq!(hotspots[0].lon_center, -0.25);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let config = AnalysisConfig::default();
        let conflicts = vec![
            conflict_at(5.1, 5.1, 0.0),
            conflict_at(1.1, 1.1, 1.0),
            conflict_at(1.1, 1.1, 2.0),
            conflict_at(5.1, 5.1, 3.0),
        ];
        let hotspots = aggregate(&conflicts, &config);
        assert_eq!(hotspots[0].lat_center, 5.25);
        assert_eq!(hotspots[1].lat_center, 1.25);
    }

    #[test]
    fn no_conflicts_no_hotspots() {
        assert!(aggregate(&[], &AnalysisConfig::default()).is_empty());
    }
}
