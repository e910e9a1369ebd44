//! Spatial math for separation checks and hotspot binning.

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Great-circle distance in nautical miles between two lat/lon points (degrees).
pub fn haversine_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Index of the grid bin containing `value` for bins of `cell` degrees.
pub fn grid_bin(value: f64, cell: f64) -> i64 {
    (value / cell).floor() as i64
}

/// Center of grid bin `index` for bins of `cell` degrees.
pub fn bin_center(index: i64, cell: f64) -> f64 {
    index as f64 * cell + cell / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_latitude_is_sixty_nm() {
        let dist = haversine_nm(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 60.04).abs() < 0.01);
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_nm(49.64, -92.114, 49.64, -92.114), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_nm(45.0, -75.0, 46.0, -74.0);
        let ba = haversine_nm(46.0, -74.0, 45.0, -75.0);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn bins_floor_negative_values() {
        assert_eq!(grid_bin(45.3, 0.5), 90);
        assert_eq!(grid_bin(-75.2, 0.5), -151);
        assert_eq!(bin_center(-151, 0.5), -75.25);
        assert_eq!(bin_center(90, 0.5), 45.25);
    }
}
