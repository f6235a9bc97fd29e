const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two WGS84 coordinates, in meters.
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(haversine_distance_meters(41.311, 69.24, 41.311, 69.24) < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111km() {
        let d = haversine_distance_meters(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }

    #[test]
    fn short_hops_stay_in_meter_scale() {
        // ~0.001 deg latitude is roughly 111 meters.
        let d = haversine_distance_meters(51.5007, -0.1246, 51.5017, -0.1246);
        assert!(d > 100.0 && d < 125.0, "got {}", d);
    }
}
