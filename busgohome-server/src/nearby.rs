//! Nearby stop search.
//!
//! Great-circle distance between stops, and filtering a stop set to those
//! within a radius of a point.

use crate::domain::{BusStop, Location};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(a: Location, b: Location) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Stops strictly closer than `radius_km` to `centre`, ordered by stop code.
pub fn stops_within<'a>(
    stops: impl IntoIterator<Item = &'a BusStop>,
    centre: Location,
    radius_km: f64,
) -> Vec<&'a BusStop> {
    let mut found: Vec<&BusStop> = stops
        .into_iter()
        .filter(|stop| haversine_km(stop.location, centre) < radius_km)
        .collect();
    found.sort_by(|a, b| a.code.cmp(&b.code));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopCode;

    fn stop(code: &str, latitude: f64, longitude: f64) -> BusStop {
        BusStop {
            code: StopCode::parse(code).unwrap(),
            road_name: "Test Rd".into(),
            description: code.into(),
            location: Location::new(latitude, longitude),
        }
    }

    #[test]
    fn zero_distance() {
        let p = Location::new(1.31, 103.90);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(Location::new(0.0, 103.0), Location::new(1.0, 103.0));
        // 6371 * pi / 180
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Location::new(1.29684, 103.85253);
        let b = Location::new(1.35, 103.94);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn radius_filter_is_strict_and_sorted() {
        let centre = Location::new(1.31, 103.90);
        let stops = vec![
            stop("20002", 1.3101, 103.9001),
            stop("10001", 1.3105, 103.9000),
            stop("90009", 1.40, 103.90),
        ];

        let found = stops_within(&stops, centre, DEFAULT_RADIUS_KM);
        let codes: Vec<_> = found.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["10001", "20002"]);

        // A stop exactly at the centre is excluded by a zero radius
        assert!(stops_within(&stops, Location::new(1.40, 103.90), 0.0).is_empty());
    }
}
