//! Hand-built networks for planner tests.

use std::collections::BTreeMap;

use crate::domain::{BusService, BusStop, Location, RouteStop, ServiceKey, StopCode};
use crate::network::RouteNetwork;

pub(crate) fn code(s: &str) -> StopCode {
    StopCode::parse(s).unwrap()
}

pub(crate) fn key(s: &str) -> ServiceKey {
    ServiceKey::parse(s).unwrap()
}

/// Builder for small route networks.
///
/// Stops and services are created on first mention. A stop keeps the first
/// location it is given.
#[derive(Default)]
pub(crate) struct TestNetwork {
    stops: BTreeMap<StopCode, BusStop>,
    services: BTreeMap<ServiceKey, BusService>,
    route_stops: Vec<RouteStop>,
}

impl TestNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a route as (sequence, stop code, cumulative distance) rows.
    pub(crate) fn route(self, service: &str, rows: &[(u32, &str, f64)]) -> Self {
        let rows: Vec<_> = rows
            .iter()
            .map(|&(seq, stop, dist)| (seq, stop, dist, 0.0, 0.0))
            .collect();
        self.route_with_locations(service, &rows)
    }

    /// Add a route as (sequence, stop code, distance, latitude, longitude) rows.
    pub(crate) fn route_with_locations(
        mut self,
        service: &str,
        rows: &[(u32, &str, f64, f64, f64)],
    ) -> Self {
        let service = key(service);

        for &(sequence, stop, distance, lat, lon) in rows {
            let stop = code(stop);
            self.stops.entry(stop.clone()).or_insert_with(|| BusStop {
                code: stop.clone(),
                road_name: "Test Rd".to_string(),
                description: format!("Stop {stop}"),
                location: Location::new(lat, lon),
            });
            self.route_stops
                .push(RouteStop::new(service.clone(), sequence, stop, distance));
        }

        if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
            self.services
                .entry(service.clone())
                .or_insert_with(|| BusService {
                    key: service.clone(),
                    operator: "SBST".to_string(),
                    category: "TRUNK".to_string(),
                    origin_code: code(first.1),
                    destination_code: code(last.1),
                    loop_desc: String::new(),
                });
        }

        self
    }

    /// Add a stop that no route serves.
    pub(crate) fn stop(mut self, stop: &str) -> Self {
        let stop = code(stop);
        self.stops.entry(stop.clone()).or_insert_with(|| BusStop {
            code: stop.clone(),
            road_name: "Test Rd".to_string(),
            description: format!("Stop {stop}"),
            location: Location::new(0.0, 0.0),
        });
        self
    }

    pub(crate) fn build(self) -> RouteNetwork {
        RouteNetwork::new(
            self.stops.into_values().collect(),
            self.services.into_values().collect(),
            self.route_stops,
        )
        .unwrap()
    }
}
