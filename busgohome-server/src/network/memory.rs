//! In-memory route network snapshot.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{BusService, BusStop, RouteStop, ServiceKey, StopCode};

use super::{NetworkError, RouteDataProvider};

/// An immutable snapshot of stops, services and routes.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    stops: HashMap<StopCode, BusStop>,
    services: BTreeMap<ServiceKey, BusService>,
    /// Route stops per service, sorted by sequence number.
    routes: BTreeMap<ServiceKey, Vec<RouteStop>>,
}

impl RouteNetwork {
    /// Assemble a network from flat record lists.
    ///
    /// Route stops are grouped by service and ordered by sequence number.
    /// Every route stop must belong to a listed service. Duplicate sequence
    /// numbers and decreasing distances are left in place for the graph
    /// builder to reject.
    pub fn new(
        stops: Vec<BusStop>,
        services: Vec<BusService>,
        route_stops: Vec<RouteStop>,
    ) -> Result<Self, NetworkError> {
        let stops: HashMap<_, _> = stops.into_iter().map(|s| (s.code.clone(), s)).collect();
        let services: BTreeMap<_, _> = services.into_iter().map(|s| (s.key.clone(), s)).collect();

        let mut routes: BTreeMap<ServiceKey, Vec<RouteStop>> = BTreeMap::new();
        for route_stop in route_stops {
            if !services.contains_key(&route_stop.service) {
                return Err(NetworkError::UnknownService(route_stop.service));
            }
            routes
                .entry(route_stop.service.clone())
                .or_default()
                .push(route_stop);
        }

        for route in routes.values_mut() {
            // Stable, so duplicates keep their input order
            route.sort_by_key(|r| r.sequence);
        }

        Ok(Self {
            stops,
            services,
            routes,
        })
    }

    /// Returns the number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the number of directional services.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Iterate over all stops, in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &BusStop> {
        self.stops.values()
    }

    /// Returns the stops of a service's route in order.
    ///
    /// A loop service lists its terminus twice. Route stops whose code has no
    /// stop record are skipped.
    pub fn stops_along(&self, key: &ServiceKey) -> Vec<&BusStop> {
        self.route(key)
            .unwrap_or_default()
            .iter()
            .filter_map(|r| self.stops.get(&r.stop))
            .collect()
    }
}

impl RouteDataProvider for RouteNetwork {
    fn route(&self, service: &ServiceKey) -> Option<&[RouteStop]> {
        self.routes.get(service).map(Vec::as_slice)
    }

    fn routes(&self) -> impl Iterator<Item = (&ServiceKey, &[RouteStop])> {
        self.routes.iter().map(|(k, v)| (k, v.as_slice()))
    }

    fn stop(&self, code: &StopCode) -> Option<&BusStop> {
        self.stops.get(code)
    }

    fn has_service(&self, service: &ServiceKey) -> bool {
        self.services.contains_key(service)
    }
}
