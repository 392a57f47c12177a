//! Route data provider.
//!
//! The planning engine reads route data through [`RouteDataProvider`]: the
//! ordered stops of each directional service with cumulative distances,
//! stop metadata, and service existence. [`RouteNetwork`] is the in-memory
//! implementation, loaded from the LTA-style JSON data files.

mod error;
mod loader;
mod memory;

pub use error::NetworkError;
pub use loader::{BUS_ROUTES_FILE, BUS_SERVICES_FILE, BUS_STOPS_FILE, load_dir};
pub use memory::RouteNetwork;

use crate::domain::{BusStop, RouteStop, ServiceKey, StopCode};

/// Read access to route data.
///
/// This abstraction allows the graph builder and validator to run against
/// any data source, and lets tests use hand-built networks.
pub trait RouteDataProvider {
    /// The route of a directional service, ordered by sequence number.
    ///
    /// Returns `None` if the service has no route stops.
    fn route(&self, service: &ServiceKey) -> Option<&[RouteStop]>;

    /// All routes in ascending [`ServiceKey`] order.
    fn routes(&self) -> impl Iterator<Item = (&ServiceKey, &[RouteStop])>;

    /// Look up stop metadata by code.
    fn stop(&self, code: &StopCode) -> Option<&BusStop>;

    /// Check that a directional service exists.
    fn has_service(&self, service: &ServiceKey) -> bool;
}
