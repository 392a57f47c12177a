//! JSON data file loader.
//!
//! Reads the three LTA DataMall style files from a data directory:
//! `BusStops.json`, `BusServices.json` and `BusRoutes.json`. Each is a JSON
//! array of records with PascalCase field names.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{
    BusService, BusStop, Direction, Location, RouteStop, ServiceKey, ServiceNo, StopCode,
};

use super::{NetworkError, RouteNetwork};

pub const BUS_STOPS_FILE: &str = "BusStops.json";
pub const BUS_SERVICES_FILE: &str = "BusServices.json";
pub const BUS_ROUTES_FILE: &str = "BusRoutes.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BusStopRecord {
    bus_stop_code: String,
    road_name: String,
    description: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BusServiceRecord {
    service_no: String,
    #[serde(default)]
    operator: String,
    direction: i64,
    #[serde(default)]
    category: String,
    origin_code: String,
    destination_code: String,
    #[serde(default)]
    loop_desc: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BusRouteRecord {
    service_no: String,
    direction: i64,
    stop_sequence: u32,
    bus_stop_code: String,
    distance: f64,
}

/// Load a route network from the JSON files in `dir`.
pub fn load_dir(dir: &Path) -> Result<RouteNetwork, NetworkError> {
    let stops: Vec<BusStopRecord> = read_json(&dir.join(BUS_STOPS_FILE))?;
    let services: Vec<BusServiceRecord> = read_json(&dir.join(BUS_SERVICES_FILE))?;
    let routes: Vec<BusRouteRecord> = read_json(&dir.join(BUS_ROUTES_FILE))?;

    let stops = stops
        .into_iter()
        .map(convert_stop)
        .collect::<Result<Vec<_>, _>>()?;
    let services = services
        .into_iter()
        .map(convert_service)
        .collect::<Result<Vec<_>, _>>()?;
    let routes = routes
        .into_iter()
        .map(convert_route)
        .collect::<Result<Vec<_>, _>>()?;

    let network = RouteNetwork::new(stops, services, routes)?;
    info!(
        dir = %dir.display(),
        stops = network.stop_count(),
        services = network.service_count(),
        "Loaded route network"
    );

    Ok(network)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NetworkError> {
    let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| NetworkError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(file: &'static str, e: impl std::fmt::Display) -> NetworkError {
    NetworkError::InvalidRecord {
        file,
        message: e.to_string(),
    }
}

fn service_key(file: &'static str, service_no: &str, direction: i64) -> Result<ServiceKey, NetworkError> {
    let service_no = ServiceNo::parse(service_no).map_err(|e| invalid(file, e))?;
    let direction = Direction::new(direction).map_err(|e| invalid(file, e))?;
    Ok(ServiceKey::new(service_no, direction))
}

fn convert_stop(record: BusStopRecord) -> Result<BusStop, NetworkError> {
    Ok(BusStop {
        code: StopCode::parse(&record.bus_stop_code).map_err(|e| invalid(BUS_STOPS_FILE, e))?,
        road_name: record.road_name,
        description: record.description,
        location: Location::new(record.latitude, record.longitude),
    })
}

fn convert_service(record: BusServiceRecord) -> Result<BusService, NetworkError> {
    let parse_code =
        |s: &str| StopCode::parse(s).map_err(|e| invalid(BUS_SERVICES_FILE, e));

    Ok(BusService {
        key: service_key(BUS_SERVICES_FILE, &record.service_no, record.direction)?,
        operator: record.operator,
        category: record.category,
        origin_code: parse_code(&record.origin_code)?,
        destination_code: parse_code(&record.destination_code)?,
        loop_desc: record.loop_desc,
    })
}

fn convert_route(record: BusRouteRecord) -> Result<RouteStop, NetworkError> {
    Ok(RouteStop::new(
        service_key(BUS_ROUTES_FILE, &record.service_no, record.direction)?,
        record.stop_sequence,
        StopCode::parse(&record.bus_stop_code).map_err(|e| invalid(BUS_ROUTES_FILE, e))?,
        record.distance,
    ))
}
