//! Bus stop reference data.

use super::StopCode;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A bus stop. Immutable reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    pub code: StopCode,
    pub road_name: String,
    pub description: String,
    pub location: Location,
}
