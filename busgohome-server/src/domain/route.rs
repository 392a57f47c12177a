//! Route stop records.

use super::{ServiceKey, StopCode};

/// One stop along a directional service route.
///
/// Unique per (service, sequence). A loop service lists its terminus at two
/// different sequence numbers, so the sequence number, not the stop code, is
/// the position key.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    pub service: ServiceKey,
    pub sequence: u32,
    pub stop: StopCode,
    /// Cumulative distance from the route's first stop.
    pub distance: f64,
}

impl RouteStop {
    pub fn new(service: ServiceKey, sequence: u32, stop: StopCode, distance: f64) -> Self {
        Self {
            service,
            sequence,
            stop,
            distance,
        }
    }
}
