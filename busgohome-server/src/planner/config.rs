//! Planner configuration and time accounting constants.

use std::time::Duration;

use super::CostMode;

/// Assumed average bus speed, in route distance units (km) per hour.
pub const DISTANCE_UNITS_PER_HOUR: f64 = 20.0;

/// Fixed time charged for each change between services (minutes).
pub const TRANSFER_PENALTY_MINS: f64 = 10.0;

/// Travel time in minutes for a distance along a route.
pub fn travel_minutes(distance: f64) -> f64 {
    distance / DISTANCE_UNITS_PER_HOUR * 60.0
}

/// Total journey time: segment ride times plus one penalty per transfer.
///
/// Both the segment assembler and the journey validator total journeys
/// through this function, so identical inputs give bit-identical results.
pub fn journey_minutes(segment_minutes: &[f64]) -> f64 {
    let riding: f64 = segment_minutes.iter().sum();
    let transfers = segment_minutes.len().saturating_sub(1);
    riding + TRANSFER_PENALTY_MINS * transfers as f64
}

/// Configuration parameters for journey planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Wall-clock budget for a single solve.
    /// A solve that runs past it reports a timeout.
    pub solve_timeout: Duration,

    /// Guide the search with a straight-line distance estimate.
    /// Only exact when route distances are never shorter than the
    /// great-circle distance between their end stops.
    pub use_heuristic: bool,

    /// Cost mode used when a request doesn't pick one.
    pub default_mode: CostMode,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(solve_timeout: Duration, use_heuristic: bool, default_mode: CostMode) -> Self {
        Self {
            solve_timeout,
            use_heuristic,
            default_mode,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            solve_timeout: Duration::from_secs(2),
            use_heuristic: false,
            default_mode: CostMode::Fastest,
        }
    }
}
