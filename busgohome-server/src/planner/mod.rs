//! Journey planning engine.
//!
//! Builds a weighted graph from route data, finds the minimum-cost path
//! between two stops with a transfer-aware shortest-path search, and folds
//! that path into journey segments.
//!
//! The pieces:
//!
//! - [`RouteGraph`]: one node per stop, one edge per consecutive route stop pair
//! - [`Solver`]: Dijkstra/A* over (stop, ride) states
//! - [`assemble`]: edges to [`Journey`](crate::domain::Journey) segments
//! - [`Planner`]: the above under a [`PlannerConfig`]
//! - [`SnapshotStore`]: the current immutable (network, graph) pair

mod assemble;
mod config;
pub mod cost;
mod graph;
mod search;
mod snapshot;
mod solver;

#[cfg(test)]
pub(crate) mod test_support;

pub use assemble::assemble;
pub use config::{
    DISTANCE_UNITS_PER_HOUR, PlannerConfig, TRANSFER_PENALTY_MINS, journey_minutes,
    travel_minutes,
};
pub use cost::{CostMode, CostModel, Fastest, Scenic};
pub use graph::{Edge, EdgeId, GraphError, MalformedReason, NodeId, RouteGraph};
pub use search::{JourneyRequest, Planner};
pub use snapshot::{Snapshot, SnapshotStore};
pub use solver::{Itinerary, PlanError, Solver};
