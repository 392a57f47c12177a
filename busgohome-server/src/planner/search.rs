//! Journey planning facade.
//!
//! Ties the solver and the segment assembler together under a
//! [`PlannerConfig`]: picks the cost model, applies the solve deadline and
//! turns the solved path into a [`Journey`].

use std::time::Instant;

use tracing::debug;

use crate::domain::{Journey, StopCode};

use super::assemble::assemble;
use super::config::PlannerConfig;
use super::cost::CostMode;
use super::graph::RouteGraph;
use super::solver::{PlanError, Solver};

/// Request for a journey between two stops.
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    pub origin: StopCode,
    pub destination: StopCode,

    /// Cost mode; `None` uses the configured default.
    pub mode: Option<CostMode>,
}

impl JourneyRequest {
    /// Create a request using the default cost mode.
    pub fn new(origin: StopCode, destination: StopCode) -> Self {
        Self {
            origin,
            destination,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: CostMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Journey planner over one route graph snapshot.
pub struct Planner<'a> {
    graph: &'a RouteGraph,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a RouteGraph, config: &'a PlannerConfig) -> Self {
        Self { graph, config }
    }

    /// Plan the minimum-cost journey for a request.
    ///
    /// The estimated time on the result always counts real ride time plus
    /// the standard transfer penalty, whichever cost mode chose the path.
    ///
    /// # Errors
    ///
    /// - [`PlanError::NoSuchStop`] if either stop is not on any route
    /// - [`PlanError::NoPathFound`] if no sequence of services connects them
    /// - [`PlanError::Timeout`] if the search runs past the configured timeout
    /// - [`PlanError::InvalidJourney`] if the solved path does not chain
    pub fn plan(&self, request: &JourneyRequest) -> Result<Journey, PlanError> {
        let mode = request.mode.unwrap_or(self.config.default_mode);
        let deadline = Instant::now() + self.config.solve_timeout;

        let itinerary = Solver::new(self.graph, mode.model())
            .with_deadline(deadline)
            .with_heuristic(self.config.use_heuristic)
            .solve(&request.origin, &request.destination)?;

        let journey = assemble(self.graph, &itinerary)?;

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            ?mode,
            segments = journey.segments().len(),
            minutes = journey.estimated_minutes(),
            "Planned journey"
        );

        Ok(journey)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
