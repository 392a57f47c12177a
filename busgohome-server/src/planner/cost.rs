//! Path cost strategies.
//!
//! The solver ranks paths by a [`CostModel`]. The cost only steers which
//! path is chosen; the journey's estimated time is always computed from ride
//! times and the fixed transfer penalty.

use super::config::TRANSFER_PENALTY_MINS;
use super::graph::Edge;

/// Transfer cost used by [`Scenic`], in minutes.
pub const SCENIC_TRANSFER_COST: f64 = 60.0;

/// Edge and transfer costs for path search.
///
/// Costs must be non-negative for the search to be exact.
pub trait CostModel: Send + Sync {
    /// Cost of riding one edge.
    fn edge_cost(&self, edge: &Edge) -> f64;

    /// Cost of boarding a different service, or the same service at a
    /// different route position.
    fn transfer_cost(&self) -> f64;
}

/// Minimise estimated travel time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fastest;

impl CostModel for Fastest {
    fn edge_cost(&self, edge: &Edge) -> f64 {
        edge.minutes
    }

    fn transfer_cost(&self) -> f64 {
        TRANSFER_PENALTY_MINS
    }
}

/// Prefer long unbroken rides over interchanges.
///
/// Each transfer costs an hour, so the planner only changes bus when that
/// saves more than an hour of riding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scenic;

impl CostModel for Scenic {
    fn edge_cost(&self, edge: &Edge) -> f64 {
        edge.minutes
    }

    fn transfer_cost(&self) -> f64 {
        SCENIC_TRANSFER_COST
    }
}

/// Which cost model a request wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostMode {
    #[default]
    Fastest,
    Scenic,
}

impl CostMode {
    /// Returns the cost model for this mode.
    pub fn model(self) -> &'static dyn CostModel {
        match self {
            CostMode::Fastest => &Fastest,
            CostMode::Scenic => &Scenic,
        }
    }
}
