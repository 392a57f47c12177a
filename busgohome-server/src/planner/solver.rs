//! Itinerary solver.
//!
//! Minimum-cost path search over (stop, ride) states, where the ride is the
//! edge the search arrived by. Carrying the ride lets the search charge a
//! transfer only when the next edge does not continue the current bus: a
//! different service, or the same service boarded at another route position.
//!
//! The search is Dijkstra's algorithm, optionally guided by a straight-line
//! distance estimate (A*). Ties are broken deterministically by fewer
//! transfers, then lower stop code, then lower edge index.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::domain::{DomainError, Location, StopCode};
use crate::nearby::haversine_km;

use super::config::travel_minutes;
use super::cost::CostModel;
use super::graph::{EdgeId, NodeId, RouteGraph};

/// How many heap pops pass between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// State index of the origin, before boarding anything.
const ORIGIN_STATE: usize = 0;

/// Error from journey planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The stop is not served by any route in the graph
    #[error("no such stop: {0}")]
    NoSuchStop(StopCode),

    /// Both stops exist but no sequence of services connects them
    #[error("no path from {origin} to {destination}")]
    NoPathFound {
        origin: StopCode,
        destination: StopCode,
    },

    /// The search ran past its deadline
    #[error("journey search timed out")]
    Timeout,

    /// The solved path did not assemble into a valid journey
    #[error("invalid journey: {0}")]
    InvalidJourney(#[from] DomainError),
}

impl PlanError {
    /// Returns true for outcomes that mean "no journey" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanError::NoSuchStop(_) | PlanError::NoPathFound { .. })
    }
}

/// A solved path through the route graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Edges in travel order. Empty when origin is the destination.
    pub edges: Vec<EdgeId>,

    /// Total cost under the cost model that found it.
    pub cost: f64,

    /// Number of boardings after the first.
    pub transfers: usize,
}

impl Itinerary {
    fn empty() -> Self {
        Self {
            edges: Vec::new(),
            cost: 0.0,
            transfers: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Label {
    cost: f64,
    transfers: usize,
    parent: Option<usize>,
}

impl Label {
    fn improves(&self, other: &Label) -> bool {
        match self.cost.total_cmp(&other.cost) {
            Ordering::Less => true,
            Ordering::Equal => self.transfers < other.transfers,
            Ordering::Greater => false,
        }
    }
}

/// Heap entry. Ordered so that `BinaryHeap` pops the best entry first.
#[derive(Debug)]
struct Entry {
    priority: f64,
    cost: f64,
    transfers: usize,
    node: NodeId,
    state: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: lower priority, fewer transfers, lower stop, lower edge
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.transfers.cmp(&self.transfers))
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Shortest-path search over a [`RouteGraph`].
pub struct Solver<'a> {
    graph: &'a RouteGraph,
    cost: &'a dyn CostModel,
    deadline: Option<Instant>,
    use_heuristic: bool,
}

impl<'a> Solver<'a> {
    /// Create a solver with no deadline and no heuristic.
    pub fn new(graph: &'a RouteGraph, cost: &'a dyn CostModel) -> Self {
        Self {
            graph,
            cost,
            deadline: None,
            use_heuristic: false,
        }
    }

    /// Give up with [`PlanError::Timeout`] once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Guide the search with the straight-line distance to the destination.
    pub fn with_heuristic(mut self, enabled: bool) -> Self {
        self.use_heuristic = enabled;
        self
    }

    /// Find the minimum-cost path from `origin` to `destination`.
    pub fn solve(&self, origin: &StopCode, destination: &StopCode) -> Result<Itinerary, PlanError> {
        let origin_node = self
            .graph
            .node(origin)
            .ok_or_else(|| PlanError::NoSuchStop(origin.clone()))?;
        let dest_node = self
            .graph
            .node(destination)
            .ok_or_else(|| PlanError::NoSuchStop(destination.clone()))?;

        if origin_node == dest_node {
            return Ok(Itinerary::empty());
        }

        let target = if self.use_heuristic {
            self.graph.location(dest_node)
        } else {
            None
        };

        let state_count = self.graph.edge_count() + 1;
        let mut labels: Vec<Option<Label>> = vec![None; state_count];
        let mut settled = vec![false; state_count];
        let mut heap = BinaryHeap::new();

        labels[ORIGIN_STATE] = Some(Label {
            cost: 0.0,
            transfers: 0,
            parent: None,
        });
        heap.push(Entry {
            priority: self.estimate(origin_node, target),
            cost: 0.0,
            transfers: 0,
            node: origin_node,
            state: ORIGIN_STATE,
        });

        let mut popped = 0usize;

        while let Some(entry) = heap.pop() {
            popped += 1;
            if popped % DEADLINE_CHECK_INTERVAL == 0
                && self.deadline.is_some_and(|d| Instant::now() >= d)
            {
                debug!(%origin, %destination, popped, "Journey search hit deadline");
                return Err(PlanError::Timeout);
            }

            if settled[entry.state] {
                continue;
            }
            settled[entry.state] = true;

            if entry.node == dest_node {
                let itinerary = Itinerary {
                    edges: backtrack(&labels, entry.state),
                    cost: entry.cost,
                    transfers: entry.transfers,
                };
                debug!(
                    %origin,
                    %destination,
                    popped,
                    cost = itinerary.cost,
                    transfers = itinerary.transfers,
                    "Solved itinerary"
                );
                return Ok(itinerary);
            }

            let ride = ride_of(entry.state);

            for &next in self.graph.outgoing(entry.node) {
                let state = next.index() + 1;
                if settled[state] {
                    continue;
                }

                let edge = self.graph.edge(next);
                let boarding = ride.is_some_and(|prev| !self.graph.continues(prev, next));

                let mut step = self.cost.edge_cost(edge);
                if boarding {
                    step += self.cost.transfer_cost();
                }

                let candidate = Label {
                    cost: entry.cost + step,
                    transfers: entry.transfers + usize::from(boarding),
                    parent: Some(entry.state),
                };

                if labels[state]
                    .as_ref()
                    .is_some_and(|best| !candidate.improves(best))
                {
                    continue;
                }

                trace!(
                    from = %self.graph.code(entry.node),
                    to = %self.graph.code(edge.to),
                    service = %edge.service,
                    cost = candidate.cost,
                    "Relaxed edge"
                );

                heap.push(Entry {
                    priority: candidate.cost + self.estimate(edge.to, target),
                    cost: candidate.cost,
                    transfers: candidate.transfers,
                    node: edge.to,
                    state,
                });
                labels[state] = Some(candidate);
            }
        }

        debug!(%origin, %destination, popped, "No path found");
        Err(PlanError::NoPathFound {
            origin: origin.clone(),
            destination: destination.clone(),
        })
    }

    /// Lower bound on the remaining ride time from `node`.
    fn estimate(&self, node: NodeId, target: Option<Location>) -> f64 {
        match (target, self.graph.location(node)) {
            (Some(target), Some(here)) => travel_minutes(haversine_km(here, target)),
            _ => 0.0,
        }
    }
}

/// The edge a state arrived by, if any.
fn ride_of(state: usize) -> Option<EdgeId> {
    state.checked_sub(1).map(EdgeId::from_index)
}

fn backtrack(labels: &[Option<Label>], mut state: usize) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    while let Some(edge) = ride_of(state) {
        edges.push(edge);
        state = match labels[state].as_ref().and_then(|l| l.parent) {
            Some(parent) => parent,
            None => break,
        };
    }
    edges.reverse();
    edges
}
