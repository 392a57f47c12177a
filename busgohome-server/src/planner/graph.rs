//! Weighted route graph.
//!
//! One node per distinct stop code, one directed edge per pair of
//! consecutive route stops. Edges keep their owning [`ServiceKey`] and route
//! positions, and parallel edges from different services are kept apart.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{Location, RouteStop, ServiceKey, StopCode};
use crate::network::RouteDataProvider;

use super::config::travel_minutes;

/// Index of a stop node.
///
/// Nodes are numbered in ascending stop code order, so comparing ids
/// compares codes lexically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        EdgeId(index as u32)
    }
}

/// A directed hop between consecutive stops of one service.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub service: ServiceKey,
    pub from_sequence: u32,
    pub to_sequence: u32,
    pub from_distance: f64,
    pub to_distance: f64,
    /// Ride time in minutes.
    pub minutes: f64,
}

/// Why a route was rejected at build time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    #[error("sequence {sequence} appears more than once")]
    DuplicateSequence { sequence: u32 },

    #[error("distance decreases by {delta} between sequence {from_sequence} and {to_sequence}")]
    NegativeDistance {
        from_sequence: u32,
        to_sequence: u32,
        delta: f64,
    },

    #[error("distance at sequence {sequence} is not a finite number")]
    NonFiniteDistance { sequence: u32 },
}

/// Error from building the route graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("malformed route data for service {service}: {reason}")]
    MalformedRouteData {
        service: ServiceKey,
        reason: MalformedReason,
    },
}

/// Immutable weighted directed graph of bus stops.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    codes: Vec<StopCode>,
    locations: Vec<Option<Location>>,
    index: HashMap<StopCode, NodeId>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl RouteGraph {
    /// Build the graph from every route the provider knows.
    pub fn build<P: RouteDataProvider>(provider: &P) -> Result<Self, GraphError> {
        Self::build_filtered(provider, |_| true)
    }

    /// Build the graph from the routes whose service passes `keep`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedRouteData`] if a route repeats a
    /// sequence number, has a non-finite distance, or has a distance that
    /// decreases along the route.
    pub fn build_filtered<P, F>(provider: &P, keep: F) -> Result<Self, GraphError>
    where
        P: RouteDataProvider,
        F: Fn(&ServiceKey) -> bool,
    {
        let routes: Vec<(&ServiceKey, &[RouteStop])> =
            provider.routes().filter(|(key, _)| keep(*key)).collect();

        for (service, route) in &routes {
            check_route(service, route)?;
        }

        let distinct: BTreeSet<&StopCode> = routes
            .iter()
            .flat_map(|(_, route)| route.iter().map(|r| &r.stop))
            .collect();

        let codes: Vec<StopCode> = distinct.into_iter().cloned().collect();
        let index: HashMap<StopCode, NodeId> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), NodeId(i as u32)))
            .collect();
        let locations = codes
            .iter()
            .map(|code| provider.stop(code).map(|s| s.location))
            .collect();

        let mut edges = Vec::new();
        let mut outgoing = vec![Vec::new(); codes.len()];

        for (service, route) in &routes {
            for pair in route.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let from = index[&a.stop];
                let to = index[&b.stop];
                let id = EdgeId(edges.len() as u32);

                edges.push(Edge {
                    from,
                    to,
                    service: (*service).clone(),
                    from_sequence: a.sequence,
                    to_sequence: b.sequence,
                    from_distance: a.distance,
                    to_distance: b.distance,
                    minutes: travel_minutes(b.distance - a.distance),
                });
                outgoing[from.index()].push(id);
            }
        }

        debug!(
            nodes = codes.len(),
            edges = edges.len(),
            services = routes.len(),
            "Built route graph"
        );

        Ok(Self {
            codes,
            locations,
            index,
            edges,
            outgoing,
        })
    }

    /// Look up the node for a stop code.
    pub fn node(&self, code: &StopCode) -> Option<NodeId> {
        self.index.get(code).copied()
    }

    /// Returns the stop code of a node.
    pub fn code(&self, node: NodeId) -> &StopCode {
        &self.codes[node.index()]
    }

    /// Returns the location of a node's stop, if the stop is known.
    pub fn location(&self, node: NodeId) -> Option<Location> {
        self.locations[node.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Edges leaving a node, in build order.
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        &self.outgoing[node.index()]
    }

    /// Returns true if `next` carries on along the same route from where
    /// `prev` arrived, so riding it needs no transfer.
    pub fn continues(&self, prev: EdgeId, next: EdgeId) -> bool {
        let (p, n) = (self.edge(prev), self.edge(next));
        p.service == n.service && p.to_sequence == n.from_sequence
    }

    pub fn node_count(&self) -> usize {
        self.codes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn check_route(service: &ServiceKey, route: &[RouteStop]) -> Result<(), GraphError> {
    let malformed = |reason| GraphError::MalformedRouteData {
        service: service.clone(),
        reason,
    };

    for r in route {
        if !r.distance.is_finite() {
            return Err(malformed(MalformedReason::NonFiniteDistance {
                sequence: r.sequence,
            }));
        }
    }

    for pair in route.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.sequence >= b.sequence {
            return Err(malformed(MalformedReason::DuplicateSequence {
                sequence: b.sequence,
            }));
        }
        let delta = b.distance - a.distance;
        if delta < 0.0 {
            return Err(malformed(MalformedReason::NegativeDistance {
                from_sequence: a.sequence,
                to_sequence: b.sequence,
                delta,
            }));
        }
    }

    Ok(())
}
