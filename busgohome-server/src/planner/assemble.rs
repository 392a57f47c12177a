//! Segment assembly.
//!
//! Folds a solved edge sequence into per-service journey segments and
//! totals the estimated time.

use crate::domain::{DomainError, Journey, JourneySegment};

use super::config::{journey_minutes, travel_minutes};
use super::graph::{Edge, RouteGraph};
use super::solver::Itinerary;

/// Build a journey from a solved itinerary.
///
/// Consecutive edges on the same service and contiguous route positions
/// form one segment. Each segment's time comes from the cumulative distances
/// at its boarding and alighting positions, which equals the sum of its edge
/// weights. The total adds the transfer penalty once per segment boundary.
///
/// An empty itinerary gives [`Journey::stationary`].
///
/// # Errors
///
/// Returns a [`DomainError`] if the edges do not form one connected path.
pub fn assemble(graph: &RouteGraph, itinerary: &Itinerary) -> Result<Journey, DomainError> {
    if itinerary.edges.is_empty() {
        return Ok(Journey::stationary());
    }

    let runs = split_runs(graph, itinerary);

    let segment_minutes: Vec<f64> = runs
        .iter()
        .map(|(first, last)| travel_minutes(last.to_distance - first.from_distance))
        .collect();

    let segments = runs
        .iter()
        .map(|(first, last)| {
            JourneySegment::new(
                first.service.clone(),
                graph.code(first.from).clone(),
                graph.code(last.to).clone(),
            )
        })
        .collect();

    Journey::new(segments, journey_minutes(&segment_minutes))
}

/// Split the edge sequence into (first edge, last edge) pairs per run.
fn split_runs<'g>(graph: &'g RouteGraph, itinerary: &Itinerary) -> Vec<(&'g Edge, &'g Edge)> {
    let mut runs: Vec<(&Edge, &Edge)> = Vec::new();
    let mut prev = None;

    for &id in &itinerary.edges {
        let edge = graph.edge(id);
        match (prev, runs.last_mut()) {
            (Some(p), Some(run)) if graph.continues(p, id) => run.1 = edge,
            _ => runs.push((edge, edge)),
        }
        prev = Some(id);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Solver;
    use crate::planner::cost::Fastest;
    use crate::planner::test_support::{TestNetwork, code, key};

    fn solve(graph: &RouteGraph, from: &str, to: &str) -> Journey {
        let it = Solver::new(graph, &Fastest)
            .solve(&code(from), &code(to))
            .unwrap();
        assemble(graph, &it).unwrap()
    }

    #[test]
    fn transfer_journey_matches_worked_example() {
        let net = TestNetwork::new()
            .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 10.0)])
            .route("20-1", &[(1, "C", 0.0), (2, "D", 6.0)])
            .build();
        let graph = RouteGraph::build(&net).unwrap();

        let journey = solve(&graph, "A", "D");

        assert_eq!(
            journey.segments(),
            &[
                JourneySegment::new(key("10-1"), code("A"), code("C")),
                JourneySegment::new(key("20-1"), code("C"), code("D")),
            ]
        );
        assert_eq!(journey.estimated_minutes(), 58.0);
    }

    #[test]
    fn single_segment() {
        let net = TestNetwork::new()
            .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 10.0)])
            .build();
        let graph = RouteGraph::build(&net).unwrap();

        let journey = solve(&graph, "A", "C");
        assert_eq!(journey.segments().len(), 1);
        assert_eq!(journey.estimated_minutes(), 30.0);
    }

    #[test]
    fn empty_itinerary_is_stationary() {
        let graph = RouteGraph::default();
        let journey = assemble(
            &graph,
            &Itinerary {
                edges: vec![],
                cost: 0.0,
                transfers: 0,
            },
        )
        .unwrap();
        assert!(journey.is_stationary());
        assert_eq!(journey.estimated_minutes(), 0.0);
    }

    #[test]
    fn loop_reboarding_splits_segments() {
        // Ride X@1 -> Y@2, then the same service again from Y's later position
        let net = TestNetwork::new()
            .route(
                "3-1",
                &[(1, "X", 0.0), (2, "Y", 2.0), (3, "Z", 3.0), (4, "Y", 4.0), (5, "W", 6.0)],
            )
            .build();
        let graph = RouteGraph::build(&net).unwrap();

        // Edges: 0 X->Y, 1 Y->Z, 2 Z->Y, 3 Y->W. Hand-built path that hops
        // from Y@2 straight onto Y@4 -> W.
        let journey = assemble(
            &graph,
            &Itinerary {
                edges: vec![
                    crate::planner::EdgeId::from_index(0),
                    crate::planner::EdgeId::from_index(3),
                ],
                cost: 0.0,
                transfers: 1,
            },
        )
        .unwrap();

        assert_eq!(journey.segments().len(), 2);
        assert_eq!(journey.segments()[0].destination, code("Y"));
        assert_eq!(journey.segments()[1].origin, code("Y"));
        // 6 + 6 + 10
        assert_eq!(journey.estimated_minutes(), 22.0);
    }

    #[test]
    fn disconnected_edges_rejected() {
        let net = TestNetwork::new()
            .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 10.0)])
            .route("20-1", &[(1, "C", 0.0), (2, "D", 6.0)])
            .build();
        let graph = RouteGraph::build(&net).unwrap();

        // Edges: 0 A->B, 1 B->C, 2 C->D. Skipping edge 1 leaves a gap at B.
        let err = assemble(
            &graph,
            &Itinerary {
                edges: vec![
                    crate::planner::EdgeId::from_index(0),
                    crate::planner::EdgeId::from_index(2),
                ],
                cost: 0.0,
                transfers: 1,
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::BrokenChain {
                index: 1,
                expected: code("B"),
                found: code("C"),
            }
        );
    }
}
