//! Unit tests for the journey planning facade.

use std::time::Duration;

use super::*;
use crate::domain::JourneySegment;
use crate::network::RouteNetwork;
use crate::planner::test_support::{TestNetwork, code, key};
use crate::validate::validate_journey;

fn worked_example() -> RouteNetwork {
    TestNetwork::new()
        .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 10.0)])
        .route("20-1", &[(1, "C", 0.0), (2, "D", 6.0)])
        .build()
}

fn plan(net: &RouteNetwork, from: &str, to: &str) -> Result<Journey, PlanError> {
    let graph = RouteGraph::build(net).unwrap();
    let config = PlannerConfig::default();
    Planner::new(&graph, &config).plan(&JourneyRequest::new(code(from), code(to)))
}

#[test]
fn worked_example_transfer_journey() {
    let net = worked_example();
    let journey = plan(&net, "A", "D").unwrap();

    assert_eq!(
        journey.segments(),
        &[
            JourneySegment::new(key("10-1"), code("A"), code("C")),
            JourneySegment::new(key("20-1"), code("C"), code("D")),
        ]
    );
    assert_eq!(journey.estimated_minutes(), 58.0);
    assert_eq!(
        validate_journey(&net, &code("A"), &code("D"), &journey),
        Ok(58.0)
    );
}

#[test]
fn single_segment_journey() {
    let net = worked_example();
    let journey = plan(&net, "A", "C").unwrap();

    assert_eq!(journey.segments().len(), 1);
    assert_eq!(journey.estimated_minutes(), 30.0);
}

#[test]
fn loop_route_resolves_later_occurrence() {
    // X appears at sequence 1 and 10; Y near the end at 11
    let mut rows: Vec<(u32, String, f64)> = vec![(1, "X".to_string(), 0.0)];
    for seq in 2..10 {
        rows.push((seq, format!("P{seq}"), f64::from(seq)));
    }
    rows.push((10, "X".to_string(), 12.0));
    rows.push((11, "Y".to_string(), 14.0));
    let rows: Vec<(u32, &str, f64)> = rows.iter().map(|(s, c, d)| (*s, c.as_str(), *d)).collect();
    let net = TestNetwork::new().route("7-1", &rows).build();

    let journey = plan(&net, "X", "Y").unwrap();

    assert_eq!(
        journey.segments(),
        &[JourneySegment::new(key("7-1"), code("X"), code("Y"))]
    );
    // Boards at X@10: 2 units
    assert_eq!(journey.estimated_minutes(), 6.0);
    assert_eq!(
        validate_journey(&net, &code("X"), &code("Y"), &journey),
        Ok(6.0)
    );
}

#[test]
fn loop_ride_through_terminus_is_one_segment() {
    let net = TestNetwork::new()
        .route(
            "3-1",
            &[(1, "X", 0.0), (2, "Y", 2.0), (3, "X", 4.0), (4, "W", 5.0)],
        )
        .build();

    let journey = plan(&net, "Y", "W").unwrap();

    assert_eq!(
        journey.segments(),
        &[JourneySegment::new(key("3-1"), code("Y"), code("W"))]
    );
    assert_eq!(journey.estimated_minutes(), 9.0);
}

#[test]
fn unknown_stop_is_not_found() {
    let net = worked_example();

    let err = plan(&net, "A", "ZZZ").unwrap_err();
    assert_eq!(err, PlanError::NoSuchStop(code("ZZZ")));
    assert!(err.is_not_found());
}

#[test]
fn stop_without_routes_is_not_found() {
    // Known to the network but served by nothing, so it has no graph node
    let net = TestNetwork::new()
        .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0)])
        .stop("Q")
        .build();

    assert_eq!(plan(&net, "A", "Q"), Err(PlanError::NoSuchStop(code("Q"))));
}

#[test]
fn disconnected_stops_are_not_found() {
    let net = TestNetwork::new()
        .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0)])
        .route("20-1", &[(1, "C", 0.0), (2, "D", 4.0)])
        .build();

    let err = plan(&net, "A", "D").unwrap_err();
    assert!(matches!(err, PlanError::NoPathFound { .. }));
    assert!(err.is_not_found());
}

#[test]
fn origin_equals_destination_is_stationary() {
    let net = worked_example();
    let journey = plan(&net, "B", "B").unwrap();

    assert!(journey.is_stationary());
    assert_eq!(journey.estimated_minutes(), 0.0);
}

#[test]
fn scenic_mode_keeps_real_time_accounting() {
    // Fastest changes at B; scenic stays on 10 for the whole ride
    let net = TestNetwork::new()
        .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 20.0)])
        .route("20-1", &[(1, "B", 0.0), (2, "C", 3.0)])
        .build();
    let graph = RouteGraph::build(&net).unwrap();
    let config = PlannerConfig::default();
    let planner = Planner::new(&graph, &config);
    let request = JourneyRequest::new(code("A"), code("C"));

    let fastest = planner.plan(&request).unwrap();
    assert_eq!(fastest.segments().len(), 2);
    assert_eq!(fastest.estimated_minutes(), 31.0);

    let scenic = planner
        .plan(&request.clone().with_mode(CostMode::Scenic))
        .unwrap();
    assert_eq!(scenic.segments().len(), 1);
    // Riding time only: no hour-long transfer charge leaks into the answer
    assert_eq!(scenic.estimated_minutes(), 60.0);
    assert_eq!(
        validate_journey(&net, &code("A"), &code("C"), &scenic),
        Ok(60.0)
    );
}

#[test]
fn configured_default_mode_applies() {
    let net = TestNetwork::new()
        .route("10-1", &[(1, "A", 0.0), (2, "B", 4.0), (3, "C", 20.0)])
        .route("20-1", &[(1, "B", 0.0), (2, "C", 3.0)])
        .build();
    let graph = RouteGraph::build(&net).unwrap();
    let config = PlannerConfig::new(Duration::from_secs(2), false, CostMode::Scenic);

    let journey = Planner::new(&graph, &config)
        .plan(&JourneyRequest::new(code("A"), code("C")))
        .unwrap();
    assert_eq!(journey.segments().len(), 1);
}

#[test]
fn zero_timeout_still_answers_small_searches() {
    // Deadline checks only run every few hundred pops
    let net = worked_example();
    let graph = RouteGraph::build(&net).unwrap();
    let config = PlannerConfig::new(Duration::ZERO, false, CostMode::Fastest);

    let journey = Planner::new(&graph, &config)
        .plan(&JourneyRequest::new(code("A"), code("D")))
        .unwrap();
    assert_eq!(journey.estimated_minutes(), 58.0);
}

#[test]
fn heuristic_gives_same_journey() {
    let net = TestNetwork::new()
        .route_with_locations(
            "10-1",
            &[
                (1, "A", 0.0, 1.30, 103.80),
                (2, "B", 4.0, 1.30, 103.83),
                (3, "C", 10.0, 1.30, 103.87),
            ],
        )
        .route_with_locations(
            "20-1",
            &[(1, "C", 0.0, 1.30, 103.87), (2, "D", 6.0, 1.30, 103.91)],
        )
        .build();
    let graph = RouteGraph::build(&net).unwrap();
    let plain = PlannerConfig::default();
    let guided = PlannerConfig::new(Duration::from_secs(2), true, CostMode::Fastest);
    let request = JourneyRequest::new(code("A"), code("D"));

    assert_eq!(
        Planner::new(&graph, &plain).plan(&request),
        Planner::new(&graph, &guided).plan(&request)
    );
}
