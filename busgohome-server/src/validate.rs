//! Journey validator.
//!
//! Re-derives a journey's segment times from raw route data and checks the
//! journey against them. Independent of the graph and solver, so it can be
//! used as an oracle for planner output.

use crate::domain::{Journey, JourneySegment, RouteStop, StopCode};
use crate::network::RouteDataProvider;
use crate::planner::{journey_minutes, travel_minutes};

/// Why a journey was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("journey has no segments")]
    EmptyJourney,

    #[error("journey starts at {actual}, expected {expected}")]
    OriginMismatch { expected: StopCode, actual: StopCode },

    #[error("journey ends at {actual}, expected {expected}")]
    DestinationMismatch { expected: StopCode, actual: StopCode },

    #[error("segment {index} ({segment}) starts at {actual}, expected {expected}")]
    BrokenChain {
        index: usize,
        segment: JourneySegment,
        expected: StopCode,
        actual: StopCode,
    },

    #[error("segment {segment}: expected 2 matching stops on the service route, found {found}")]
    StopsNotOnRoute { segment: JourneySegment, found: usize },

    #[error(
        "segment {segment}: boarding at sequence {origin_sequence} does not precede alighting at sequence {destination_sequence}"
    )]
    SegmentOrdering {
        segment: JourneySegment,
        origin_sequence: u32,
        destination_sequence: u32,
    },

    #[error("estimated time is {actual}, expected {expected}")]
    TimeMismatch { expected: f64, actual: f64 },
}

/// Check a journey from `origin` to `destination` against route data.
///
/// Each segment is located on its service's route by taking the two
/// highest-sequence route stops whose code matches either end of the
/// segment. On a loop route this picks the occurrences closest to the end
/// of the route. The lower of the two must be the boarding stop and the
/// higher the alighting stop.
///
/// Returns the recomputed total time in minutes on success.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, carrying the expected and
/// actual values.
pub fn validate_journey<P: RouteDataProvider>(
    provider: &P,
    origin: &StopCode,
    destination: &StopCode,
    journey: &Journey,
) -> Result<f64, ValidationError> {
    let segments = journey.segments();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Err(ValidationError::EmptyJourney);
    };

    if &first.origin != origin {
        return Err(ValidationError::OriginMismatch {
            expected: origin.clone(),
            actual: first.origin.clone(),
        });
    }
    if &last.destination != destination {
        return Err(ValidationError::DestinationMismatch {
            expected: destination.clone(),
            actual: last.destination.clone(),
        });
    }

    for (index, pair) in segments.windows(2).enumerate() {
        if pair[0].destination != pair[1].origin {
            return Err(ValidationError::BrokenChain {
                index: index + 1,
                segment: pair[1].clone(),
                expected: pair[0].destination.clone(),
                actual: pair[1].origin.clone(),
            });
        }
    }

    let segment_minutes = segments
        .iter()
        .map(|segment| segment_minutes(provider, segment))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = journey_minutes(&segment_minutes);
    if expected != journey.estimated_minutes() {
        return Err(ValidationError::TimeMismatch {
            expected,
            actual: journey.estimated_minutes(),
        });
    }

    Ok(expected)
}

/// Ride time of one segment, from the route's cumulative distances.
fn segment_minutes<P: RouteDataProvider>(
    provider: &P,
    segment: &JourneySegment,
) -> Result<f64, ValidationError> {
    let route = provider.route(&segment.service).unwrap_or_default();
    let is_end = |r: &&RouteStop| r.stop == segment.origin || r.stop == segment.destination;

    let mut matches = route.iter().rev().filter(is_end);
    let (Some(higher), Some(lower)) = (matches.next(), matches.next()) else {
        return Err(ValidationError::StopsNotOnRoute {
            segment: segment.clone(),
            found: route.iter().filter(is_end).count(),
        });
    };

    check_order(segment, lower, higher)?;
    Ok(travel_minutes(higher.distance - lower.distance))
}

fn check_order(
    segment: &JourneySegment,
    lower: &RouteStop,
    higher: &RouteStop,
) -> Result<(), ValidationError> {
    let ordered = lower.stop == segment.origin
        && higher.stop == segment.destination
        && lower.sequence < higher.sequence;

    if ordered {
        Ok(())
    } else {
        // Report the sequences in segment order: where each end was found
        let (origin_sequence, destination_sequence) = if higher.stop == segment.origin {
            (higher.sequence, lower.sequence)
        } else {
            (lower.sequence, higher.sequence)
        };
        Err(ValidationError::SegmentOrdering {
            segment: segment.clone(),
            origin_sequence,
            destination_sequence,
        })
    }
}
