//! Journey types.
//!
//! A `Journey` is the planner's answer: the services to ride, where to board
//! and alight each, and the total estimated travel time. Journeys are built
//! per request and never stored.

use std::fmt;

use super::{DomainError, ServiceKey, StopCode};

/// A maximal run of a journey on one directional service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneySegment {
    pub service: ServiceKey,
    pub origin: StopCode,
    pub destination: StopCode,
}

impl JourneySegment {
    pub fn new(service: ServiceKey, origin: StopCode, destination: StopCode) -> Self {
        Self {
            service,
            origin,
            destination,
        }
    }
}

impl fmt::Display for JourneySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} to {}",
            self.service, self.origin, self.destination
        )
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// When built with [`Journey::new`]:
///
/// - Consecutive segments connect (destination of one = origin of next)
/// - The estimated time is finite and non-negative
///
/// A journey with no segments means origin and destination are the same stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    segments: Vec<JourneySegment>,
    estimated_minutes: f64,
}

impl Journey {
    /// Constructs a journey, checking that segments form one chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use busgohome_server::domain::{Journey, JourneySegment, ServiceKey, StopCode};
    ///
    /// let code = |s| StopCode::parse(s).unwrap();
    /// let journey = Journey::new(
    ///     vec![
    ///         JourneySegment::new(ServiceKey::parse("10-1").unwrap(), code("A"), code("C")),
    ///         JourneySegment::new(ServiceKey::parse("20-1").unwrap(), code("C"), code("D")),
    ///     ],
    ///     58.0,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(journey.segments().len(), 2);
    /// assert_eq!(journey.origin(), Some(&code("A")));
    /// assert_eq!(journey.destination(), Some(&code("D")));
    /// ```
    pub fn new(segments: Vec<JourneySegment>, estimated_minutes: f64) -> Result<Self, DomainError> {
        if !estimated_minutes.is_finite() || estimated_minutes < 0.0 {
            return Err(DomainError::InvalidTime(estimated_minutes));
        }

        for (index, pair) in segments.windows(2).enumerate() {
            if pair[0].destination != pair[1].origin {
                return Err(DomainError::BrokenChain {
                    index: index + 1,
                    expected: pair[0].destination.clone(),
                    found: pair[1].origin.clone(),
                });
            }
        }

        Ok(Self {
            segments,
            estimated_minutes,
        })
    }

    /// Wraps segments without checking them, for feeding malformed journeys
    /// to the validator.
    #[cfg(test)]
    pub(crate) fn unchecked(segments: Vec<JourneySegment>, estimated_minutes: f64) -> Self {
        Self {
            segments,
            estimated_minutes,
        }
    }

    /// The journey for an origin that is also the destination.
    pub fn stationary() -> Self {
        Self {
            segments: Vec::new(),
            estimated_minutes: 0.0,
        }
    }

    /// Returns the journey segments in travel order.
    pub fn segments(&self) -> &[JourneySegment] {
        &self.segments
    }

    /// Returns the total estimated time in minutes, transfers included.
    pub fn estimated_minutes(&self) -> f64 {
        self.estimated_minutes
    }

    /// Returns the boarding stop of the first segment.
    pub fn origin(&self) -> Option<&StopCode> {
        self.segments.first().map(|s| &s.origin)
    }

    /// Returns the alighting stop of the last segment.
    pub fn destination(&self) -> Option<&StopCode> {
        self.segments.last().map(|s| &s.destination)
    }

    /// Returns true if there is nothing to ride.
    pub fn is_stationary(&self) -> bool {
        self.segments.is_empty()
    }
}
