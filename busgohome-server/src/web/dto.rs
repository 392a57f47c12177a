//! Data transfer objects for web requests and responses.
//!
//! Field names follow the LTA DataMall JSON conventions the data files use.

use serde::{Deserialize, Serialize};

use crate::domain::{BusStop, Journey, JourneySegment, ServiceKey};
use crate::planner::CostMode;
use crate::ratings::RatingSummary;

/// GeoJSON point, `[longitude, latitude]`.
#[derive(Debug, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: [f64; 2],
}

/// A bus stop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BusStopDto {
    pub bus_stop_code: String,
    pub road_name: String,
    pub description: String,
    pub location: GeoPoint,
}

impl BusStopDto {
    pub fn from_stop(stop: &BusStop) -> Self {
        Self {
            bus_stop_code: stop.code.to_string(),
            road_name: stop.road_name.clone(),
            description: stop.description.clone(),
            location: GeoPoint {
                kind: "Point",
                coordinates: [stop.location.longitude, stop.location.latitude],
            },
        }
    }
}

/// One ride in a planned journey.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SegmentDto {
    pub service_no: String,
    pub direction: u8,
    pub origin_code: String,
    pub destination_code: String,
}

impl SegmentDto {
    pub fn from_segment(segment: &JourneySegment) -> Self {
        Self {
            service_no: segment.service.service_no.to_string(),
            direction: segment.service.direction.get(),
            origin_code: segment.origin.to_string(),
            destination_code: segment.destination.to_string(),
        }
    }
}

/// Response for a journey query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    pub segments: Vec<SegmentDto>,

    /// Minutes, transfers included
    pub estimated_time: f64,
}

impl JourneyResponse {
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            segments: journey
                .segments()
                .iter()
                .map(SegmentDto::from_segment)
                .collect(),
            estimated_time: journey.estimated_minutes(),
        }
    }
}

/// Rating statistics for a service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingResponse {
    pub service_no: String,
    pub direction: u8,
    pub avg_rating: f64,
    pub num_ratings: u32,
}

impl RatingResponse {
    pub fn new(service: &ServiceKey, summary: RatingSummary) -> Self {
        Self {
            service_no: service.service_no.to_string(),
            direction: service.direction.get(),
            avg_rating: summary.average,
            num_ratings: summary.count,
        }
    }
}

/// Query parameters for the nearby stops search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    /// Search radius in km
    pub max_distance: Option<String>,
}

/// Query parameters for journey planning.
#[derive(Debug, Default, Deserialize)]
pub struct JourneyQuery {
    pub scenic: Option<String>,
}

impl JourneyQuery {
    /// Scenic mode for any value except empty, `false`, `0` or `no`.
    pub fn mode(&self) -> CostMode {
        let Some(value) = self.scenic.as_deref() else {
            return CostMode::Fastest;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "0" | "no" => CostMode::Fastest,
            _ => CostMode::Scenic,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, StopCode};
    use serde_json::json;

    #[test]
    fn bus_stop_uses_geojson_location() {
        let stop = BusStop {
            code: StopCode::parse("01012").unwrap(),
            road_name: "Victoria St".to_string(),
            description: "Hotel Grand Pacific".to_string(),
            location: Location::new(1.29684825487647, 103.85253591654006),
        };

        let value = serde_json::to_value(BusStopDto::from_stop(&stop)).unwrap();
        assert_eq!(
            value,
            json!({
                "BusStopCode": "01012",
                "RoadName": "Victoria St",
                "Description": "Hotel Grand Pacific",
                "Location": {
                    "type": "Point",
                    "coordinates": [103.85253591654006, 1.29684825487647]
                }
            })
        );
    }

    #[test]
    fn journey_response_shape() {
        let code = |s| StopCode::parse(s).unwrap();
        let journey = Journey::new(
            vec![JourneySegment::new(
                ServiceKey::parse("10e-2").unwrap(),
                code("A"),
                code("C"),
            )],
            30.0,
        )
        .unwrap();

        let value = serde_json::to_value(JourneyResponse::from_journey(&journey)).unwrap();
        assert_eq!(
            value,
            json!({
                "segments": [{
                    "ServiceNo": "10e",
                    "Direction": 2,
                    "OriginCode": "A",
                    "DestinationCode": "C"
                }],
                "estimatedTime": 30.0
            })
        );
    }

    #[test]
    fn scenic_flag_truthiness() {
        let mode = |v: Option<&str>| {
            JourneyQuery {
                scenic: v.map(str::to_string),
            }
            .mode()
        };

        assert_eq!(mode(None), CostMode::Fastest);
        assert_eq!(mode(Some("false")), CostMode::Fastest);
        assert_eq!(mode(Some("0")), CostMode::Fastest);
        assert_eq!(mode(Some("")), CostMode::Fastest);
        assert_eq!(mode(Some("truth")), CostMode::Scenic);
        assert_eq!(mode(Some("TRUE")), CostMode::Scenic);
    }
}
