//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::{Location, ServiceKey, StopCode};
use crate::nearby::{DEFAULT_RADIUS_KM, stops_within};
use crate::network::RouteDataProvider;
use crate::planner::{JourneyRequest, PlanError, Planner};
use crate::ratings::Rating;
use crate::roads::stops_on_road;

use super::dto::*;
use super::state::AppState;

const NOT_FOUND: &str = "Not found";
const INVALID_RATING: &str = "Invalid rating";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops/:code", get(get_stop))
        .route("/services/:service/stops", get(service_stops))
        .route("/services/:service/rating", get(get_rating).post(submit_rating))
        .route("/locations/:location/nearbyStops", get(nearby_stops))
        .route("/roads/:road/stops", get(road_stops))
        .route("/journeys/:stops", get(plan_journey))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up one bus stop.
async fn get_stop(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<BusStopDto>, AppError> {
    let code = parse_stop_code(&code)?;
    let snapshot = state.snapshot.current();

    let stop = snapshot.network.stop(&code).ok_or_else(AppError::not_found)?;
    Ok(Json(BusStopDto::from_stop(stop)))
}

/// The stops along a service's route, in order.
async fn service_stops(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<Vec<BusStopDto>>, AppError> {
    let service = parse_service(&service)?;
    let snapshot = state.snapshot.current();

    let stops = snapshot.network.stops_along(&service);
    if stops.is_empty() {
        return Err(AppError::not_found());
    }
    Ok(Json(stops.into_iter().map(BusStopDto::from_stop).collect()))
}

/// Stops within a radius of a `{longitude}-{latitude}` point.
async fn nearby_stops(
    State(state): State<AppState>,
    Path(location): Path<String>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<BusStopDto>>, AppError> {
    let centre = parse_location(&location)?;
    let radius = match query.max_distance.as_deref() {
        Some(value) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| AppError::BadRequest {
                message: format!("Invalid maxDistance: {value}"),
            })?,
        None => DEFAULT_RADIUS_KM,
    };

    let snapshot = state.snapshot.current();
    if snapshot.network.stop_count() == 0 {
        return Err(AppError::not_found());
    }

    let stops = stops_within(snapshot.network.stops(), centre, radius);
    Ok(Json(stops.into_iter().map(BusStopDto::from_stop).collect()))
}

/// Rating statistics for a service.
async fn get_rating(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<RatingResponse>, AppError> {
    let service = parse_service(&service)?;
    if !state.snapshot.current().network.has_service(&service) {
        return Err(AppError::not_found());
    }

    let summary = state.ratings.get(&service).await;
    Ok(Json(RatingResponse::new(&service, summary)))
}

/// Submit a rating from 1 to 5 for a service.
async fn submit_rating(
    State(state): State<AppState>,
    Path(service): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let service = parse_service(&service)?;
    let rating = parse_rating(&body)?;

    if !state.snapshot.current().network.has_service(&service) {
        return Err(AppError::not_found());
    }

    let summary = state.ratings.submit(&service, rating).await;
    debug!(
        %service,
        rating = rating.get(),
        average = summary.average,
        count = summary.count,
        "Recorded rating"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Stops on a road, opposite pairs grouped together.
async fn road_stops(
    State(state): State<AppState>,
    Path(road): Path<String>,
) -> Result<Json<Vec<BusStopDto>>, AppError> {
    let snapshot = state.snapshot.current();

    let stops = stops_on_road(snapshot.network.stops(), &road);
    if stops.is_empty() {
        return Err(AppError::not_found());
    }
    Ok(Json(stops.into_iter().map(BusStopDto::from_stop).collect()))
}

/// Plan a journey between `{origin}-{destination}`.
async fn plan_journey(
    State(state): State<AppState>,
    Path(stops): Path<String>,
    Query(query): Query<JourneyQuery>,
) -> Result<Json<JourneyResponse>, AppError> {
    let (origin, destination) = stops.split_once('-').ok_or_else(|| AppError::BadRequest {
        message: format!("Expected {{origin}}-{{destination}}, got {stops}"),
    })?;
    let request = JourneyRequest::new(parse_stop_code(origin)?, parse_stop_code(destination)?)
        .with_mode(query.mode());

    // The solve is CPU-bound; keep it off the async workers
    let snapshot = state.snapshot.current();
    let config = state.config.clone();
    let journey = tokio::task::spawn_blocking(move || {
        Planner::new(&snapshot.graph, &config).plan(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Journey search failed: {e}"),
    })??;

    Ok(Json(JourneyResponse::from_journey(&journey)))
}

fn parse_stop_code(s: &str) -> Result<StopCode, AppError> {
    StopCode::parse(s).map_err(|e| AppError::BadRequest {
        message: format!("{e}: {s}"),
    })
}

fn parse_service(s: &str) -> Result<ServiceKey, AppError> {
    ServiceKey::parse(s).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Parse `{longitude}-{latitude}`. A leading minus belongs to the longitude,
/// and a minus straight after the separator to the latitude.
fn parse_location(s: &str) -> Result<Location, AppError> {
    let invalid = || AppError::BadRequest {
        message: format!("Invalid location, expected {{longitude}}-{{latitude}}: {s}"),
    };

    let split = s
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i)
        .ok_or_else(invalid)?;
    let (lon, lat) = (&s[..split], &s[split + 1..]);

    let longitude: f64 = lon.parse().map_err(|_| invalid())?;
    let latitude: f64 = lat.parse().map_err(|_| invalid())?;
    if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
        return Err(invalid());
    }

    Ok(Location::new(latitude, longitude))
}

/// Read `{"rating": n}`, where n is a whole number from 1 to 5.
fn parse_rating(body: &[u8]) -> Result<Rating, AppError> {
    let invalid = || AppError::BadRequest {
        message: INVALID_RATING.to_string(),
    };

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(body), "Rating body is not JSON");
        invalid()
    })?;

    let rating = value.get("rating").ok_or_else(invalid)?;
    let whole = rating.as_i64().or_else(|| {
        rating
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= 5.0)
            .map(|f| f as i64)
    });

    whole
        .and_then(|n| Rating::new(n).ok())
        .ok_or_else(invalid)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Timeout,
    Internal { message: String },
}

impl AppError {
    fn not_found() -> Self {
        AppError::NotFound {
            message: NOT_FOUND.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::NoSuchStop(_) | PlanError::NoPathFound { .. } => {
                debug!(error = %e, "No journey");
                AppError::not_found()
            }
            PlanError::Timeout => AppError::Timeout,
            PlanError::InvalidJourney(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Journey search timed out".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
