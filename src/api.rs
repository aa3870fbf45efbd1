//! JSON endpoints over the route analyzer and flight pass-through

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::analyzer::RouteAnalyzer;
use crate::config::SkyRouteConfig;
use crate::models::{Coordinate, WeatherObservation};
use crate::providers::{self, AviationStackClient, FlightDataProvider};
use crate::suitability::SuitabilityVerdict;
use crate::{Result, VERSION};

const MISSING_CITIES: &str = "Departure and arrival cities are required";
const MISSING_COORDINATES: &str = "Latitude and longitude are required";
const NO_FLIGHT_DATA: &str = "Could not fetch flight data";

/// Shared, read-only handles used by every request
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<RouteAnalyzer>,
    pub flights: Arc<dyn FlightDataProvider>,
}

impl AppState {
    pub fn from_config(config: &SkyRouteConfig) -> Result<Self> {
        let client = providers::http_client(&config.providers)?;
        let flights =
            AviationStackClient::new(client, &config.providers, config.analysis.flight_limit);

        Ok(Self {
            analyzer: Arc::new(RouteAnalyzer::from_config(config)?),
            flights: Arc::new(flights),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRouteRequest {
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherPointQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlightStatusQuery {
    pub flight_number: Option<String>,
}

#[derive(Serialize)]
struct WeatherPointResponse {
    coordinates: Coordinate,
    weather: Option<WeatherObservation>,
    #[serde(flatten)]
    verdict: SuitabilityVerdict,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze_route", post(analyze_route))
        .route("/weather_point", get(weather_point))
        .route("/flight_status", get(flight_status))
        .route("/health", get(health))
        .with_state(state)
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

async fn analyze_route(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRouteRequest>,
) -> Response {
    let (Some(departure), Some(arrival)) =
        (non_blank(request.departure), non_blank(request.arrival))
    else {
        return error_body(StatusCode::BAD_REQUEST, MISSING_CITIES);
    };

    info!("Analyzing route {} -> {}", departure, arrival);
    match state.analyzer.analyze_route(&departure, &arrival).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            warn!("Route analysis for {} -> {} failed: {}", departure, arrival, e);
            error_body(StatusCode::OK, e.user_message())
        }
    }
}

/// A zero coordinate counts as missing, as does anything unparsable
fn parse_axis(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| *v != 0.0)
}

async fn weather_point(
    State(state): State<AppState>,
    Query(query): Query<WeatherPointQuery>,
) -> Response {
    let (Some(lat), Some(lon)) = (parse_axis(query.lat.as_deref()), parse_axis(query.lon.as_deref()))
    else {
        return error_body(StatusCode::BAD_REQUEST, MISSING_COORDINATES);
    };

    let coordinate = match Coordinate::new(lat, lon) {
        Ok(coordinate) => coordinate,
        Err(e) => return error_body(StatusCode::BAD_REQUEST, e.user_message()),
    };

    let (weather, verdict) = state.analyzer.weather_at(&coordinate).await;
    Json(WeatherPointResponse {
        coordinates: coordinate,
        weather,
        verdict,
    })
    .into_response()
}

async fn flight_status(
    State(state): State<AppState>,
    Query(query): Query<FlightStatusQuery>,
) -> Response {
    let flight_number = non_blank(query.flight_number);

    match state.flights.live_flights(flight_number.as_deref()).await {
        Ok(Some(records)) => Json(records).into_response(),
        Ok(None) => error_body(StatusCode::OK, NO_FLIGHT_DATA),
        Err(e) => {
            warn!("Flight data fetch failed: {}", e);
            error_body(StatusCode::OK, format!("Flight data fetch failed: {e}"))
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}
