//! Per-point and route-level analysis results

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Coordinate, PlaceLocation, WeatherObservation};
use crate::suitability::{FlightStatus, SuitabilityVerdict};

/// One sampled point along the route with its weather and verdict
#[derive(Debug, Clone, Serialize)]
pub struct PathPoint {
    /// 1-based position along the route
    #[serde(rename = "point_number")]
    pub index: usize,
    #[serde(rename = "coordinates")]
    pub coordinate: Coordinate,
    /// `None` when the weather provider had nothing for this point
    pub weather: Option<WeatherObservation>,
    #[serde(flatten)]
    pub verdict: SuitabilityVerdict,
}

/// Aggregated result of analyzing all sampled points of one route
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    #[serde(rename = "departure_city")]
    pub departure: PlaceLocation,
    #[serde(rename = "arrival_city")]
    pub arrival: PlaceLocation,
    /// Great-circle distance between the two endpoints
    pub distance_km: f64,
    pub overall_status: FlightStatus,
    /// One "Point {index}: {details}" entry per Not Suitable point, in route order
    pub warnings: Vec<String>,
    #[serde(rename = "path_analysis")]
    pub points: Vec<PathPoint>,
    #[serde(rename = "analysis_time")]
    pub analyzed_at: DateTime<Utc>,
}

impl RouteReport {
    /// Points whose verdict is exactly `status`
    pub fn points_with_status(&self, status: FlightStatus) -> impl Iterator<Item = &PathPoint> {
        self.points
            .iter()
            .filter(move |point| point.verdict.status() == status)
    }
}
