//! `SkyRoute` - Flight path weather analysis
//!
//! This library resolves two places, samples the straight path between
//! them, fetches current weather at every sample and classifies each
//! point's flight suitability into a route-level report.

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod providers;
pub mod suitability;
pub mod web;

// Re-export core types for public API
pub use analyzer::RouteAnalyzer;
pub use config::SkyRouteConfig;
pub use error::SkyRouteError;
pub use models::{Coordinate, PathPoint, PlaceLocation, RouteReport, WeatherObservation};
pub use providers::{FlightDataProvider, GeoResolver, WeatherProvider};
pub use suitability::{FlightStatus, SuitabilityVerdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkyRouteError>;
