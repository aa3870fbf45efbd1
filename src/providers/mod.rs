//! Upstream provider seams
//!
//! Every adapter answers with `Result<Option<T>>`:
//! - `Ok(Some(_))` the provider answered with data
//! - `Ok(None)` the provider answered but had nothing (no match, non-OK status)
//! - `Err(_)` the call itself failed (network fault, malformed payload)
//!
//! Callers decide how each kind degrades; adapters never swallow errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::Result;
use crate::config::ProvidersConfig;
use crate::models::{Coordinate, PlaceLocation, WeatherObservation};

pub mod aviationstack;
pub mod openweather;

pub use aviationstack::AviationStackClient;
pub use openweather::{OpenWeatherGeocoder, OpenWeatherProvider};

/// Resolves a place name to coordinates
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// First match for `name`, or `None` when the provider knows no such place
    async fn resolve(&self, name: &str) -> Result<Option<PlaceLocation>>;
}

/// Fetches current weather at a coordinate
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current observation at `coordinate`, or `None` on a non-OK provider status
    async fn fetch_current(&self, coordinate: &Coordinate) -> Result<Option<WeatherObservation>>;
}

/// Live flight records, passed through untouched
#[async_trait]
pub trait FlightDataProvider: Send + Sync {
    /// Raw records, optionally filtered by IATA flight number.
    /// `None` when the provider answered without usable data.
    async fn live_flights(&self, flight_number: Option<&str>) -> Result<Option<Vec<Value>>>;
}

/// Build the HTTP client shared by all adapters
pub fn http_client(config: &ProvidersConfig) -> Result<Client> {
    let timeout = Duration::from_secs(config.timeout_seconds.into());

    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("skyroute/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Trim a trailing slash so paths can be appended with `format!`
fn base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}
