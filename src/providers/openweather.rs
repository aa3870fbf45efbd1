//! OpenWeather geocoding and current-weather adapters

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::{GeoResolver, WeatherProvider, base_url};
use crate::config::ProvidersConfig;
use crate::models::weather::DEFAULT_VISIBILITY_M;
use crate::models::{Coordinate, PlaceLocation, WeatherObservation};
use crate::{Result, SkyRouteError};

const PROVIDER: &str = "openweather";

/// Direct geocoding via `GET {geocoding_base_url}/direct`
pub struct OpenWeatherGeocoder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherGeocoder {
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.geocoding_base_url).to_string(),
            api_key: config.weather_api_key.clone().unwrap_or_default(),
        }
    }
}

/// Current conditions via `GET {weather_base_url}/weather`
pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: base_url(&config.weather_base_url).to_string(),
            api_key: config.weather_api_key.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl GeoResolver for OpenWeatherGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, name: &str) -> Result<Option<PlaceLocation>> {
        let start_time = Instant::now();
        let url = format!(
            "{}/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(name),
            urlencoding::encode(&self.api_key)
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let payload: Value = response.json().await.map_err(|e| {
            SkyRouteError::provider(PROVIDER, format!("Invalid geocoding response ({status}): {e}"))
        })?;

        let location = parse_geocoding(payload)?;
        match &location {
            Some(place) => info!(
                "Resolved '{}' to {} ({}) in {:.3}s",
                name,
                place.name,
                place.coordinate.format_coordinates(),
                start_time.elapsed().as_secs_f64()
            ),
            None => warn!("No geocoding results found for '{}'", name),
        }

        Ok(location)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn fetch_current(&self, coordinate: &Coordinate) -> Result<Option<WeatherObservation>> {
        let start_time = Instant::now();
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            coordinate.latitude,
            coordinate.longitude,
            urlencoding::encode(&self.api_key)
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Weather provider answered {} for {}", status, coordinate.format_coordinates());
            return Ok(None);
        }

        let body: CurrentWeatherResponse = response.json().await.map_err(|e| {
            SkyRouteError::provider(PROVIDER, format!("Invalid weather response: {e}"))
        })?;

        let observation = body.into_observation()?;
        debug!(
            "Weather at {}: {} {}, {} in {:.3}s",
            coordinate.format_coordinates(),
            observation.condition,
            observation.format_temperature(),
            observation.format_wind(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Some(observation))
    }
}

/// Entry of the geocoding result array
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

impl From<GeocodingResult> for PlaceLocation {
    fn from(result: GeocodingResult) -> Self {
        PlaceLocation::new(
            Coordinate {
                latitude: result.lat,
                longitude: result.lon,
            },
            result.name,
            result.country,
        )
    }
}

/// Zero matches is `None`; anything that is not an array of results is an error
fn parse_geocoding(payload: Value) -> Result<Option<PlaceLocation>> {
    let results = match payload {
        Value::Array(results) => results,
        other => {
            return Err(SkyRouteError::provider(
                PROVIDER,
                format!("Unexpected geocoding payload: {other}"),
            ));
        }
    };

    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    let result: GeocodingResult = serde_json::from_value(first).map_err(|e| {
        SkyRouteError::provider(PROVIDER, format!("Malformed geocoding result: {e}"))
    })?;

    Ok(Some(result.into()))
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    wind: WindBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    visibility: Option<u32>,
    clouds: CloudsBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: u8,
}

impl CurrentWeatherResponse {
    fn into_observation(self) -> Result<WeatherObservation> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            SkyRouteError::provider(PROVIDER, "Weather response has no condition entry")
        })?;

        Ok(WeatherObservation {
            temperature: self.main.temp,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            wind_direction: self.wind.deg.unwrap_or(0),
            condition: condition.main,
            description: condition.description,
            visibility: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
            cloud_cover: self.clouds.all,
        })
    }
}
