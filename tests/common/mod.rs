//! Shared fixtures for the integration tests

#![allow(dead_code)]

use serde_json::{Value, json};
use skyroute::SkyRouteConfig;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const WEATHER_KEY: &str = "test_weather_key";
pub const AVIATION_KEY: &str = "test_aviation_key";

/// Configuration pointing every provider at the mock server
pub fn config_for(server: &MockServer) -> SkyRouteConfig {
    let mut config = SkyRouteConfig::default();
    config.providers.weather_api_key = Some(WEATHER_KEY.to_string());
    config.providers.weather_base_url = format!("{}/data/2.5", server.uri());
    config.providers.geocoding_base_url = format!("{}/geo/1.0", server.uri());
    config.providers.aviation_api_key = Some(AVIATION_KEY.to_string());
    config.providers.aviation_base_url = format!("{}/v1", server.uri());
    config.providers.timeout_seconds = 2;
    config
}

pub fn place_json(name: &str, lat: f64, lon: f64, country: &str) -> Value {
    json!([{ "name": name, "lat": lat, "lon": lon, "country": country }])
}

/// Trimmed OpenWeather current-weather payload
pub fn weather_json(wind_speed: f64, condition: &str, description: &str) -> Value {
    json!({
        "coord": { "lon": 0.0, "lat": 0.0 },
        "weather": [{ "id": 800, "main": condition, "description": description, "icon": "01d" }],
        "main": { "temp": 18.4, "feels_like": 17.9, "pressure": 1016, "humidity": 62 },
        "visibility": 10000,
        "wind": { "speed": wind_speed, "deg": 240 },
        "clouds": { "all": 20 },
        "cod": 200
    })
}

/// Serves calm weather everywhere except where `latitude / 10` rounds to
/// `stormy_index`, which gets a 60 m/s wind
pub struct WindByLatitude {
    pub stormy_index: Option<usize>,
}

impl Respond for WindByLatitude {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let lat: f64 = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "lat")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(f64::NAN);
        let index = (lat / 10.0).round() as usize;

        let wind = if Some(index) == self.stormy_index { 60.0 } else { 4.0 };
        ResponseTemplate::new(200).set_body_json(weather_json(wind, "Clear", "clear sky"))
    }
}
