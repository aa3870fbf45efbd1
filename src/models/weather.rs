//! Weather observation model and display methods

use serde::{Deserialize, Serialize};

/// Visibility assumed when the provider omits it, in meters
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// Current weather at one point, in metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: u16,
    /// Provider condition group, e.g. "Clear", "Thunderstorm"
    #[serde(rename = "weather_condition")]
    pub condition: String,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Visibility in meters
    pub visibility: u32,
    /// Cloud cover percentage (0-100)
    #[serde(rename = "clouds")]
    pub cloud_cover: u8,
}

impl WeatherObservation {
    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        let direction = Self::wind_direction_to_cardinal(self.wind_direction);
        format!("{:.1} m/s {}", self.wind_speed, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> WeatherObservation {
        WeatherObservation {
            temperature: 15.0,
            humidity: 60,
            pressure: 1013.0,
            wind_speed: 8.0,
            wind_direction: 180,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            visibility: DEFAULT_VISIBILITY_M,
            cloud_cover: 10,
        }
    }

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(0), "N");
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(90), "E");
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(180), "S");
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(270), "W");
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(45), "NE");
        assert_eq!(WeatherObservation::wind_direction_to_cardinal(400), "Unknown");
    }

    #[test]
    fn test_display_helpers() {
        let weather = observation();
        assert_eq!(weather.format_temperature(), "15.0°C");
        assert_eq!(weather.format_wind(), "8.0 m/s S");
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(observation()).unwrap();
        assert_eq!(value["weather_condition"], "Clear");
        assert_eq!(value["clouds"], 10);
        assert_eq!(value["visibility"], 10_000);
    }
}
