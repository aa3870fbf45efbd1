//! Flight suitability rules for a single weather observation
//!
//! Classification is a pure function of one [`WeatherObservation`] (or its
//! absence). The rules collect two independent lists:
//!
//! - **warnings** make a point Not Suitable
//! - **conditions** are notable but flyable, and make a point Marginal when
//!   no warning is present
//!
//! Both lists are kept as structured reasons; the `details` text shown to
//! users is rendered from them on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::WeatherObservation;

/// Below this temperature (°C) conditions are extreme
pub const MIN_SAFE_TEMPERATURE_C: f64 = -40.0;
/// Above this temperature (°C) conditions are extreme
pub const MAX_SAFE_TEMPERATURE_C: f64 = 50.0;
/// Wind speeds (m/s) above this are unsafe
pub const HIGH_WIND_MS: f64 = 50.0;
/// Wind speeds (m/s) above this are notable
pub const MODERATE_WIND_MS: f64 = 25.0;
/// Visibility (m) below this is unsafe
pub const MIN_VISIBILITY_M: u32 = 5_000;
/// Cloud cover (%) above this is heavy
pub const HEAVY_CLOUD_PCT: u8 = 80;
/// Cloud cover (%) above this is moderate
pub const MODERATE_CLOUD_PCT: u8 = 50;

/// Provider condition groups that ground a flight
pub const SEVERE_CONDITIONS: [&str; 6] = ["Thunderstorm", "Heavy Rain", "Snow", "Fog", "Dust", "Sand"];

const NO_DATA_DETAILS: &str = "No weather data available";
const GOOD_DETAILS: &str = "Good weather conditions for flying";
const DETAILS_SEPARATOR: &str = " | ";

/// Flight suitability label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    Suitable,
    Marginal,
    #[serde(rename = "Not Suitable")]
    NotSuitable,
    Unknown,
}

impl FlightStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Suitable => "Suitable",
            FlightStatus::Marginal => "Marginal",
            FlightStatus::NotSuitable => "Not Suitable",
            FlightStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reason that makes a point unsafe to fly
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    ExtremeTemperature(f64),
    HighWindSpeed(f64),
    LowVisibility(u32),
    /// Carries the provider's free-text description
    SevereWeather(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ExtremeTemperature(t) => write!(f, "Extreme temperature: {t}°C"),
            Warning::HighWindSpeed(w) => write!(f, "High wind speed: {w} m/s"),
            Warning::LowVisibility(v) => write!(f, "Low visibility: {v} meters"),
            Warning::SevereWeather(description) => write!(f, "Severe weather: {description}"),
        }
    }
}

/// A notable but non-fatal observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    HighWind,
    ModerateWind,
    LowVisibility,
    HeavyCloudCover,
    ModerateCloudCover,
    /// Carries the provider's condition group, e.g. "Fog"
    Severe(String),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::HighWind => f.write_str("High wind conditions"),
            Condition::ModerateWind => f.write_str("Moderate wind conditions"),
            Condition::LowVisibility => f.write_str("Low visibility"),
            Condition::HeavyCloudCover => f.write_str("Heavy cloud cover"),
            Condition::ModerateCloudCover => f.write_str("Moderate cloud cover"),
            Condition::Severe(condition) => write!(f, "{condition} conditions"),
        }
    }
}

/// Classifier output for one observation
#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityVerdict {
    observed: bool,
    warnings: Vec<Warning>,
    conditions: Vec<Condition>,
}

impl SuitabilityVerdict {
    /// Verdict for a point without weather data
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            observed: false,
            warnings: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Apply the rule set to an observation, or to its absence
    #[must_use]
    pub fn classify(observation: Option<&WeatherObservation>) -> Self {
        let Some(weather) = observation else {
            return Self::unknown();
        };

        let mut warnings = Vec::new();
        let mut conditions = Vec::new();

        if weather.temperature < MIN_SAFE_TEMPERATURE_C
            || weather.temperature > MAX_SAFE_TEMPERATURE_C
        {
            warnings.push(Warning::ExtremeTemperature(weather.temperature));
        }

        // High wind lands in both lists
        if weather.wind_speed > HIGH_WIND_MS {
            conditions.push(Condition::HighWind);
            warnings.push(Warning::HighWindSpeed(weather.wind_speed));
        } else if weather.wind_speed > MODERATE_WIND_MS {
            conditions.push(Condition::ModerateWind);
        }

        if weather.visibility < MIN_VISIBILITY_M {
            conditions.push(Condition::LowVisibility);
            warnings.push(Warning::LowVisibility(weather.visibility));
        }

        if weather.cloud_cover > HEAVY_CLOUD_PCT {
            conditions.push(Condition::HeavyCloudCover);
        } else if weather.cloud_cover > MODERATE_CLOUD_PCT {
            conditions.push(Condition::ModerateCloudCover);
        }

        if SEVERE_CONDITIONS.contains(&weather.condition.as_str()) {
            conditions.push(Condition::Severe(weather.condition.clone()));
            warnings.push(Warning::SevereWeather(weather.description.clone()));
        }

        Self {
            observed: true,
            warnings,
            conditions,
        }
    }

    /// Status label; warnings take priority over conditions
    #[must_use]
    pub fn status(&self) -> FlightStatus {
        if !self.observed {
            FlightStatus::Unknown
        } else if !self.warnings.is_empty() {
            FlightStatus::NotSuitable
        } else if !self.conditions.is_empty() {
            FlightStatus::Marginal
        } else {
            FlightStatus::Suitable
        }
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Human-readable explanation matching [`Self::status`]
    #[must_use]
    pub fn details(&self) -> String {
        match self.status() {
            FlightStatus::Unknown => NO_DATA_DETAILS.to_string(),
            FlightStatus::NotSuitable => join(&self.warnings),
            FlightStatus::Marginal => join(&self.conditions),
            FlightStatus::Suitable => GOOD_DETAILS.to_string(),
        }
    }
}

fn join<T: fmt::Display>(reasons: &[T]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(DETAILS_SEPARATOR)
}

#[derive(Serialize)]
struct VerdictSummary {
    flight_status: FlightStatus,
    details: String,
}

impl Serialize for SuitabilityVerdict {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VerdictSummary {
            flight_status: self.status(),
            details: self.details(),
        }
        .serialize(serializer)
    }
}
